//! Materializer adapters.

pub mod csproj;
mod dotnet;

pub use dotnet::{DotnetMaterializer, ToolPaths};
