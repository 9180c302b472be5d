//! The example structure document written by `skaf init`.

use std::path::Path;

use skaf_core::{domain::DesiredStructure, error::SkafResult};

use crate::structure_source::YamlStructureSource;

/// File name `skaf init` writes and `skaf build` reads by default.
pub const DEFAULT_STRUCTURE_FILE: &str = "structure.yaml";

pub const EXAMPLE_STRUCTURE: &str = r#"devops:
  pipelines:
    - azure-pipelines.yml
    - build.yml

services:
  - name: ExampleService
    solutionName: ExampleService
    src:
      namespace: Company.Project.Services.ExampleService
      projects:
        - name: Api
          type: dotnet
          version: net9.0
          template: webapi
          dependsOn:
            - Application
            - Infrastructure
          packages:
            - name: Microsoft.AspNetCore.Authentication.JwtBearer
              version: 6.0.0
            - name: AutoMapper.Extensions.Microsoft.DependencyInjection
        - name: Application
          type: dotnet
          version: net9.0
          template: classlib
          dependsOn:
            - Domain
        - name: Domain
          type: dotnet
          version: net9.0
          template: classlib
        - name: Infrastructure
          type: dotnet
          version: net9.0
          template: classlib
          dependsOn:
            - Application
            - Domain
    tests:
      namespace: Company.Project.Services.ExampleService.Tests
      generateForEachProject: true
      template: xunit

components:
  - name: ExampleProcessor
    solutionName: ExampleProcessor
    src:
      namespace: Company.Project.Components.ExampleProcessor
      projects:
        - name: Runtime
          type: dotnet
          version: net9.0
          template: worker
          dependsOn:
            - Application
            - Infrastructure
        - name: Application
          type: dotnet
          version: net9.0
          template: classlib
          dependsOn:
            - Domain
        - name: Domain
          type: dotnet
          version: net9.0
          template: classlib
        - name: Infrastructure
          type: dotnet
          version: net9.0
          template: classlib
          dependsOn:
            - Application
            - Domain
    tests:
      namespace: Company.Project.Components.ExampleProcessor.Tests
      generateForEachProject: true
      template: xunit

web:
  - name: ExampleReact
    solutionName: ExampleReact
    type: react
    namespace: Company.Project.Web.ExampleReact
    command: npm create vite@latest . -- --template react-ts
    postCreate:
      - npm install
"#;

/// The example document, parsed.
pub fn example_structure() -> SkafResult<DesiredStructure> {
    YamlStructureSource::new().parse(EXAMPLE_STRUCTURE, Path::new(DEFAULT_STRUCTURE_FILE))
}
