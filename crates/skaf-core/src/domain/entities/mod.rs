pub mod desired;
pub mod snapshot;

pub use desired::{
    DesiredStructure, DevOpsSpec, PackageSpec, ProjectSpec, SolutionSpec, SourceSpec, TestSpec,
    WebAppSpec, test_project_name,
};
pub use snapshot::{GeneratedEntity, StructureSnapshot};
