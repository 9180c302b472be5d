//! The desired structure: what the declarative document says should exist.
//!
//! These types mirror the YAML document field for field (camelCase keys,
//! unknown keys ignored). They are produced by a `StructureSource` adapter and
//! only ever read by the domain.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Category;

/// Suffix appended to a project name to form its test project name.
pub const TEST_PROJECT_SUFFIX: &str = ".UnitTests";

/// Conventional test project name for a source project.
pub fn test_project_name(project: &str) -> String {
    format!("{project}{TEST_PROJECT_SUFFIX}")
}

/// Root of the declarative document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesiredStructure {
    pub services: Vec<SolutionSpec>,
    pub components: Vec<SolutionSpec>,
    pub web: Vec<WebAppSpec>,
    pub devops: DevOpsSpec,
}

impl DesiredStructure {
    /// Solution entities for a category. Web apps are not solutions.
    pub fn solutions(&self, category: Category) -> &[SolutionSpec] {
        match category {
            Category::Service => &self.services,
            Category::Component => &self.components,
            Category::WebApp => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.components.is_empty()
            && self.web.is_empty()
            && self.devops.pipelines.is_empty()
    }
}

/// A service or component: one solution with source and test projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolutionSpec {
    pub name: String,
    pub solution_name: String,
    pub src: SourceSpec,
    pub tests: Option<TestSpec>,
}

impl SolutionSpec {
    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.src.projects.iter().map(|p| p.name.as_str())
    }

    pub fn generates_tests(&self) -> bool {
        self.tests
            .as_ref()
            .is_some_and(|t| t.generate_for_each_project)
    }

    /// Test projects this solution should have. Empty unless test
    /// generation is switched on.
    pub fn expected_test_projects(&self) -> Vec<String> {
        if !self.generates_tests() {
            return Vec::new();
        }
        self.project_names().map(test_project_name).collect()
    }

    /// Solution file name, falling back to the entity name.
    pub fn solution_file_stem(&self) -> &str {
        if self.solution_name.trim().is_empty() {
            &self.name
        } else {
            &self.solution_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceSpec {
    pub namespace: String,
    pub projects: Vec<ProjectSpec>,
}

/// One source project inside a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub template: String,
    pub depends_on: Vec<String>,
    pub packages: Vec<PackageSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageSpec {
    pub name: String,
    pub version: Option<String>,
}

/// Test generation settings for a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestSpec {
    pub namespace: Option<String>,
    pub generate_for_each_project: bool,
    pub template: Option<String>,
}

/// A web app generated by an arbitrary shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebAppSpec {
    pub name: String,
    pub solution_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub namespace: String,
    pub command: String,
    pub post_create: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevOpsSpec {
    pub pipelines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(projects: &[&str], tests: Option<bool>) -> SolutionSpec {
        SolutionSpec {
            name: "Api".into(),
            solution_name: "Api".into(),
            src: SourceSpec {
                namespace: "Acme.Api".into(),
                projects: projects
                    .iter()
                    .map(|p| ProjectSpec {
                        name: (*p).into(),
                        template: "classlib".into(),
                        ..ProjectSpec::default()
                    })
                    .collect(),
            },
            tests: tests.map(|on| TestSpec {
                generate_for_each_project: on,
                template: Some("xunit".into()),
                ..TestSpec::default()
            }),
        }
    }

    #[test]
    fn test_projects_follow_naming_convention() {
        let spec = solution(&["Api", "Domain"], Some(true));
        assert_eq!(
            spec.expected_test_projects(),
            vec!["Api.UnitTests".to_string(), "Domain.UnitTests".to_string()]
        );
    }

    #[test]
    fn no_test_projects_when_generation_is_off() {
        assert!(solution(&["Api"], Some(false)).expected_test_projects().is_empty());
        assert!(solution(&["Api"], None).expected_test_projects().is_empty());
    }

    #[test]
    fn solution_file_falls_back_to_name() {
        let mut spec = solution(&["Api"], None);
        spec.solution_name.clear();
        assert_eq!(spec.solution_file_stem(), "Api");
    }

    #[test]
    fn web_apps_are_not_solutions() {
        let desired = DesiredStructure {
            web: vec![WebAppSpec {
                name: "Portal".into(),
                ..WebAppSpec::default()
            }],
            ..DesiredStructure::default()
        };
        assert!(desired.solutions(Category::WebApp).is_empty());
    }
}
