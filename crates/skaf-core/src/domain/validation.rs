use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::desired::{DesiredStructure, SolutionSpec, WebAppSpec};
use crate::domain::error::DomainError;
use crate::domain::value_objects::Category;

/// A single problem found in a desired structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub category: Category,
    /// Entity name, empty when the entity itself has no name.
    pub entity: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(category: Category, entity: &str, message: impl Into<String>) -> Self {
        Self {
            category,
            entity: entity.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entity.is_empty() {
            write!(f, "{}: {}", self.category, self.message)
        } else {
            write!(f, "{} '{}': {}", self.category, self.entity, self.message)
        }
    }
}

/// Every issue found in one pass. Validation never stops at the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(DomainError::InvalidStructure {
            issue_count: self.issues.len(),
            issues: self.issues.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Structural well-formedness checks for a desired structure.
pub struct StructureValidator;

impl StructureValidator {
    pub fn validate(structure: &DesiredStructure) -> ValidationReport {
        let mut issues = Vec::new();

        for category in [Category::Service, Category::Component] {
            let solutions = structure.solutions(category);
            for solution in solutions {
                check_solution(category, solution, &mut issues);
            }
            check_unique_names(category, solutions.iter().map(|s| s.name.as_str()), &mut issues);
        }

        for web in &structure.web {
            check_web_app(web, &mut issues);
        }
        check_unique_names(
            Category::WebApp,
            structure.web.iter().map(|w| w.name.as_str()),
            &mut issues,
        );

        ValidationReport { issues }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Names become directory and file names under the base directory, so they
/// must be one plain path component.
fn unsafe_path_component(value: &str) -> bool {
    !blank(value)
        && (value.contains(['/', '\\']) || matches!(value.trim(), "." | ".."))
}

fn check_solution(category: Category, solution: &SolutionSpec, issues: &mut Vec<ValidationIssue>) {
    let name = solution.name.as_str();
    let mut issue = |message: String| issues.push(ValidationIssue::new(category, name, message));

    if blank(name) {
        issue("missing a name".into());
    }
    if unsafe_path_component(name) {
        issue("name must be a single folder name".into());
    }
    if blank(&solution.solution_name) {
        issue("missing solutionName".into());
    }
    if unsafe_path_component(&solution.solution_name) {
        issue("solutionName must be a plain file name".into());
    }
    if solution.src.projects.is_empty() {
        issue("has no projects defined".into());
    }

    let declared: HashSet<&str> = solution.project_names().collect();
    let mut seen = HashSet::new();
    for project in &solution.src.projects {
        if blank(&project.name) {
            issue("has a project without a name".into());
            continue;
        }
        if unsafe_path_component(&project.name) {
            issue(format!("project '{}' must be a single folder name", project.name));
        }
        if !seen.insert(project.name.as_str()) {
            issue(format!("declares project '{}' more than once", project.name));
        }
        if blank(&project.template) {
            issue(format!("project '{}' is missing a template", project.name));
        }
        for dependency in &project.depends_on {
            if !declared.contains(dependency.as_str()) {
                issue(format!(
                    "project '{}' depends on unknown project '{dependency}'",
                    project.name
                ));
            }
        }
    }

    let missing_test_template = solution
        .tests
        .as_ref()
        .is_some_and(|t| t.generate_for_each_project && t.template.as_deref().is_none_or(blank));
    if missing_test_template {
        issue("generates tests but has no test template".into());
    }
}

fn check_web_app(web: &WebAppSpec, issues: &mut Vec<ValidationIssue>) {
    let mut issue =
        |message: &str| issues.push(ValidationIssue::new(Category::WebApp, &web.name, message));

    if blank(&web.name) {
        issue("missing a name");
    }
    if unsafe_path_component(&web.name) {
        issue("name must be a single folder name");
    }
    if blank(&web.solution_name) {
        issue("missing solutionName");
    }
    if blank(&web.command) {
        issue("missing command");
    }
}

fn check_unique_names<'a>(
    category: Category,
    names: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in names.filter(|n| !blank(n)) {
        if !seen.insert(name) && reported.insert(name) {
            issues.push(ValidationIssue::new(category, name, "declared more than once"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::desired::{ProjectSpec, SourceSpec, TestSpec};

    fn project(name: &str, depends_on: &[&str]) -> ProjectSpec {
        ProjectSpec {
            name: name.into(),
            template: "classlib".into(),
            version: "net9.0".into(),
            depends_on: depends_on.iter().map(|d| (*d).to_string()).collect(),
            ..ProjectSpec::default()
        }
    }

    fn service(name: &str, projects: Vec<ProjectSpec>) -> SolutionSpec {
        SolutionSpec {
            name: name.into(),
            solution_name: name.into(),
            src: SourceSpec {
                namespace: format!("Acme.{name}"),
                projects,
            },
            tests: None,
        }
    }

    fn messages(report: &ValidationReport) -> Vec<String> {
        report.issues().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn well_formed_structure_is_valid() {
        let structure = DesiredStructure {
            services: vec![service(
                "Api",
                vec![project("Api", &["Domain"]), project("Domain", &[])],
            )],
            web: vec![WebAppSpec {
                name: "Portal".into(),
                solution_name: "Portal".into(),
                command: "npm create vite@latest .".into(),
                ..WebAppSpec::default()
            }],
            ..DesiredStructure::default()
        };

        let report = StructureValidator::validate(&structure);
        assert!(report.is_valid(), "{:?}", messages(&report));
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn collects_every_issue() {
        let mut broken = service("", vec![]);
        broken.solution_name.clear();
        let structure = DesiredStructure {
            components: vec![broken],
            web: vec![WebAppSpec {
                name: "Portal".into(),
                ..WebAppSpec::default()
            }],
            ..DesiredStructure::default()
        };

        let report = StructureValidator::validate(&structure);
        assert_eq!(
            messages(&report),
            vec![
                "Component: missing a name",
                "Component: missing solutionName",
                "Component: has no projects defined",
                "WebApp 'Portal': missing solutionName",
                "WebApp 'Portal': missing command",
            ]
        );
    }

    #[test]
    fn rejects_unknown_dependencies_and_duplicates() {
        let structure = DesiredStructure {
            services: vec![service(
                "Api",
                vec![project("Api", &["Persistence"]), project("Api", &[])],
            )],
            ..DesiredStructure::default()
        };

        let report = StructureValidator::validate(&structure);
        assert_eq!(
            messages(&report),
            vec![
                "Service 'Api': project 'Api' depends on unknown project 'Persistence'",
                "Service 'Api': declares project 'Api' more than once",
            ]
        );
    }

    #[test]
    fn duplicate_entity_names_reported_once() {
        let structure = DesiredStructure {
            services: vec![
                service("Api", vec![project("Api", &[])]),
                service("Api", vec![project("Api", &[])]),
                service("Api", vec![project("Api", &[])]),
            ],
            ..DesiredStructure::default()
        };

        let report = StructureValidator::validate(&structure);
        assert_eq!(messages(&report), vec!["Service 'Api': declared more than once"]);
    }

    #[test]
    fn test_generation_needs_a_template() {
        let mut api = service("Api", vec![project("Api", &[])]);
        api.tests = Some(TestSpec {
            generate_for_each_project: true,
            ..TestSpec::default()
        });
        let structure = DesiredStructure {
            services: vec![api],
            ..DesiredStructure::default()
        };

        let err = StructureValidator::validate(&structure)
            .into_result()
            .unwrap_err();
        match err {
            DomainError::InvalidStructure { issue_count, issues } => {
                assert_eq!(issue_count, 1);
                assert_eq!(issues[0], "Service 'Api': generates tests but has no test template");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn names_must_stay_inside_the_base_directory() {
        let mut escaping = service("../Victim", vec![project("Api", &[])]);
        escaping.solution_name = "Victim".into();
        let structure = DesiredStructure {
            services: vec![escaping],
            components: vec![service("..", vec![project("../Escape", &[])])],
            web: vec![WebAppSpec {
                name: "/abs/x".into(),
                solution_name: "X".into(),
                command: "npm create vite@latest .".into(),
                ..WebAppSpec::default()
            }],
            ..DesiredStructure::default()
        };

        let report = StructureValidator::validate(&structure);
        assert_eq!(
            messages(&report),
            vec![
                "Service '../Victim': name must be a single folder name",
                "Component '..': name must be a single folder name",
                "Component '..': solutionName must be a plain file name",
                "Component '..': project '../Escape' must be a single folder name",
                "WebApp '/abs/x': name must be a single folder name",
            ]
        );
    }

    #[test]
    fn dotted_names_are_allowed() {
        let structure = DesiredStructure {
            services: vec![service("Acme.Api", vec![project("Acme.Api.Web", &[])])],
            ..DesiredStructure::default()
        };

        assert!(StructureValidator::validate(&structure).is_valid());
    }
}
