//! Integration tests for skaf-core: render and reconcile through the public API.

use proptest::prelude::*;
use skaf_core::domain::{
    Category, Change, DesiredStructure, GeneratedEntity, Layout, ProjectSpec, SolutionSpec,
    SourceSpec, StructureSnapshot, TestSpec, reconcile, render,
};

fn layout() -> Layout {
    Layout::new("/repo")
}

fn solution(name: &str, projects: &[&str], tests: bool) -> SolutionSpec {
    SolutionSpec {
        name: name.into(),
        solution_name: name.into(),
        src: SourceSpec {
            namespace: format!("Acme.{name}"),
            projects: projects
                .iter()
                .map(|p| ProjectSpec {
                    name: (*p).into(),
                    template: "classlib".into(),
                    version: "net9.0".into(),
                    ..ProjectSpec::default()
                })
                .collect(),
        },
        tests: tests.then(|| TestSpec {
            generate_for_each_project: true,
            template: Some("xunit".into()),
            ..TestSpec::default()
        }),
    }
}

/// A "materializer result" where nothing new was created for any entity.
fn no_op_result(snapshot: &StructureSnapshot) -> StructureSnapshot {
    let mut result = StructureSnapshot::new();
    for category in Category::ALL {
        for entity in snapshot.entities(category) {
            result
                .entities_mut(category)
                .push(GeneratedEntity::new(entity.name.clone(), entity.directory.clone()));
        }
    }
    result
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn growing_service_gets_new_project_and_test_section() {
    let previous = StructureSnapshot::new().with_entity(
        Category::Service,
        GeneratedEntity::new("Api", "/repo/Services/Api").with_projects(["Api", "Domain"]),
    );
    let desired = DesiredStructure {
        services: vec![solution("Api", &["Api", "Domain", "Infrastructure"], true)],
        ..DesiredStructure::default()
    };

    let text = render(&desired, Some(&previous), &layout()).to_text();

    assert_eq!(
        text,
        "Services/\n\
         └── Api/\n    \
             ├── Api.sln\n    \
             ├── src/\n    \
             │   ├── Api/\n    \
             │   ├── Domain/\n    \
             │   └── [+] Infrastructure/\n    \
             └── [+] tests/\n        \
                 ├── [+] Api.UnitTests/\n        \
                 ├── [+] Domain.UnitTests/\n        \
                 └── [+] Infrastructure.UnitTests/"
    );
}

#[test]
fn dropped_component_is_removed_everywhere() {
    let previous = StructureSnapshot::new()
        .with_entity(
            Category::Component,
            GeneratedEntity::new("Old", "/x").with_projects(["Old"]),
        )
        .with_entity(
            Category::Service,
            GeneratedEntity::new("Api", "/repo/Services/Api").with_projects(["Api"]),
        );
    let desired = DesiredStructure {
        services: vec![solution("Api", &["Api"], false)],
        ..DesiredStructure::default()
    };

    let diff = render(&desired, Some(&previous), &layout());
    let components = diff
        .sections()
        .iter()
        .find(|s| s.title == "Components/")
        .expect("components section");
    assert_eq!(components.nodes.len(), 1);
    assert_eq!(components.nodes[0].label, "Old/");
    assert!(diff.lines().iter().any(|l| l.text.ends_with("[-] Old/")));
    assert!(diff.has_changes());

    let result = StructureSnapshot::new().with_entity(
        Category::Service,
        GeneratedEntity::new("Api", "/repo/Services/Api"),
    );
    let outcome = reconcile(Some(&previous), result).unwrap();

    let removed: Vec<String> = outcome.removed.iter().map(ToString::to_string).collect();
    assert_eq!(removed, vec!["Component:Old @ /x"]);
    assert!(outcome.snapshot.components.is_empty());
    assert_eq!(outcome.snapshot.services[0].projects, vec!["Api"]);
}

#[test]
fn wholly_new_entity_has_no_mixed_lines() {
    let desired = DesiredStructure {
        services: vec![solution("Billing", &["Billing", "Billing.Domain"], true)],
        ..DesiredStructure::default()
    };
    let previous = StructureSnapshot::new().with_entity(
        Category::Service,
        GeneratedEntity::new("Api", "/repo/Services/Api").with_projects(["Api"]),
    );

    let lines = render(&desired, Some(&previous), &layout()).lines();
    let billing: Vec<_> = lines
        .iter()
        .skip_while(|l| !l.text.contains("Billing/"))
        .take_while(|l| !l.text.contains("Api/"))
        .collect();

    assert_eq!(billing.len(), 8);
    assert!(billing.iter().all(|l| l.change == Change::Added));
}

// ── Properties ───────────────────────────────────────────────────────────────

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,6}"
}

fn entities_strategy(category: Category) -> impl Strategy<Value = Vec<GeneratedEntity>> {
    prop::collection::btree_map(
        name_strategy(),
        (
            prop::collection::vec(name_strategy(), 0..4),
            any::<bool>(),
        ),
        0..5,
    )
    .prop_map(move |entities| {
        let layout = Layout::new("/repo");
        entities
            .into_iter()
            .map(|(name, (projects, tests))| {
                let test_projects: Vec<String> = if tests {
                    projects.iter().map(|p| format!("{p}.UnitTests")).collect()
                } else {
                    Vec::new()
                };
                GeneratedEntity::new(name.clone(), layout.entity_dir(category, &name))
                    .with_projects(projects)
                    .with_test_projects(test_projects)
            })
            .collect()
    })
}

fn snapshot_strategy() -> impl Strategy<Value = StructureSnapshot> {
    (
        entities_strategy(Category::Service),
        entities_strategy(Category::Component),
        entities_strategy(Category::WebApp),
    )
        .prop_map(|(services, components, web_apps)| StructureSnapshot {
            services,
            components,
            web_apps,
        })
}

proptest! {
    #[test]
    fn no_op_reconciliation_is_identity(previous in snapshot_strategy()) {
        let outcome = reconcile(Some(&previous), no_op_result(&previous)).unwrap();

        prop_assert_eq!(&outcome.snapshot, &previous);
        prop_assert!(outcome.added.is_empty());
        prop_assert!(outcome.removed.is_empty());
        prop_assert_eq!(outcome.unchanged.len(), previous.entity_count());
    }

    #[test]
    fn first_run_adds_everything(result in snapshot_strategy()) {
        let outcome = reconcile(None, result.clone()).unwrap();

        prop_assert_eq!(outcome.added.len(), result.entity_count());
        prop_assert!(outcome.removed.is_empty());
        prop_assert!(outcome.unchanged.is_empty());
        prop_assert_eq!(outcome.snapshot, result);
    }

    #[test]
    fn dropped_entities_are_removed(previous in snapshot_strategy(), keep in any::<prop::sample::Index>()) {
        prop_assume!(!previous.services.is_empty());
        let dropped = keep.index(previous.services.len());

        let mut result = no_op_result(&previous);
        let gone = result.services.remove(dropped);

        let outcome = reconcile(Some(&previous), result).unwrap();

        prop_assert_eq!(outcome.removed.len(), 1);
        prop_assert_eq!(&outcome.removed[0].name, &gone.name);
        prop_assert!(outcome.snapshot.services.iter().all(|e| e.key() != gone.key()));
    }

    #[test]
    fn rendering_is_deterministic(previous in snapshot_strategy()) {
        let desired = DesiredStructure {
            services: previous
                .services
                .iter()
                .map(|e| {
                    let projects: Vec<&str> = e.projects.iter().map(String::as_str).collect();
                    solution(&e.name, &projects, !e.test_projects.is_empty())
                })
                .collect(),
            ..DesiredStructure::default()
        };

        let first = render(&desired, Some(&previous), &layout());
        let second = render(&desired, Some(&previous), &layout());
        prop_assert_eq!(first.to_text(), second.to_text());
    }
}
