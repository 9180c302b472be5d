//! Diff renderer: desired structure vs. prior snapshot, as an annotated tree.
//!
//! Rendering is a pure function. Inputs are borrowed read-only and the result
//! is a [`StructureDiff`] value that callers can turn into text, coloured
//! terminal lines, or a summary. Entities are matched by [`EntityKey`], the
//! same `(name, directory)` key the reconciler uses, with desired directories
//! resolved through [`Layout`].
//!
//! Ordering follows declaration order for desired entities, then snapshot
//! order for entities that are only in the snapshot. Nothing is sorted.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::desired::{DesiredStructure, SolutionSpec, WebAppSpec};
use crate::domain::entities::snapshot::{GeneratedEntity, StructureSnapshot};
use crate::domain::value_objects::{Category, EntityKey, Layout};

/// Notice appended when a prior snapshot existed and nothing differs.
pub const NO_CHANGES_NOTICE: &str = "No changes detected compared to previous structure.";

/// Placeholder child shown under every web app.
pub const WEB_FILES_PLACEHOLDER: &str = "[web files generated via template]";

const DEVOPS_SECTION: &str = "DevOps/";

// ── Change / nodes ───────────────────────────────────────────────────────────

/// State of a single rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Unchanged,
    Added,
    Removed,
}

impl Change {
    /// Text marker placed before the node label.
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Unchanged => "",
            Self::Added => "[+] ",
            Self::Removed => "[-] ",
        }
    }

    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    fn for_presence(present_before: bool) -> Self {
        if present_before {
            Self::Unchanged
        } else {
            Self::Added
        }
    }
}

/// One node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffNode {
    pub label: String,
    pub change: Change,
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    pub fn new(label: impl Into<String>, change: Change) -> Self {
        Self {
            label: label.into(),
            change,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DiffNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node or anything below it is added or removed.
    pub fn has_changes(&self) -> bool {
        self.change.is_change() || self.children.iter().any(DiffNode::has_changes)
    }

    fn push_lines(&self, prefix: &str, last: bool, out: &mut Vec<DiffLine>) {
        let connector = if last { "└── " } else { "├── " };
        out.push(DiffLine {
            text: format!("{prefix}{connector}{}{}", self.change.marker(), self.label),
            change: self.change,
            header: false,
        });

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.push_lines(&child_prefix, i + 1 == count, out);
        }
    }
}

/// A top-level group of the tree (`Services/`, `Components/`, `Web/`, `DevOps/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSection {
    pub title: String,
    /// Informational sections are shown but never count as changes.
    pub informational: bool,
    pub nodes: Vec<DiffNode>,
}

impl DiffSection {
    fn has_changes(&self) -> bool {
        !self.informational && self.nodes.iter().any(DiffNode::has_changes)
    }
}

/// A rendered line with the change it represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub text: String,
    pub change: Change,
    /// Section titles.
    pub header: bool,
}

/// Entity-level counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    /// Entities that exist on both sides but have added or removed children.
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to add, {} to remove, {} to modify, {} unchanged",
            self.added, self.removed, self.modified, self.unchanged
        )
    }
}

// ── StructureDiff ────────────────────────────────────────────────────────────

/// The rendered comparison between a desired structure and a prior snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDiff {
    sections: Vec<DiffSection>,
    had_previous: bool,
}

impl StructureDiff {
    pub fn sections(&self) -> &[DiffSection] {
        &self.sections
    }

    /// Whether anything outside informational sections is added or removed.
    pub fn has_changes(&self) -> bool {
        self.sections.iter().any(DiffSection::has_changes)
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for node in self
            .sections
            .iter()
            .filter(|s| !s.informational)
            .flat_map(|s| s.nodes.iter())
        {
            match node.change {
                Change::Added => summary.added += 1,
                Change::Removed => summary.removed += 1,
                Change::Unchanged if node.has_changes() => summary.modified += 1,
                Change::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// Tree lines with connectors and markers, one per node.
    pub fn lines(&self) -> Vec<DiffLine> {
        let mut out = Vec::new();
        for section in &self.sections {
            out.push(DiffLine {
                text: section.title.clone(),
                change: Change::Unchanged,
                header: true,
            });
            let count = section.nodes.len();
            for (i, node) in section.nodes.iter().enumerate() {
                node.push_lines("", i + 1 == count, &mut out);
            }
        }
        out
    }

    /// Whether the "no changes" notice belongs after the tree.
    pub fn shows_no_changes_notice(&self) -> bool {
        self.had_previous && !self.has_changes()
    }

    /// Plain text rendering, markers included, no colour.
    pub fn to_text(&self) -> String {
        let mut text = self
            .lines()
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");

        if self.shows_no_changes_notice() {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(NO_CHANGES_NOTICE);
        }
        text
    }
}

impl fmt::Display for StructureDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Render the desired structure against the prior snapshot.
///
/// `previous == None` is the first-run case: every entity is added and no
/// "no changes" notice is ever shown.
pub fn render(
    desired: &DesiredStructure,
    previous: Option<&StructureSnapshot>,
    layout: &Layout,
) -> StructureDiff {
    let mut sections = Vec::new();

    for category in Category::ALL {
        let nodes = match category {
            Category::WebApp => render_web_apps(&desired.web, previous, layout),
            _ => render_solutions(category, desired.solutions(category), previous, layout),
        };
        if nodes.is_empty() {
            continue;
        }
        sections.push(DiffSection {
            title: format!("{}/", category.folder()),
            informational: false,
            nodes,
        });
    }

    if !desired.devops.pipelines.is_empty() {
        sections.push(DiffSection {
            title: DEVOPS_SECTION.to_string(),
            informational: true,
            nodes: desired
                .devops
                .pipelines
                .iter()
                .map(|p| DiffNode::new(p.as_str(), Change::Unchanged))
                .collect(),
        });
    }

    StructureDiff {
        sections,
        had_previous: previous.is_some(),
    }
}

/// Snapshot entities whose key is not among the desired keys, in snapshot order.
fn removed_entities<'a>(
    previous: Option<&'a StructureSnapshot>,
    category: Category,
    desired_keys: &'a HashSet<EntityKey>,
) -> impl Iterator<Item = &'a GeneratedEntity> {
    previous
        .map(|p| p.entities(category))
        .unwrap_or_default()
        .iter()
        .filter(move |e| !desired_keys.contains(&e.key()))
}

fn render_solutions(
    category: Category,
    specs: &[SolutionSpec],
    previous: Option<&StructureSnapshot>,
    layout: &Layout,
) -> Vec<DiffNode> {
    let mut desired_keys = HashSet::new();
    let mut nodes = Vec::new();

    for spec in specs {
        let key = layout.key(category, &spec.name);
        nodes.push(solution_node(spec, previous.and_then(|p| p.find(category, &key))));
        desired_keys.insert(key);
    }

    nodes.extend(removed_entities(previous, category, &desired_keys).map(removed_solution_node));
    nodes
}

/// A desired solution. `prior == None` means the whole subtree is new.
fn solution_node(spec: &SolutionSpec, prior: Option<&GeneratedEntity>) -> DiffNode {
    let new_entity = prior.is_none();
    let root = Change::for_presence(!new_entity);
    let recorded_projects = prior.map(|e| e.projects.as_slice()).unwrap_or_default();
    let recorded_tests = prior
        .map(|e| e.test_projects.as_slice())
        .unwrap_or_default();

    // A known entity with no recorded projects never had its solution created.
    let scaffold = Change::for_presence(!new_entity && !recorded_projects.is_empty());

    let mut children = vec![DiffNode::new(
        format!("{}.sln", spec.solution_file_stem()),
        scaffold,
    )];

    let desired_projects: Vec<&str> = spec.project_names().collect();
    children.push(
        DiffNode::new("src/", scaffold).with_children(diff_names(
            &desired_projects,
            recorded_projects,
            new_entity,
        )),
    );

    if spec.generates_tests() {
        let expected = spec.expected_test_projects();
        let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
        let tests = Change::for_presence(!new_entity && !recorded_tests.is_empty());
        children.push(DiffNode::new("tests/", tests).with_children(diff_names(
            &expected,
            recorded_tests,
            new_entity,
        )));
    }

    DiffNode::new(format!("{}/", spec.name), root).with_children(children)
}

/// Desired names first (added or unchanged), then recorded names no longer desired.
fn diff_names(desired: &[&str], recorded: &[String], all_new: bool) -> Vec<DiffNode> {
    let mut nodes: Vec<DiffNode> = desired
        .iter()
        .map(|name| {
            let known = !all_new && recorded.iter().any(|r| r == name);
            DiffNode::new(format!("{name}/"), Change::for_presence(known))
        })
        .collect();

    nodes.extend(
        recorded
            .iter()
            .filter(|r| !desired.contains(&r.as_str()))
            .map(|r| DiffNode::new(format!("{r}/"), Change::Removed)),
    );
    nodes
}

/// An entity only the snapshot knows about, rebuilt from its recorded lists.
fn removed_solution_node(entity: &GeneratedEntity) -> DiffNode {
    let removed = |label: String| DiffNode::new(label, Change::Removed);

    let mut children = vec![
        removed(format!("{}.sln", entity.name)),
        removed("src/".to_string()).with_children(
            entity
                .projects
                .iter()
                .map(|p| removed(format!("{p}/")))
                .collect(),
        ),
    ];

    if !entity.test_projects.is_empty() {
        children.push(
            removed("tests/".to_string()).with_children(
                entity
                    .test_projects
                    .iter()
                    .map(|t| removed(format!("{t}/")))
                    .collect(),
            ),
        );
    }

    removed(format!("{}/", entity.name)).with_children(children)
}

fn render_web_apps(
    specs: &[WebAppSpec],
    previous: Option<&StructureSnapshot>,
    layout: &Layout,
) -> Vec<DiffNode> {
    let mut desired_keys = HashSet::new();
    let mut nodes = Vec::new();

    for spec in specs {
        let key = layout.key(Category::WebApp, &spec.name);
        let recorded = previous.and_then(|p| p.find(Category::WebApp, &key));
        nodes.push(web_node(&spec.name, Change::for_presence(recorded.is_some())));
        desired_keys.insert(key);
    }

    nodes.extend(
        removed_entities(previous, Category::WebApp, &desired_keys)
            .map(|e| web_node(&e.name, Change::Removed)),
    );
    nodes
}

fn web_node(name: &str, change: Change) -> DiffNode {
    DiffNode::new(format!("{name}/"), change)
        .with_children(vec![DiffNode::new(WEB_FILES_PLACEHOLDER, change)])
}
