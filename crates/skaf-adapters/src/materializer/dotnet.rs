//! Materializer backed by the `dotnet` CLI and a shell for web apps.
//!
//! Every step is idempotent on disk: solutions, projects and web apps are
//! only created when their file or directory is missing. The returned snapshot
//! lists only what this call created, so an entity that already existed comes
//! back with empty project lists and the reconciler restores them.
//!
//! A failing external command is logged and the run continues; the project it
//! was meant to create is simply not reported as created.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use skaf_core::{
    application::ports::{CommandRunner, CommandSpec, Filesystem, Materializer},
    domain::{
        Category, DesiredStructure, EntityKey, GeneratedEntity, Layout, ProjectSpec,
        SolutionSpec, StructureSnapshot, WebAppSpec, test_project_name,
    },
    error::SkafResult,
};

use super::csproj;

/// Executables the materializer shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub dotnet: String,
    pub shell: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            dotnet: "dotnet".into(),
            shell: "/bin/bash".into(),
        }
    }
}

/// Creates .NET solutions with `dotnet new` and web apps with shell commands.
#[derive(Debug, Clone)]
pub struct DotnetMaterializer<F, R> {
    fs: F,
    runner: R,
    tools: ToolPaths,
}

impl<F, R> DotnetMaterializer<F, R>
where
    F: Filesystem,
    R: CommandRunner,
{
    pub fn new(fs: F, runner: R) -> Self {
        Self::with_tools(fs, runner, ToolPaths::default())
    }

    pub fn with_tools(fs: F, runner: R, tools: ToolPaths) -> Self {
        Self { fs, runner, tools }
    }

    // ── Solutions ────────────────────────────────────────────────────────────

    #[instrument(skip_all, fields(entity = %spec.name))]
    fn materialize_solution(
        &self,
        spec: &SolutionSpec,
        root: &Path,
        prior: Option<&GeneratedEntity>,
    ) -> SkafResult<GeneratedEntity> {
        let src = root.join("src");
        self.fs.create_dir_all(&src)?;

        let stem = spec.solution_file_stem();
        if !self.fs.exists(&root.join(format!("{stem}.sln"))) {
            self.run(
                self.dotnet()
                    .args(["new", "sln", "-n", stem])
                    .current_dir(root),
            );
        }

        let desired: Vec<String> = spec.project_names().map(str::to_string).collect();
        if let Some(prior) = prior {
            self.remove_stale(&src, &prior.projects, &desired);
        }

        let mut created = Vec::new();
        for project in &spec.src.projects {
            if self.fs.exists(&src.join(&project.name)) {
                continue;
            }
            let namespace = qualified(&spec.src.namespace, &project.name);
            if self.create_project(root, &src, &project.name, &project.template, project, &namespace) {
                self.add_packages(&src, project);
                created.push(project.name.clone());
            }
        }

        let mut created_tests = Vec::new();
        if let Some(tests) = spec.tests.as_ref().filter(|t| t.generate_for_each_project) {
            let tests_dir = root.join("tests");
            self.fs.create_dir_all(&tests_dir)?;

            let expected = spec.expected_test_projects();
            if let Some(prior) = prior {
                self.remove_stale(&tests_dir, &prior.test_projects, &expected);
            }

            let template = tests.template.as_deref().unwrap_or_default();
            let base = tests
                .namespace
                .as_deref()
                .filter(|ns| !ns.trim().is_empty())
                .unwrap_or(spec.src.namespace.as_str());

            for project in &spec.src.projects {
                let name = test_project_name(&project.name);
                if self.fs.exists(&tests_dir.join(&name)) {
                    continue;
                }
                let namespace = qualified(base, &name);
                if self.create_project(root, &tests_dir, &name, template, project, &namespace) {
                    created_tests.push(name);
                }
            }
        }

        debug!(
            projects = created.len(),
            test_projects = created_tests.len(),
            "Solution materialized"
        );
        Ok(GeneratedEntity::new(spec.name.clone(), root)
            .with_projects(created)
            .with_test_projects(created_tests))
    }

    /// `dotnet new`, namespace patch, `dotnet sln add`. False when `dotnet new` failed.
    fn create_project(
        &self,
        root: &Path,
        parent: &Path,
        name: &str,
        template: &str,
        project: &ProjectSpec,
        namespace: &str,
    ) -> bool {
        let mut new = self.dotnet().args(["new", template, "-n", name]);
        if !project.version.trim().is_empty() {
            new = new.args(["-f", project.version.as_str()]);
        }
        if !self.run(new.current_dir(parent)) {
            return false;
        }

        let csproj_path = parent.join(name).join(format!("{name}.csproj"));
        self.patch_namespace(&csproj_path, namespace);

        self.run(
            self.dotnet()
                .args(["sln", "add"])
                .arg(csproj_path.display().to_string())
                .current_dir(root),
        );
        info!(project = name, "Project created");
        true
    }

    fn add_packages(&self, src: &Path, project: &ProjectSpec) {
        let csproj_path = src.join(&project.name).join(format!("{}.csproj", project.name));
        for package in &project.packages {
            let mut add = self
                .dotnet()
                .arg("add")
                .arg(csproj_path.display().to_string())
                .args(["package", package.name.as_str()]);
            if let Some(version) = package.version.as_deref().filter(|v| !v.trim().is_empty()) {
                add = add.args(["-v", version]);
            }
            self.run(add);
        }
    }

    fn patch_namespace(&self, csproj_path: &Path, namespace: &str) {
        let original = match self.fs.read_to_string(csproj_path) {
            Ok(original) => original,
            Err(e) => {
                warn!(path = %csproj_path.display(), error = %e, "Cannot patch namespace");
                return;
            }
        };

        match csproj::set_namespace(&original, namespace) {
            Some(patched) => {
                if let Err(e) = self.fs.write_file(csproj_path, &patched) {
                    warn!(path = %csproj_path.display(), error = %e, "Cannot patch namespace");
                }
            }
            None => warn!(path = %csproj_path.display(), "No <Project> element, namespace not set"),
        }
    }

    /// Delete directories of recorded names that are no longer desired.
    fn remove_stale(&self, parent: &Path, recorded: &[String], desired: &[String]) {
        let desired: HashSet<String> = desired.iter().map(|d| d.to_lowercase()).collect();
        for name in recorded.iter().filter(|r| !desired.contains(&r.to_lowercase())) {
            self.remove_dir(&parent.join(name));
        }
    }

    // ── Web apps ─────────────────────────────────────────────────────────────

    #[instrument(skip_all, fields(web_app = %spec.name))]
    fn materialize_web_app(&self, spec: &WebAppSpec, dir: &Path) -> SkafResult<GeneratedEntity> {
        if self.fs.exists(dir) {
            debug!("Web app already present");
            return Ok(GeneratedEntity::new(spec.name.clone(), dir));
        }

        self.fs.create_dir_all(dir)?;
        let commands = std::iter::once(spec.command.as_str())
            .chain(spec.post_create.iter().map(String::as_str))
            .filter(|c| !c.trim().is_empty());
        for command in commands {
            self.run(
                CommandSpec::new(self.tools.shell.as_str())
                    .args(["-c", command])
                    .current_dir(dir),
            );
        }

        info!("Web app created");
        Ok(GeneratedEntity::new(spec.name.clone(), dir))
    }

    // ── Shared ───────────────────────────────────────────────────────────────

    fn remove_absent(&self, recorded: &[GeneratedEntity], desired: &HashSet<EntityKey>) {
        for entity in recorded.iter().filter(|e| !desired.contains(&e.key())) {
            self.remove_dir(&entity.directory);
        }
    }

    fn remove_dir(&self, dir: &Path) {
        if !self.fs.exists(dir) {
            return;
        }
        match self.fs.remove_dir_all(dir) {
            Ok(()) => info!(path = %dir.display(), "Removed directory"),
            Err(e) => warn!(path = %dir.display(), error = %e, "Failed to remove directory"),
        }
    }

    fn dotnet(&self) -> CommandSpec {
        CommandSpec::new(self.tools.dotnet.as_str())
    }

    /// Run a command. Failures are logged, never propagated.
    fn run(&self, command: CommandSpec) -> bool {
        match self.runner.run(&command) {
            Ok(output) if output.success => {
                debug!(command = %command, "Command succeeded");
                true
            }
            Ok(output) => {
                warn!(
                    command = %command,
                    code = ?output.code,
                    stderr = %output.stderr.trim(),
                    "Command failed"
                );
                false
            }
            Err(e) => {
                warn!(command = %command, error = %e, "Command could not run");
                false
            }
        }
    }
}

impl<F, R> Materializer for DotnetMaterializer<F, R>
where
    F: Filesystem,
    R: CommandRunner,
{
    #[instrument(skip_all, fields(base_dir = %layout.base_dir().display()))]
    fn materialize(
        &self,
        desired: &DesiredStructure,
        previous: Option<&StructureSnapshot>,
        layout: &Layout,
    ) -> SkafResult<StructureSnapshot> {
        let mut result = StructureSnapshot::new();

        for category in [Category::Service, Category::Component] {
            let recorded = previous.map(|p| p.entities(category)).unwrap_or_default();
            let mut keys = HashSet::new();

            for spec in desired.solutions(category) {
                let key = layout.key(category, &spec.name);
                let prior = previous.and_then(|p| p.find(category, &key));
                let entity = self.materialize_solution(spec, &key.directory, prior)?;
                result.entities_mut(category).push(entity);
                keys.insert(key);
            }

            self.remove_absent(recorded, &keys);
        }

        let recorded = previous
            .map(|p| p.entities(Category::WebApp))
            .unwrap_or_default();
        let mut keys = HashSet::new();
        for spec in &desired.web {
            let key = layout.key(Category::WebApp, &spec.name);
            let entity = self.materialize_web_app(spec, &key.directory)?;
            result.web_apps.push(entity);
            keys.insert(key);
        }
        self.remove_absent(recorded, &keys);

        Ok(result)
    }
}

/// `Namespace.Name`, or just `Name` when there is no namespace.
fn qualified(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim().trim_end_matches('.');
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
