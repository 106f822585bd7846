//! Dependency graph computation for a whole workspace.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::core::{Module, NameRegistry, Package, Workspace};
use crate::resolver::{resolve_manifests, DepGraphError, ModuleGraph, PackageGraph};
use crate::sources::extract_packages;
use crate::util::config::Config;
use crate::util::diagnostic::Diagnostic;
use crate::util::hash::Fingerprint;

/// Result of a dependency graph computation.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyReport {
    members: Vec<String>,

    /// Member local path -> local paths of the members it depends on
    modules: BTreeMap<String, Vec<String>>,

    /// Canonical package name -> canonical names of the workspace-local
    /// packages it imports
    packages: BTreeMap<String, Vec<String>>,

    #[serde(skip)]
    warnings: Vec<Diagnostic>,

    #[serde(skip)]
    fingerprint: String,
}

impl DependencyReport {
    /// Workspace members in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Module dependency map. Members without member dependencies are absent.
    pub fn modules(&self) -> &BTreeMap<String, Vec<String>> {
        &self.modules
    }

    /// Package dependency map. Every discovered package has a key.
    pub fn packages(&self) -> &BTreeMap<String, Vec<String>> {
        &self.packages
    }

    /// Non-fatal problems hit along the way.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Hex SHA-256 over everything the maps were computed from. Equal
    /// fingerprints mean equal maps.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Compute the module and package dependency graphs of the workspace at `root`.
///
/// Manifest problems and module-level dependency conflicts abort the run.
/// Everything found while walking sources is reported through
/// [`DependencyReport::warnings`] instead.
pub fn compute_dependency_graph(
    root: &Path,
    config: &Config,
) -> Result<DependencyReport, DepGraphError> {
    let workspace = Workspace::load(root)?;
    tracing::info!(
        "Loaded workspace {} ({} members, go {})",
        workspace.manifest_path().display(),
        workspace.members().len(),
        workspace.go_version().unwrap_or("unset")
    );

    let mut registry = NameRegistry::new();
    let modules = resolve_manifests(&workspace, &mut registry)?;
    let module_graph = ModuleGraph::build(&modules, &registry, config.relative_fallback)?;

    let mut warnings = Vec::new();
    let mut packages = Vec::new();
    for member in module_graph.members() {
        let Some(module) = modules.iter().find(|m| m.local_path() == member) else {
            continue;
        };
        packages.extend(extract_packages(
            &workspace,
            module,
            config,
            &mut registry,
            &mut warnings,
        ));
    }
    tracing::info!(
        "Found {} packages in {} modules",
        packages.len(),
        modules.len()
    );

    let package_graph = PackageGraph::build(&packages, &registry, &mut warnings);
    if !warnings.is_empty() {
        tracing::info!("Finished with {} warnings", warnings.len());
    }

    Ok(DependencyReport {
        members: module_graph.members().to_vec(),
        modules: module_graph.to_map(),
        packages: package_graph.to_map(&registry),
        warnings,
        fingerprint: fingerprint(&modules, &packages, &registry, config),
    })
}

fn fingerprint(
    modules: &[Module],
    packages: &[Package],
    registry: &NameRegistry,
    config: &Config,
) -> String {
    let mut fp = Fingerprint::new();

    fp.update_str(&config.extension)
        .update_bool(config.include_tests)
        .update_bool(config.follow_symlinks)
        .update_list(config.ignored_dirs.iter().map(String::as_str))
        .update_str(config.relative_fallback.as_str());

    fp.update_list(modules.iter().map(Module::local_path));
    for module in modules {
        fp.update_str(module.canonical_name())
            .update_list(module.dependencies().iter().map(String::as_str));
    }

    fp.update_list(packages.iter().map(Package::local_path));
    for package in packages {
        fp.update_str(package.canonical_name())
            .update_list(package.imports().iter().map(String::as_str));
    }

    // Registered names decide which imports resolve, conflicts included.
    for (local, canonical) in registry.iter() {
        fp.update_str(local).update_str(canonical);
    }

    fp.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::GraphError;
    use crate::test_support::WorkspaceFixture;
    use crate::util::config::RelativeFallback;

    fn service_workspace() -> WorkspaceFixture {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["./svc", "./lib"])
            .module("svc", "example.com/svc", &["example.com/lib"])
            .module("lib", "example.com/lib", &[])
            .go_file("svc/main.go", "main", &["fmt", "example.com/svc/handler"])
            .go_file(
                "svc/handler/handler.go",
                "handler",
                &["net/http", "example.com/lib/util"],
            )
            .go_file("lib/util/util.go", "util", &["strings"]);
        fixture
    }

    fn map(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_service_and_library() {
        let fixture = service_workspace();
        let report = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();

        assert_eq!(report.members(), ["./svc", "./lib"]);
        assert_eq!(report.modules(), &map(&[("./svc", &["./lib"])]));
        assert_eq!(
            report.packages(),
            &map(&[
                ("example.com/lib/util", &[]),
                ("example.com/svc", &["example.com/svc/handler"]),
                ("example.com/svc/handler", &["example.com/lib/util"]),
            ])
        );
        assert!(report.warnings().is_empty());
        assert_eq!(report.fingerprint().len(), 64);
    }

    #[test]
    fn test_repeated_runs_agree() {
        let fixture = service_workspace();
        let first = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();
        let second = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();

        assert_eq!(first.modules(), second.modules());
        assert_eq!(first.packages(), second.packages());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn test_independent_members_have_no_edges() {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["./a", "./b"])
            .module("a", "example.com/a", &["golang.org/x/sync"])
            .module("b", "example.com/b", &[])
            .go_file("a/a.go", "a", &["golang.org/x/sync/errgroup"])
            .go_file("b/b.go", "b", &["os"])
            .go_file("b/sub/sub.go", "sub", &[]);

        let report = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();
        assert!(report.modules().is_empty());
        assert_eq!(report.packages().len(), 3);
        assert!(report.packages().values().all(Vec::is_empty));
    }

    #[test]
    fn test_relative_replace_links_members() {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["./svc", "./lib"])
            .file(
                "svc/go.mod",
                "module example.com/svc\n\ngo 1.22\n\nreplace example.com/old => ../lib\nreplace example.com/ext => ../../outside\n",
            )
            .module("lib", "example.com/lib", &[]);

        let report = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();
        assert_eq!(report.modules(), &map(&[("./svc", &["./lib"])]));

        let literal = Config {
            relative_fallback: RelativeFallback::Literal,
            ..Config::default()
        };
        let report = compute_dependency_graph(fixture.root(), &literal).unwrap();
        assert_eq!(
            report.modules(),
            &map(&[("./svc", &["../outside", "./lib"])])
        );
    }

    #[test]
    fn test_broken_source_file_is_not_fatal() {
        let fixture = service_workspace();
        fixture.file("svc/handler/broken.go", "package handler\n\nimport (\n");

        let report = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].is_warning());
        assert_eq!(
            report.packages()["example.com/svc/handler"],
            vec!["example.com/lib/util"]
        );
    }

    #[test]
    fn test_missing_member_is_fatal() {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["./svc", "./gone"])
            .module("svc", "example.com/svc", &[]);

        let err = compute_dependency_graph(fixture.root(), &Config::default()).unwrap_err();
        assert!(matches!(err, DepGraphError::Read { .. }));
    }

    #[test]
    fn test_module_cycle_is_fatal() {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["./a", "./b"])
            .module("a", "example.com/a", &["example.com/b"])
            .module("b", "example.com/b", &["example.com/a"]);

        let err = compute_dependency_graph(fixture.root(), &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            DepGraphError::Edge {
                source: GraphError::Cycle { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_fingerprint_follows_imports_and_config() {
        let fixture = service_workspace();
        let before = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();

        let with_tests = Config {
            include_tests: true,
            ..Config::default()
        };
        let other_config = compute_dependency_graph(fixture.root(), &with_tests).unwrap();
        assert_ne!(before.fingerprint(), other_config.fingerprint());

        fixture.go_file("lib/util/util.go", "util", &["strings", "sort"]);
        let after = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();
        assert_eq!(before.packages(), after.packages());
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn test_json_holds_only_the_maps() {
        let fixture = service_workspace();
        let report = compute_dependency_graph(fixture.root(), &Config::default()).unwrap();

        let value = serde_json::to_value(&report).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["members", "modules", "packages"]);
        assert_eq!(value["modules"]["./svc"][0], "./lib");
    }
}
