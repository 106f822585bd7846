//! Package extraction: source directories of one module become packages.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::manifest::MODULE_MANIFEST;
use crate::core::{Module, NameRegistry, Package, Workspace};
use crate::sources::imports::scan_imports;
use crate::util::config::Config;
use crate::util::diagnostic::Diagnostic;
use crate::util::fs::{join_local_path, to_slash};

/// Discover the packages of `module`, register their names and collect their
/// imports.
///
/// Unreadable directories, unreadable or unscannable files and name conflicts
/// are pushed onto `warnings`; the walk carries on without them.
pub fn extract_packages(
    workspace: &Workspace,
    module: &Module,
    config: &Config,
    registry: &mut NameRegistry,
    warnings: &mut Vec<Diagnostic>,
) -> Vec<Package> {
    let module_dir = workspace.member_dir(module.local_path());
    let source_dirs = collect_source_dirs(&module_dir, config, warnings);

    let mut packages = Vec::with_capacity(source_dirs.len());
    for (sub_dir, files) in source_dirs {
        let local_path = join_local_path(module.local_path(), &sub_dir);
        let canonical_name = if sub_dir.is_empty() {
            module.canonical_name().to_string()
        } else {
            format!("{}/{}", module.canonical_name(), sub_dir)
        };

        if let Err(err) = registry.insert(&local_path, &canonical_name) {
            tracing::warn!("{}: {}", local_path, err);
            warnings.push(
                Diagnostic::warning(format!(
                    "package `{}` cannot be resolved as an import target",
                    canonical_name
                ))
                .with_location(module_dir.join(&sub_dir))
                .with_context(err.to_string()),
            );
        }

        let mut package = Package::new(local_path, canonical_name, module.local_path());
        for file in files {
            read_imports(&file, &mut package, warnings);
            package.add_file(file);
        }

        tracing::debug!(
            "package {} ({} files, {} imports)",
            package.canonical_name(),
            package.files().count(),
            package.imports().len()
        );
        packages.push(package);
    }

    packages
}

fn read_imports(file: &Path, package: &mut Package, warnings: &mut Vec<Diagnostic>) {
    let src = match std::fs::read_to_string(file) {
        Ok(src) => src,
        Err(err) => {
            tracing::warn!("failed to read {}: {}", file.display(), err);
            warnings.push(
                Diagnostic::warning("skipped unreadable source file")
                    .with_location(file)
                    .with_context(err.to_string()),
            );
            return;
        }
    };

    match scan_imports(&src) {
        Ok(imports) => {
            for literal in &imports {
                package.push_import(literal);
            }
        }
        Err(err) => {
            tracing::warn!("failed to scan imports of {}: {}", file.display(), err);
            warnings.push(
                Diagnostic::warning("skipped source file with unreadable imports")
                    .with_location(file)
                    .with_context(err.to_string()),
            );
        }
    }
}

/// Source files of a module grouped by `/`-separated sub-directory (empty for
/// the module root), both levels sorted.
fn collect_source_dirs(
    module_dir: &Path,
    config: &Config,
    warnings: &mut Vec<Diagnostic>,
) -> BTreeMap<String, Vec<PathBuf>> {
    let mut dirs: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut revisited: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(module_dir)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, config, &mut visited, &mut revisited));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let location = err.path().unwrap_or(module_dir).to_path_buf();
                tracing::warn!("failed to walk {}: {}", location.display(), err);
                let message = if err.loop_ancestor().is_some() {
                    "skipped symbolic link loop"
                } else {
                    "skipped unreadable directory entry"
                };
                warnings.push(
                    Diagnostic::warning(message)
                        .with_location(location)
                        .with_context(err.to_string()),
                );
                continue;
            }
        };

        if !config.is_source_file(entry.path()) {
            continue;
        }
        if entry.path_is_symlink() && !config.follow_symlinks {
            tracing::debug!("not following symlinked source {}", entry.path().display());
            warnings.push(
                Diagnostic::warning("skipped symlinked source file")
                    .with_location(entry.path())
                    .with_context("set `follow-symlinks = true` to read it"),
            );
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let sub_dir = entry
            .path()
            .parent()
            .and_then(|dir| dir.strip_prefix(module_dir).ok())
            .map(to_slash)
            .unwrap_or_default();
        dirs.entry(sub_dir).or_default().push(entry.into_path());
    }

    for dir in revisited {
        warnings.push(
            Diagnostic::warning("skipped directory reached twice through symbolic links")
                .with_location(dir),
        );
    }

    dirs
}

fn keep_entry(
    entry: &DirEntry,
    config: &Config,
    visited: &mut HashSet<PathBuf>,
    revisited: &mut Vec<PathBuf>,
) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }

    if entry.depth() > 0 {
        let name = entry.file_name().to_string_lossy();
        if config.is_ignored_dir(&name) {
            return false;
        }
        if entry.path().join(MODULE_MANIFEST).is_file() {
            tracing::debug!("skipping nested module {}", entry.path().display());
            return false;
        }
    }

    // Without a canonical path the walk itself reports the failure.
    let Ok(canonical) = entry.path().canonicalize() else {
        return true;
    };
    if visited.insert(canonical) {
        true
    } else {
        revisited.push(entry.path().to_path_buf());
        false
    }
}
