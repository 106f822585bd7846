//! Filesystem and path utilities.
//!
//! Everything here except [`read_to_string`] is lexical: paths are joined and
//! collapsed without touching the filesystem, so the results are stable for
//! workspaces that only exist on paper (and in tests).

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Returns true if `dep` is written relative to the module declaring it.
pub fn is_relative_dependency(dep: &str) -> bool {
    dep.starts_with("./") || dep.starts_with("../")
}

/// Collapse `.` and `..` components lexically.
///
/// `..` directly under the filesystem root is dropped; leading `..` of a
/// relative path is kept. An empty result is `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Render `target` relative to `root` in the workspace's `./x/y` form.
///
/// The root itself is `.`. Targets outside the root come back as `../x`.
pub fn workspace_relative(root: &Path, target: &Path) -> String {
    let root = clean_path(root);
    let target = clean_path(target);

    let relative = match target.strip_prefix(&root) {
        Ok(rest) => rest.to_path_buf(),
        Err(_) => match pathdiff::diff_paths(&target, &root) {
            Some(diff) => diff,
            None => return target.to_string_lossy().replace('\\', "/"),
        },
    };

    if relative.as_os_str().is_empty() || relative == Path::new(".") {
        return ".".to_string();
    }

    let escapes = matches!(relative.components().next(), Some(Component::ParentDir));
    let joined = to_slash(&relative);
    if escapes {
        joined
    } else {
        format!("./{}", joined)
    }
}

/// Convert a dependency declared by `module` into a workspace-relative path.
///
/// Strings that are not in `./` or `../` form are returned unchanged; they are
/// module paths and get resolved through the name registry later.
pub fn normalize_dependency(root: &Path, module: &str, dep: &str) -> String {
    if !is_relative_dependency(dep) {
        return dep.to_string();
    }

    let module_dir = root.join(module);
    workspace_relative(root, &module_dir.join(dep))
}

/// Normalize a workspace member path as written in the workspace manifest.
///
/// `lib`, `./lib` and `./lib/` all become `./lib`.
pub fn normalize_member_path(root: &Path, raw: &str) -> String {
    let path = Path::new(raw);
    if path.is_absolute() {
        workspace_relative(root, path)
    } else {
        workspace_relative(root, &root.join(path))
    }
}

/// Local path of a package: the module's local path joined with a `/`-separated
/// sub-directory. An empty sub-directory is the module root itself.
pub fn join_local_path(module: &str, sub_dir: &str) -> String {
    if sub_dir.is_empty() {
        module.to_string()
    } else if module == "." {
        format!("./{}", sub_dir)
    } else {
        format!("{}/{}", module.trim_end_matches('/'), sub_dir)
    }
}

/// Join the components of a relative path with `/` regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
