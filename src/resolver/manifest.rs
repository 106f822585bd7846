//! Manifest resolution: one `go.mod` per workspace member.

use crate::core::manifest::{ModFile, MODULE_MANIFEST};
use crate::core::{Module, NameRegistry, Workspace};
use crate::resolver::errors::{DepGraphError, Phase};
use crate::util::fs::normalize_dependency;

/// Read every member's manifest, register its module path and collect its
/// raw dependency specifiers.
///
/// Requires come first, then replacement targets, each in declaration order.
/// A replace that restates a require shows up twice; the module graph
/// collapses the duplicate edge.
pub fn resolve_manifests(
    workspace: &Workspace,
    registry: &mut NameRegistry,
) -> Result<Vec<Module>, DepGraphError> {
    let mut modules = Vec::with_capacity(workspace.members().len());

    for member in workspace.members() {
        let phase = || Phase::ResolveManifest {
            module: member.clone(),
        };
        let path = workspace.member_dir(member).join(MODULE_MANIFEST);

        let text = std::fs::read_to_string(&path).map_err(|source| DepGraphError::Read {
            phase: phase(),
            path: path.clone(),
            source,
        })?;

        let mod_file = ModFile::parse(&path.display().to_string(), &text).map_err(|source| {
            DepGraphError::Parse {
                phase: phase(),
                path: path.clone(),
                source: Box::new(source),
            }
        })?;

        registry
            .insert(member, &mod_file.module)
            .map_err(|source| DepGraphError::Registry {
                phase: phase(),
                source,
            })?;

        let mut module = Module::new(member.as_str(), mod_file.module.as_str());
        for require in &mod_file.requires {
            module.push_dependency(normalize_dependency(workspace.root(), member, &require.path));
        }
        for replace in &mod_file.replaces {
            module.push_dependency(normalize_dependency(
                workspace.root(),
                member,
                &replace.new_path,
            ));
        }

        tracing::debug!(
            "module {} is {} ({} dependency specifiers)",
            member,
            module.canonical_name(),
            module.dependencies().len()
        );
        modules.push(module);
    }

    Ok(modules)
}
