//! Command implementations

pub mod fingerprint;
pub mod modules;
pub mod packages;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use gowork_depgraph::util::diagnostic::emit;
use gowork_depgraph::{compute_dependency_graph, Config, DependencyReport};

/// Options shared by every command.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub color: bool,
}

/// Compute the report for `root`, printing collected warnings to stderr.
pub fn compute_report(root: &Path, global: &GlobalOpts) -> Result<DependencyReport> {
    let config = match &global.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(root)?,
    };

    let report = compute_dependency_graph(root, &config)?;
    for warning in report.warnings() {
        emit(warning, global.color);
    }
    Ok(report)
}

/// Render a dependency map in the requested format.
pub fn format_map(map: &BTreeMap<String, Vec<String>>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(map).context("failed to serialize dependency map")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(format_tree(map)),
    }
}

fn format_tree(map: &BTreeMap<String, Vec<String>>) -> String {
    let mut output = String::new();
    for (node, deps) in map {
        let _ = writeln!(output, "{}", node);
        for (i, dep) in deps.iter().enumerate() {
            let branch = if i + 1 == deps.len() { "└── " } else { "├── " };
            let _ = writeln!(output, "{}{}", branch, dep);
        }
    }
    output
}
