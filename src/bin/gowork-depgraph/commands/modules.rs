//! `gowork-depgraph modules` command

use anyhow::Result;

use super::{compute_report, format_map, GlobalOpts};
use crate::cli::ModulesArgs;

pub fn execute(args: ModulesArgs, global: &GlobalOpts) -> Result<()> {
    let report = compute_report(&args.root, global)?;

    print!("{}", format_map(report.modules(), args.format)?);
    Ok(())
}
