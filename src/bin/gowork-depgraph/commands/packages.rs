//! `gowork-depgraph packages` command

use anyhow::{bail, Result};

use super::{compute_report, format_map, GlobalOpts};
use crate::cli::PackagesArgs;

pub fn execute(args: PackagesArgs, global: &GlobalOpts) -> Result<()> {
    let report = compute_report(&args.root, global)?;

    print!("{}", format_map(report.packages(), args.format)?);

    if args.strict && !report.warnings().is_empty() {
        bail!(
            "{} warning(s) emitted while scanning packages (--strict)",
            report.warnings().len()
        );
    }

    Ok(())
}
