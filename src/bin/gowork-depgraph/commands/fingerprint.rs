//! `gowork-depgraph fingerprint` command

use anyhow::Result;

use super::{compute_report, GlobalOpts};
use crate::cli::FingerprintArgs;

pub fn execute(args: FingerprintArgs, global: &GlobalOpts) -> Result<()> {
    let report = compute_report(&args.root, global)?;

    println!("{}", report.fingerprint());
    Ok(())
}
