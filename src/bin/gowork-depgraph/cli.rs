//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// gowork-depgraph - package dependency graphs for Go workspaces
#[derive(Parser)]
#[command(name = "gowork-depgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of <ROOT>/.depgraph.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dependencies between workspace-local packages
    Packages(PackagesArgs),

    /// Print the dependencies between workspace member modules
    Modules(ModulesArgs),

    /// Print a fingerprint of everything the graphs are computed from
    Fingerprint(FingerprintArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tree
    #[default]
    Text,
    /// JSON object
    Json,
}

#[derive(Args)]
pub struct PackagesArgs {
    /// Workspace root containing go.work
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail if any warnings were emitted
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ModulesArgs {
    /// Workspace root containing go.work
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct FingerprintArgs {
    /// Workspace root containing go.work
    #[arg(default_value = ".")]
    pub root: PathBuf,
}
