//! gowork-depgraph CLI - dependency graphs for Go workspaces

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::GlobalOpts;
use gowork_depgraph::resolver::DepGraphError;
use gowork_depgraph::util::diagnostic::emit;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        report_error(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gowork_depgraph=debug")
    } else {
        EnvFilter::new("gowork_depgraph=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalOpts {
        config: cli.config,
        color,
    };

    match cli.command {
        Commands::Packages(args) => commands::packages::execute(args, &global),
        Commands::Modules(args) => commands::modules::execute(args, &global),
        Commands::Fingerprint(args) => commands::fingerprint::execute(args, &global),
    }
}

fn report_error(err: &anyhow::Error, color: bool) {
    let Some(depgraph_err) = err.downcast_ref::<DepGraphError>() else {
        eprintln!("error: {:#}", err);
        return;
    };

    emit(&depgraph_err.to_diagnostic(), color);

    if let DepGraphError::Parse { source, .. } = depgraph_err {
        let handler = if color {
            GraphicalReportHandler::new()
        } else {
            GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        };
        let mut rendered = String::new();
        if handler
            .render_report(&mut rendered, &**source)
            .is_ok()
        {
            eprint!("{}", rendered);
        }
    }
}
