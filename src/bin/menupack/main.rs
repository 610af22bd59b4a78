//! menupack CLI - package index builder for toolbar/menu export trees

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use menupack::classify::ClassifyError;
use menupack::resolver::ResolveError;
use menupack::util::diagnostic::emit;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        if let Some(err) = e.downcast_ref::<ResolveError>() {
            emit(&err.to_diagnostic(), color);
        } else if let Some(err) = e.downcast_ref::<ClassifyError>() {
            emit(&err.to_diagnostic(), color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("menupack=debug")
    } else {
        EnvFilter::new("menupack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let root = cli.root;

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &root),
        Commands::Shims(args) => commands::shims::execute(args, &root),
        Commands::Icons(args) => commands::icons::execute(args, &root),
        Commands::Refs(args) => commands::refs::execute(args, &root),
        Commands::Check(args) => commands::check::execute(args, &root, color),
        Commands::Classify(args) => commands::classify::execute(args, &root),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
