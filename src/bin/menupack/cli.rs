//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use menupack::core::layout::RAW_BASE_ENV;

/// menupack - package index builder for toolbar/menu export trees
#[derive(Parser)]
#[command(name = "menupack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Repository root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the package index, audit report and shims
    Build(BuildArgs),

    /// Write shims for unresolved script targets only
    Shims(ShimsArgs),

    /// Write placeholder icons for missing icon targets only
    Icons(IconsArgs),

    /// List the references of export files and how they resolve
    Refs(RefsArgs),

    /// Check the repository root layout
    Check(CheckArgs),

    /// Label core resources with a classification strategy
    Classify(ClassifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Base URL for source entries
    #[arg(long, env = RAW_BASE_ENV)]
    pub raw_base: Option<String>,

    /// Index output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Audit report path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Resolve without writing shims
    #[arg(long)]
    pub no_shims: bool,

    /// Print the build summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShimsArgs {
    /// Decide shims without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct IconsArgs {
    /// Decide placeholders without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RefsArgs {
    /// Only this export file (repository-relative)
    pub file: Option<String>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Required root folder (repeatable; defaults to the standard set)
    #[arg(long = "require", value_name = "DIR")]
    pub required: Vec<String>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Strategy id (overrides `[classify] strategy`)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Only files under this directory
    #[arg(long, value_name = "DIR")]
    pub under: Option<String>,

    /// List available strategies and exit
    #[arg(long)]
    pub list: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
