//! agentdocs CLI - Generate and check agent definition documentation
//!
//! Usage:
//!   agentdocs init [dir]                       - Scaffold a new catalog
//!   agentdocs render [--check] [--prune]       - Generate Markdown pages
//!   agentdocs lint [--deny-warnings]           - Run consistency checks
//!   agentdocs list [--status s] [--type t]     - List agents
//!   agentdocs show <name>                      - Resolved view of one agent
//!   agentdocs check access <name> <path>       - Evaluate declared scope
//!   agentdocs import <page.md>...              - Convert pages back to YAML

use clap::{Parser, Subcommand};
use cli::commands::{
    CheckCommand, ImportCommand, InitCommand, LintCommand, ListCommand, RenderCommand, ShowCommand,
};
use cli::project::Context;
use shared::CONFIG_FILE_NAME;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "agentdocs")]
#[command(about = "agentdocs - Agent definition catalog generator and linter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the project config
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new agentdocs project
    Init(InitCommand),
    /// Render agent pages and the catalog index
    Render(RenderCommand),
    /// Check definitions for consistency
    Lint(LintCommand),
    /// List agents
    List(ListCommand),
    /// Show an agent with inheritance applied
    Show(ShowCommand),
    /// Evaluate declared scope and delegation
    Check(CheckCommand),
    /// Import rendered pages as YAML definitions
    Import(ImportCommand),
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context {
        config_path: cli.config,
        json: cli.json,
    };

    match cli.command {
        Commands::Init(cmd) => cmd.run(),
        Commands::Render(cmd) => cmd.run(&ctx),
        Commands::Lint(cmd) => cmd.run(&ctx),
        Commands::List(cmd) => cmd.run(&ctx),
        Commands::Show(cmd) => cmd.run(&ctx),
        Commands::Check(cmd) => cmd.run(&ctx),
        Commands::Import(cmd) => cmd.run(&ctx),
    }
}
