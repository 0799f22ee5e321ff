//! autotag CLI
//!
//! Applies folder rules to the managed tag block of documents in a vault.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands, RulesAction};
use context::Vault;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Folder-based tags for plain-text notes", "autotag".green().bold());
        println!();
        println!("Run {} for available commands.", "autotag --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let vault = Vault::resolve(&cwd, cli.root, cli.config);
    execute_command(&vault, command)
}

fn execute_command(vault: &Vault, command: Commands) -> Result<()> {
    match command {
        Commands::Init { force } => commands::run_init(vault, force),
        Commands::Created { path } => commands::run_created(vault, &path),
        Commands::Renamed { from, to } => commands::run_renamed(vault, &from, &to),
        Commands::Apply { dry_run, json } => commands::run_apply(vault, dry_run, json),
        Commands::Check { json } => commands::run_check(vault, json),
        Commands::Resolve { path, json } => commands::run_resolve(vault, &path, json),
        Commands::Rules { action } => match action {
            RulesAction::List { json } => commands::run_rules_list(vault, json),
            RulesAction::Add { folder, tags } => commands::run_rules_add(vault, &folder, &tags),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "autotag", &mut std::io::stdout());
            Ok(())
        }
    }
}
