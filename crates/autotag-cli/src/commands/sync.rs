//! Apply and check command implementations
//!
//! Both reconcile every document in the vault; `check` never writes.

use autotag_core::{SyncOptions, SyncReport};
use colored::Colorize;

use crate::context::Vault;
use crate::error::{CliError, Result};

/// Run the apply command
pub fn run_apply(vault: &Vault, dry_run: bool, json: bool) -> Result<()> {
    if !json {
        println!("{} Tagging documents in {}...", "=>".blue().bold(), vault.root);
    }

    let mut tagger = vault.tagger()?;
    let report = tagger.apply_all(&SyncOptions { dry_run })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} document(s) could not be tagged",
            report.errors.len()
        )))
    }
}

/// Run the check command
pub fn run_check(vault: &Vault, json: bool) -> Result<()> {
    let mut tagger = vault.tagger()?;
    let report = tagger.apply_all(&SyncOptions { dry_run: true })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_current() {
        println!("{} All tag blocks are current.", "OK".green().bold());
    } else {
        if !report.changed.is_empty() {
            println!("{} Out of date:", "STALE".yellow().bold());
            for outcome in &report.changed {
                println!(
                    "   {} {} ({})",
                    "!".yellow(),
                    outcome.path.cyan(),
                    outcome.action.to_string().dimmed()
                );
            }
        }
        print_errors(&report);
        println!();
        println!("Run {} to update.", "autotag apply".cyan());
    }

    if report.is_current() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} document(s) out of date, {} failed",
            report.changed.len(),
            report.errors.len()
        )))
    }
}

fn print_report(report: &SyncReport) {
    let verb = if report.dry_run { "Would update" } else { "Updated" };

    if report.changed.is_empty() && report.errors.is_empty() {
        println!("{} Already tagged. No changes needed.", "OK".green().bold());
    } else if !report.changed.is_empty() {
        println!("{} {}:", "OK".green().bold(), verb);
        for outcome in &report.changed {
            println!(
                "   {} {} ({}): {}",
                "+".green(),
                outcome.path.cyan(),
                outcome.action.to_string().dimmed(),
                outcome.tags
            );
        }
    }
    print_errors(report);

    println!(
        "   {} changed, {} unchanged, {} skipped",
        report.changed.len(),
        report.unchanged,
        report.skipped
    );
}

fn print_errors(report: &SyncReport) {
    for error in &report.errors {
        eprintln!("{} {}: {}", "error".red().bold(), error.path, error.message);
    }
}
