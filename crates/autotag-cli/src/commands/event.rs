//! Created and renamed event commands

use autotag_core::{DocumentEvent, EventOutcome};
use colored::Colorize;

use crate::context::Vault;
use crate::error::Result;

pub fn run_created(vault: &Vault, path: &str) -> Result<()> {
    let event = DocumentEvent::created(vault.relative(path));
    handle(vault, &event)
}

pub fn run_renamed(vault: &Vault, from: &str, to: &str) -> Result<()> {
    let event = DocumentEvent::renamed(vault.relative(from), vault.relative(to));
    handle(vault, &event)
}

fn handle(vault: &Vault, event: &DocumentEvent) -> Result<()> {
    let mut tagger = vault.tagger()?;

    match tagger.handle(event)? {
        EventOutcome::Skipped { path } => {
            println!(
                "{} {} (extension not configured)",
                "SKIP".yellow().bold(),
                path.cyan()
            );
        }
        EventOutcome::Tagged(outcome) => {
            if let Some(from) = &outcome.renamed_from {
                println!(
                    "   {} {} -> {}",
                    "~".blue(),
                    from.dimmed(),
                    outcome.path.cyan()
                );
            }
            if outcome.written {
                println!(
                    "{} {} {}: {}",
                    "OK".green().bold(),
                    outcome.action,
                    outcome.path.cyan(),
                    outcome.tags
                );
            } else {
                println!(
                    "{} {} is already tagged.",
                    "OK".green().bold(),
                    outcome.path.cyan()
                );
            }
        }
    }

    Ok(())
}
