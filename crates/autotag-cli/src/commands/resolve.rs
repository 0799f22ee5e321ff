//! Resolve command implementation

use autotag_core::DocumentStore;
use colored::Colorize;

use crate::context::Vault;
use crate::error::Result;

/// Print the tags a document would carry.
///
/// Existing documents are previewed exactly as `apply` would treat them.
/// For a path with no document yet, only rule tags are shown.
pub fn run_resolve(vault: &Vault, path: &str, json: bool) -> Result<()> {
    let tagger = vault.tagger()?;
    let path = vault.relative(path);

    let (tags, action) = if tagger.store().exists(&path) {
        let outcome = tagger.preview(&path)?;
        (outcome.tags, Some(outcome.action))
    } else {
        (tagger.tags_for(&path, None, None), None)
    };

    let matched: Vec<String> = tagger
        .settings()
        .resolver()
        .matching(&path)
        .map(ToString::to_string)
        .collect();

    if json {
        let value = serde_json::json!({
            "path": path,
            "tags": tags,
            "rules": matched,
            "action": action.map(|a| a.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", "=>".blue().bold(), path.cyan());
    if matched.is_empty() {
        println!("   {}", "no matching rules".dimmed());
    }
    for rule in &matched {
        println!("   {} {}", "rule".dimmed(), rule);
    }
    if tags.is_empty() {
        println!("   {}", "no tags".dimmed());
    } else {
        println!("   {} {}", "tags".dimmed(), tags.to_string().green());
    }
    if let Some(action) = action {
        println!("   {} {}", "block".dimmed(), action);
    }

    Ok(())
}
