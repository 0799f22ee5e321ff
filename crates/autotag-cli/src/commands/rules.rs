//! Rule listing and editing

use autotag_core::{Rule, Settings};
use autotag_fs::ConfigStore;
use colored::Colorize;

use crate::context::Vault;
use crate::error::{CliError, Result};

/// Print effective rules, structured and file-based, in textual form.
pub fn run_rules_list(vault: &Vault, json: bool) -> Result<()> {
    let settings = vault.settings()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings.rules)?);
        return Ok(());
    }

    if settings.rules.is_empty() {
        println!("{}", "No rules configured.".dimmed());
        return Ok(());
    }
    for rule in &settings.rules {
        if rule.is_active() {
            println!("{}", rule);
        } else {
            println!("{} {}", rule, "(root folder, never matches)".yellow());
        }
    }
    Ok(())
}

/// Append a structured rule to the config file.
///
/// Only the config file's own rules are rewritten; rules from `rules_file`
/// stay in their file.
pub fn run_rules_add(vault: &Vault, folder: &str, tags: &str) -> Result<()> {
    let rule = Rule::from_tag_string(folder, tags);
    if !rule.is_active() {
        return Err(CliError::user(
            "A rule for the vault root would never match. Name a folder.",
        ));
    }
    if rule.tags.is_empty() {
        return Err(CliError::user("A rule needs at least one tag."));
    }

    let path = vault.config_path();
    let store = ConfigStore::new();
    let mut settings: Settings = store.load_or_default(&path)?;
    settings.rules.push(rule.clone());
    store.save(&path, &settings)?;

    println!("{} Added rule {}", "OK".green().bold(), rule.to_string().cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_add_rule_keeps_rules_file_separate() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".autotag.toml"),
            "rules_file = \"rules.txt\"\n",
        )
        .unwrap();
        fs::write(temp.path().join("rules.txt"), "Daily => journal\n").unwrap();
        let vault = Vault::resolve(temp.path(), None, None);

        run_rules_add(&vault, "Projects/Alpha", "#alpha, work").unwrap();

        let raw: Settings = ConfigStore::new().load(&vault.config_path()).unwrap();
        assert_eq!(raw.rules, vec![Rule::new("Projects/Alpha", ["#alpha", "work"])]);
        assert_eq!(vault.settings().unwrap().rules.len(), 2);
    }

    #[test]
    fn test_add_rule_without_config_file() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::resolve(temp.path(), None, None);

        run_rules_add(&vault, "Daily", "journal").unwrap();

        let settings = vault.settings().unwrap();
        assert_eq!(settings.rules, vec![Rule::new("Daily", ["journal"])]);
        assert_eq!(settings.marker, Settings::default().marker);
    }

    #[test]
    fn test_add_rule_rejects_root() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::resolve(temp.path(), None, None);

        assert!(run_rules_add(&vault, "/", "x").is_err());
        assert!(run_rules_add(&vault, "A", " , ").is_err());
    }
}
