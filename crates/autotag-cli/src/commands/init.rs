//! Init command implementation

use autotag_core::Settings;
use autotag_fs::ConfigStore;
use colored::Colorize;

use crate::context::Vault;
use crate::error::{CliError, Result};

/// Write a default config file for the vault.
pub fn run_init(vault: &Vault, force: bool) -> Result<()> {
    let path = vault.config_path();
    match ConfigStore::new().create(&path, &Settings::default(), force) {
        Err(autotag_fs::Error::ConfigExists { .. }) => {
            return Err(CliError::user(format!(
                "{} already exists. Use --force to overwrite it.",
                path
            )));
        }
        result => result?,
    }

    println!("{} Wrote {}", "OK".green().bold(), path.to_string().cyan());
    println!(
        "Add rules with {}.",
        "autotag rules add <folder> --tags <tags>".cyan()
    );
    Ok(())
}
