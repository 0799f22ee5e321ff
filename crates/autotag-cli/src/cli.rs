//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// autotag - Keep folder-based tags in a managed block at the end of each note
#[derive(Parser, Debug)]
#[command(name = "autotag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Vault root (defaults to the nearest directory holding .autotag.toml)
    #[arg(long, global = true, env = "AUTOTAG_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of discovery
    #[arg(short, long, global = true, env = "AUTOTAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a default .autotag.toml into the vault root
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Tag a newly created document
    ///
    /// Examples:
    ///   autotag created Inbox/Untitled.md
    Created {
        /// Vault-relative path of the new document
        path: String,
    },

    /// Re-tag a document after it moved
    ///
    /// The document must already be at its new path.
    ///
    /// Examples:
    ///   autotag renamed Inbox/idea.md Projects/Alpha/idea.md
    Renamed {
        /// Previous vault-relative path
        from: String,
        /// New vault-relative path
        to: String,
    },

    /// Reconcile the tag block of every document in the vault
    Apply {
        /// Preview changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report documents whose tag block is out of date
    ///
    /// Exits with a non-zero status when any document would change.
    Check {
        /// Output as JSON for CI integration
        #[arg(long)]
        json: bool,
    },

    /// Show the tags a document would carry
    Resolve {
        /// Vault-relative path, existing or not
        path: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Manage folder rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   autotag completions bash > ~/.local/share/bash-completion/completions/autotag
    ///   autotag completions zsh > ~/.zfunc/_autotag
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Rule actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RulesAction {
    /// List effective rules in their textual form
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Add a structured rule to the config file
    ///
    /// Examples:
    ///   autotag rules add Projects/Alpha --tags "alpha, work"
    Add {
        /// Vault-relative folder
        folder: String,

        /// Tags separated by spaces or commas
        #[arg(short, long)]
        tags: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["autotag"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_renamed_command() {
        let cli = Cli::parse_from(["autotag", "renamed", "a.md", "B/a.md"]);
        assert_eq!(
            cli.command,
            Some(Commands::Renamed {
                from: "a.md".into(),
                to: "B/a.md".into()
            })
        );
    }

    #[test]
    fn parse_apply_with_flags() {
        let cli = Cli::parse_from(["autotag", "apply", "--dry-run", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Apply {
                dry_run: true,
                json: true
            })
        );
    }

    #[test]
    fn parse_global_options_after_command() {
        let cli = Cli::parse_from(["autotag", "check", "--root", "/vault", "-v"]);
        assert_eq!(cli.root, Some(PathBuf::from("/vault")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_rules_add() {
        let cli = Cli::parse_from(["autotag", "rules", "add", "A", "--tags", "x, y"]);
        match cli.command {
            Some(Commands::Rules {
                action: RulesAction::Add { folder, tags },
            }) => {
                assert_eq!(folder, "A");
                assert_eq!(tags, "x, y");
            }
            _ => panic!("Expected rules add command"),
        }
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["autotag", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
