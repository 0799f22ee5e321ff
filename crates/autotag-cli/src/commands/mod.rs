//! Command implementations for autotag-cli

pub mod event;
pub mod init;
pub mod resolve;
pub mod rules;
pub mod sync;

pub use event::{run_created, run_renamed};
pub use init::run_init;
pub use resolve::run_resolve;
pub use rules::{run_rules_add, run_rules_list};
pub use sync::{run_apply, run_check};
