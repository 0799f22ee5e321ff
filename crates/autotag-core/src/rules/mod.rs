//! Folder rules
//!
//! A rule maps a vault folder to the tags every document under it carries.
//! Rules are supplied wholesale on each resolution; nothing here holds
//! state between calls.

mod resolver;
mod rule;
mod text;

pub use resolver::{FolderMatcher, ImmediateChildren, Recursive, Resolution, RuleResolver, resolve};
pub use rule::Rule;
pub use text::{format_rules, parse_rules};
