//! Filesystem abstraction for autotag
//!
//! Provides forward-slash path handling, locked text I/O and settings files
//! whose format follows their extension.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
