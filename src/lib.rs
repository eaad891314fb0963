//! patreon-dl option resolution.
//!
//! This library merges the options of a patreon-dl run from three sources
//! and validates them into a single [`Options`] value:
//!
//! - Command-line arguments
//! - An INI config file
//! - An optional targets file listing URLs with per-target include overrides
//!
//! Every raw value remembers where it came from, so validation errors name
//! the flag, config key or targets-file line that produced them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use patreon_dl_config::{config::RawOptions, load_options};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cli = RawOptions::default();
//!     let options = load_options(&cli, Some(Path::new("patreon-dl.conf")))?;
//!     for target in &options.targets {
//!         println!("{}", target.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

// Re-exports for convenience
pub use config::{load_options, resolve_options, Options, TargetEntry};
pub use error::{Error, Result};
