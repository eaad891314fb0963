//! Configuration module for patreon-dl.
//!
//! This module handles:
//! - Provenance-tagged raw values from the command line, config file and
//!   targets file
//! - Value validation
//! - Targets file parsing
//! - Merging every source into one validated [`Options`]

pub mod include;
pub mod loader;
pub mod options;
pub mod resolve;
pub mod source;
pub mod targets;
pub mod validation;
pub mod values;

pub use include::{resolve_include_options, IncludeEntries, IncludeField, IncludeOptions};
pub use loader::{default_config_path, load_config_file, ConfigFile};
pub use options::{
    ConsoleLoggerOptions, DirNameFormat, EmbedDownloader, FileExistsActions, FileLoggerOptions,
    FilenameFormat, LogLineIncludes, Options, RawOptions, RequestOptions,
};
pub use resolve::{load_options, resolve_options};
pub use source::{first_defined, OptionEntry, Origin};
pub use targets::{parse_targets, parse_targets_str, read_targets_file, TargetEntry};
pub use values::{
    ConfigEnum, ContentMedia, FileExistsAction, LogFileExistsAction, LogLevel, PostsInTier,
    PostsWithMediaType, PreviewMedia,
};
