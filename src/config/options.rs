//! Raw and resolved option structures.

use serde::Serialize;

use crate::config::include::{IncludeEntries, IncludeOptions};
use crate::config::source::OptionEntry;
use crate::config::targets::TargetEntry;
use crate::config::values::{FileExistsAction, LogFileExistsAction, LogLevel};

/// Unvalidated options from a single source, every leaf optional.
///
/// Produced by the command-line front end and by the config file loader.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub target_urls: Option<OptionEntry>,
    pub cookie: Option<OptionEntry>,
    pub use_status_cache: Option<OptionEntry>,
    pub no_prompt: Option<OptionEntry>,
    pub path_to_ffmpeg: Option<OptionEntry>,
    pub out_dir: Option<OptionEntry>,
    pub dir_name_format: RawDirNameFormat,
    pub filename_format: RawFilenameFormat,
    pub include: IncludeEntries,
    pub request: RawRequestOptions,
    pub file_exists_action: RawFileExistsActions,
    pub console_logger: RawLoggerOptions,
    /// Only the config file declares file loggers.
    pub file_loggers: Vec<RawFileLoggerOptions>,
    /// Only the config file declares embedded downloaders.
    pub embed_downloaders: Vec<RawEmbedDownloader>,
}

#[derive(Debug, Clone, Default)]
pub struct RawDirNameFormat {
    pub campaign: Option<OptionEntry>,
    pub content: Option<OptionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RawFilenameFormat {
    pub media: Option<OptionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RawRequestOptions {
    pub max_retries: Option<OptionEntry>,
    pub max_concurrent: Option<OptionEntry>,
    pub min_time: Option<OptionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RawFileExistsActions {
    pub content: Option<OptionEntry>,
    pub info: Option<OptionEntry>,
    pub info_api: Option<OptionEntry>,
}

/// Settings shared by the console logger and file loggers.
#[derive(Debug, Clone, Default)]
pub struct RawLoggerOptions {
    pub enabled: Option<OptionEntry>,
    pub log_level: Option<OptionEntry>,
    pub include_date_time: Option<OptionEntry>,
    pub include_level: Option<OptionEntry>,
    pub include_originator: Option<OptionEntry>,
    pub include_error_stack: Option<OptionEntry>,
    pub date_time_format: Option<OptionEntry>,
    pub color: Option<OptionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RawFileLoggerOptions {
    /// Config file section that declared this logger.
    pub section: String,
    pub common: RawLoggerOptions,
    pub log_dir: Option<OptionEntry>,
    pub log_filename: Option<OptionEntry>,
    pub file_exists_action: Option<OptionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RawEmbedDownloader {
    /// Config file section that declared this downloader.
    pub section: String,
    pub provider: Option<OptionEntry>,
    pub exec: Option<OptionEntry>,
}

/// Fully resolved and validated options handed to the downloader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Options {
    pub targets: Vec<TargetEntry>,
    #[serde(skip_serializing)]
    pub cookie: Option<String>,
    pub use_status_cache: bool,
    pub no_prompt: bool,
    pub path_to_ffmpeg: Option<String>,
    pub out_dir: String,
    pub dir_name_format: DirNameFormat,
    pub filename_format: FilenameFormat,
    pub include: IncludeOptions,
    pub request: RequestOptions,
    pub file_exists_action: FileExistsActions,
    pub embed_downloaders: Vec<EmbedDownloader>,
    pub console_logger: ConsoleLoggerOptions,
    pub file_loggers: Vec<FileLoggerOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirNameFormat {
    pub campaign: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameFormat {
    pub media: String,
}

/// Throttling parameters passed through to the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestOptions {
    pub max_retries: u32,
    pub max_concurrent: u32,
    /// Minimum spacing between requests, in milliseconds.
    pub min_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileExistsActions {
    pub content: FileExistsAction,
    pub info: FileExistsAction,
    pub info_api: FileExistsAction,
}

/// An external program used to download embedded media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedDownloader {
    pub provider: String,
    pub exec: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLineIncludes {
    pub date_time: bool,
    pub level: bool,
    pub originator: bool,
    pub error_stack: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleLoggerOptions {
    pub enabled: bool,
    pub log_level: LogLevel,
    pub include: LogLineIncludes,
    pub date_time_format: String,
    pub color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLoggerOptions {
    pub enabled: bool,
    pub log_dir: String,
    pub log_filename: String,
    pub file_exists_action: LogFileExistsAction,
    pub log_level: LogLevel,
    pub include: LogLineIncludes,
    pub date_time_format: String,
    pub color: bool,
}
