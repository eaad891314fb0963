//! Config file loading.
//!
//! The config file is INI-style. Each option lives under a section and a
//! dot-separated key; values may be wrapped in double quotes:
//!
//! ```ini
//! [downloader]
//! target.url = "https://www.patreon.com/johndoe/posts"
//!
//! [output]
//! out.dir = /downloads
//! content.file.exists.action = skip
//!
//! [logger.file.main]
//! log.dir = /downloads/logs
//!
//! [embed.downloader.youtube]
//! provider = youtube
//! exec = yt-dlp -o "{dest.dir}/%(title)s.%(ext)s" "{embed.url}"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use ini::{Ini, ParseOption};
use tracing::debug;

use crate::config::include::{IncludeEntries, IncludeField};
use crate::config::options::{
    RawDirNameFormat, RawEmbedDownloader, RawFileExistsActions, RawFileLoggerOptions,
    RawFilenameFormat, RawLoggerOptions, RawOptions, RawRequestOptions,
};
use crate::config::source::{OptionEntry, Origin};
use crate::error::{Error, Result};

/// File name looked up in the platform config directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "patreon-dl.conf";

/// Section prefix declaring a file logger.
pub const FILE_LOGGER_SECTION_PREFIX: &str = "logger.file.";

/// Section prefix declaring an embedded downloader.
pub const EMBED_DOWNLOADER_SECTION_PREFIX: &str = "embed.downloader.";

const CONSOLE_LOGGER_SECTION: &str = "logger.console";

/// `(section, key)` locations of the fixed options.
mod keys {
    pub type Key = (&'static str, &'static str);

    pub const TARGET_URL: Key = ("downloader", "target.url");
    pub const COOKIE: Key = ("downloader", "cookie");
    pub const USE_STATUS_CACHE: Key = ("downloader", "use.status.cache");
    pub const NO_PROMPT: Key = ("downloader", "no.prompt");
    pub const PATH_TO_FFMPEG: Key = ("downloader", "path.to.ffmpeg");

    pub const OUT_DIR: Key = ("output", "out.dir");
    pub const CAMPAIGN_DIR_NAME_FORMAT: Key = ("output", "campaign.dir.name.format");
    pub const CONTENT_DIR_NAME_FORMAT: Key = ("output", "content.dir.name.format");
    pub const MEDIA_FILENAME_FORMAT: Key = ("output", "media.filename.format");
    pub const CONTENT_FILE_EXISTS_ACTION: Key = ("output", "content.file.exists.action");
    pub const INFO_FILE_EXISTS_ACTION: Key = ("output", "info.file.exists.action");
    pub const INFO_API_FILE_EXISTS_ACTION: Key = ("output", "info.api.file.exists.action");

    pub const INCLUDE_SECTION: &str = "include";

    pub const MAX_RETRIES: Key = ("request", "max.retries");
    pub const MAX_CONCURRENT: Key = ("request", "max.concurrent");
    pub const MIN_TIME: Key = ("request", "min.time");
}

/// A parsed config file.
#[derive(Debug)]
pub struct ConfigFile {
    ini: Ini,
}

impl ConfigFile {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse config file content held in memory.
    pub fn parse_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<memory>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // Quotes and escapes are left alone: values such as Windows paths
        // must come through verbatim.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        // A leading byte-order mark would otherwise hide the first section.
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let ini = Ini::load_from_str_opt(content, options).map_err(|e| Error::ConfigFileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { ini })
    }

    /// Look up a value, trimming it and stripping surrounding double quotes.
    /// Empty values count as unset.
    pub fn entry(&self, section: &str, key: &str) -> Option<OptionEntry> {
        let raw = self.ini.get_from(Some(section), key)?.trim();
        let value = raw
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(raw);
        if value.is_empty() {
            return None;
        }
        Some(OptionEntry::new(Origin::config_file(section, key), value))
    }

    fn get(&self, (section, key): keys::Key) -> Option<OptionEntry> {
        self.entry(section, key)
    }

    /// Names of sections starting with `prefix`, in file order, without
    /// duplicates.
    pub fn sections_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.ini.sections().flatten() {
            if name.starts_with(prefix) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    fn logger_options(&self, section: &str) -> RawLoggerOptions {
        RawLoggerOptions {
            enabled: self.entry(section, "enabled"),
            log_level: self.entry(section, "log.level"),
            include_date_time: self.entry(section, "include.date.time"),
            include_level: self.entry(section, "include.level"),
            include_originator: self.entry(section, "include.originator"),
            include_error_stack: self.entry(section, "include.error.stack"),
            date_time_format: self.entry(section, "date.time.format"),
            color: self.entry(section, "color"),
        }
    }

    fn include_entries(&self) -> IncludeEntries {
        let mut include = IncludeEntries::default();
        for field in IncludeField::ALL {
            include.set(field, self.entry(keys::INCLUDE_SECTION, field.config_key()));
        }
        include
    }

    fn file_loggers(&self) -> Vec<RawFileLoggerOptions> {
        self.sections_with_prefix(FILE_LOGGER_SECTION_PREFIX)
            .into_iter()
            .map(|section| RawFileLoggerOptions {
                common: self.logger_options(&section),
                log_dir: self.entry(&section, "log.dir"),
                log_filename: self.entry(&section, "log.filename"),
                file_exists_action: self.entry(&section, "file.exists.action"),
                section,
            })
            .collect()
    }

    fn embed_downloaders(&self) -> Vec<RawEmbedDownloader> {
        self.sections_with_prefix(EMBED_DOWNLOADER_SECTION_PREFIX)
            .into_iter()
            .map(|section| RawEmbedDownloader {
                provider: self.entry(&section, "provider"),
                exec: self.entry(&section, "exec"),
                section,
            })
            .collect()
    }

    /// Map the file onto the option structure, tagging every value with its
    /// section and key.
    pub fn to_raw_options(&self) -> RawOptions {
        RawOptions {
            target_urls: self.get(keys::TARGET_URL),
            cookie: self.get(keys::COOKIE),
            use_status_cache: self.get(keys::USE_STATUS_CACHE),
            no_prompt: self.get(keys::NO_PROMPT),
            path_to_ffmpeg: self.get(keys::PATH_TO_FFMPEG),
            out_dir: self.get(keys::OUT_DIR),
            dir_name_format: RawDirNameFormat {
                campaign: self.get(keys::CAMPAIGN_DIR_NAME_FORMAT),
                content: self.get(keys::CONTENT_DIR_NAME_FORMAT),
            },
            filename_format: RawFilenameFormat {
                media: self.get(keys::MEDIA_FILENAME_FORMAT),
            },
            include: self.include_entries(),
            request: RawRequestOptions {
                max_retries: self.get(keys::MAX_RETRIES),
                max_concurrent: self.get(keys::MAX_CONCURRENT),
                min_time: self.get(keys::MIN_TIME),
            },
            file_exists_action: RawFileExistsActions {
                content: self.get(keys::CONTENT_FILE_EXISTS_ACTION),
                info: self.get(keys::INFO_FILE_EXISTS_ACTION),
                info_api: self.get(keys::INFO_API_FILE_EXISTS_ACTION),
            },
            console_logger: self.logger_options(CONSOLE_LOGGER_SECTION),
            file_loggers: self.file_loggers(),
            embed_downloaders: self.embed_downloaders(),
        }
    }
}

/// Platform-specific default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "patreon-dl")
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILENAME))
}

/// Load config file options.
///
/// An explicit path must be readable. Without one, the default location is
/// used if a file exists there; otherwise there is no config file.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<RawOptions>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => path,
            None => {
                debug!("No config file");
                return Ok(None);
            }
        },
    };

    debug!(path = %path.display(), "Loading config file");
    Ok(Some(ConfigFile::load(&path)?.to_raw_options()))
}
