//! Command-line argument definitions using clap.
//!
//! Option values are kept as strings here; typing and validation happen in
//! [`crate::config`] so that errors can name the flag that produced them.

use clap::Parser;
use std::path::PathBuf;

use crate::config::options::{
    RawDirNameFormat, RawFileExistsActions, RawFilenameFormat, RawLoggerOptions, RawOptions,
    RawRequestOptions,
};
use crate::config::{IncludeEntries, IncludeField, OptionEntry};

/// patreon-dl option resolver CLI.
#[derive(Parser, Debug, Default)]
#[command(
    name = "patreon-dl-config",
    version,
    about = "Resolve and validate patreon-dl options",
    long_about = "Merges command-line options, the config file and the targets file into the \
                  effective patreon-dl configuration.\n\n\
                  TARGET is a URL, a comma-separated list of URLs, or the path to a targets file."
)]
pub struct Args {
    /// Target URL(s) or path to a targets file.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Path to the config file.
    #[arg(short = 'C', long, env = "PATREON_DL_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Cookie for accessing patron-only content.
    #[arg(short, long, env = "PATREON_DL_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Path to the FFmpeg executable.
    #[arg(short, long)]
    pub ffmpeg: Option<String>,

    /// Directory to save content to.
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Do not prompt for confirmation before downloading.
    #[arg(short = 'y', long)]
    pub no_prompt: bool,

    /// Skip targets already downloaded with the same configuration (true|false).
    #[arg(long, value_name = "BOOL")]
    pub use_status_cache: Option<String>,

    /// Format of campaign directory names.
    #[arg(long, value_name = "FORMAT")]
    pub campaign_dir_name_format: Option<String>,

    /// Format of content directory names.
    #[arg(long, value_name = "FORMAT")]
    pub content_dir_name_format: Option<String>,

    /// Format of media filenames.
    #[arg(long, value_name = "FORMAT")]
    pub media_filename_format: Option<String>,

    /// Action when a content file exists (overwrite|skip|saveAsCopy|saveAsCopyIfNewer).
    #[arg(long, value_name = "ACTION")]
    pub content_file_exists_action: Option<String>,

    /// Action when an info file exists.
    #[arg(long, value_name = "ACTION")]
    pub info_file_exists_action: Option<String>,

    /// Action when an API info file exists.
    #[arg(long, value_name = "ACTION")]
    pub info_api_file_exists_action: Option<String>,

    /// Include locked content (true|false).
    #[arg(long, value_name = "BOOL")]
    pub include_locked_content: Option<String>,

    /// Only posts with these media types (any|none|image,video,audio,attachment,podcast).
    #[arg(long, value_name = "TYPES")]
    pub include_posts_with_media_type: Option<String>,

    /// Only posts in these tiers (any|<tier id>,...).
    #[arg(long, value_name = "TIERS")]
    pub include_posts_in_tier: Option<String>,

    /// Save campaign info (true|false).
    #[arg(long, value_name = "BOOL")]
    pub include_campaign_info: Option<String>,

    /// Save content info (true|false).
    #[arg(long, value_name = "BOOL")]
    pub include_content_info: Option<String>,

    /// Preview media to download (true|false|lockedOnly|image,video,audio).
    #[arg(long, value_name = "VALUE")]
    pub include_preview_media: Option<String>,

    /// Content media to download (true|false|image,video,audio,attachment,file).
    #[arg(long, value_name = "VALUE")]
    pub include_content_media: Option<String>,

    /// Download every variant of each media item (true|false).
    #[arg(long, value_name = "BOOL")]
    pub include_all_media_variants: Option<String>,

    /// Maximum retries for failed requests.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<String>,

    /// Maximum concurrent requests.
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<String>,

    /// Minimum milliseconds between requests.
    #[arg(long, value_name = "MS")]
    pub min_time: Option<String>,

    /// Console log level (info|debug|warn|error).
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable console logging.
    #[arg(long)]
    pub no_console_log: bool,

    /// Disable colored console output.
    #[arg(long)]
    pub no_color: bool,

    /// Print the resolved options as JSON.
    #[arg(long)]
    pub print_config: bool,
}

/// Tag a set flag as an explicit value; an unset flag stays undefined.
fn switch(key: &str, set: bool, value: &str) -> Option<OptionEntry> {
    if set {
        OptionEntry::from_command_line(key, Some(value))
    } else {
        None
    }
}

impl Args {
    fn include_value(&self, field: IncludeField) -> Option<&String> {
        match field {
            IncludeField::LockedContent => self.include_locked_content.as_ref(),
            IncludeField::PostsWithMediaType => self.include_posts_with_media_type.as_ref(),
            IncludeField::PostsInTier => self.include_posts_in_tier.as_ref(),
            IncludeField::CampaignInfo => self.include_campaign_info.as_ref(),
            IncludeField::ContentInfo => self.include_content_info.as_ref(),
            IncludeField::PreviewMedia => self.include_preview_media.as_ref(),
            IncludeField::ContentMedia => self.include_content_media.as_ref(),
            IncludeField::AllMediaVariants => self.include_all_media_variants.as_ref(),
        }
    }

    /// Convert the parsed arguments into provenance-tagged raw options.
    pub fn to_raw_options(&self) -> RawOptions {
        let tag = |key: &str, value: &Option<String>| {
            OptionEntry::from_command_line(key, value.as_deref())
        };

        let mut include = IncludeEntries::default();
        for field in IncludeField::ALL {
            include.set(
                field,
                OptionEntry::from_command_line(&field.flag(), self.include_value(field)),
            );
        }

        RawOptions {
            target_urls: tag("TARGET", &self.target),
            cookie: tag("--cookie", &self.cookie),
            use_status_cache: tag("--use-status-cache", &self.use_status_cache),
            no_prompt: switch("--no-prompt", self.no_prompt, "true"),
            path_to_ffmpeg: tag("--ffmpeg", &self.ffmpeg),
            out_dir: tag("--out-dir", &self.out_dir),
            dir_name_format: RawDirNameFormat {
                campaign: tag("--campaign-dir-name-format", &self.campaign_dir_name_format),
                content: tag("--content-dir-name-format", &self.content_dir_name_format),
            },
            filename_format: RawFilenameFormat {
                media: tag("--media-filename-format", &self.media_filename_format),
            },
            include,
            request: RawRequestOptions {
                max_retries: tag("--max-retries", &self.max_retries),
                max_concurrent: tag("--max-concurrent", &self.max_concurrent),
                min_time: tag("--min-time", &self.min_time),
            },
            file_exists_action: RawFileExistsActions {
                content: tag("--content-file-exists-action", &self.content_file_exists_action),
                info: tag("--info-file-exists-action", &self.info_file_exists_action),
                info_api: tag(
                    "--info-api-file-exists-action",
                    &self.info_api_file_exists_action,
                ),
            },
            console_logger: RawLoggerOptions {
                enabled: switch("--no-console-log", self.no_console_log, "false"),
                log_level: tag("--log-level", &self.log_level),
                color: switch("--no-color", self.no_color, "false"),
                ..Default::default()
            },
            file_loggers: Vec::new(),
            embed_downloaders: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_options, ConfigFile, LogLevel, Origin, PostsWithMediaType};
    use crate::error::Error;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["patreon-dl-config"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_unset_flags_are_undefined() {
        let raw = parse(&[]).to_raw_options();
        assert!(raw.target_urls.is_none());
        assert!(raw.no_prompt.is_none());
        assert!(raw.console_logger.enabled.is_none());
        assert!(raw.include.is_empty());
    }

    #[test]
    fn test_values_tagged_with_flag() {
        let raw = parse(&["https://example.com/a", "-o", "/downloads", "-y"]).to_raw_options();
        assert_eq!(
            raw.target_urls.unwrap().origin,
            Origin::command_line("TARGET")
        );
        assert_eq!(raw.out_dir.unwrap().origin, Origin::command_line("--out-dir"));
        assert_eq!(raw.no_prompt.unwrap().defined_value(), Some("true"));
    }

    #[test]
    fn test_include_flags() {
        let raw = parse(&["--include-posts-with-media-type", "video"]).to_raw_options();
        let entry = raw.include.posts_with_media_type.unwrap();
        assert_eq!(
            entry.origin,
            Origin::command_line("--include-posts-with-media-type")
        );
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let cfg = ConfigFile::parse_str(
            "[downloader]\ntarget.url = https://example.com/cfg\n\
             [include]\nposts.with.media.type = any\n\
             [logger.console]\nlog.level = error\ncolor = true\n",
        )
        .unwrap()
        .to_raw_options();

        let cli = parse(&[
            "https://example.com/cli",
            "--include-posts-with-media-type",
            "none",
            "-l",
            "debug",
            "--no-color",
        ])
        .to_raw_options();

        let options = resolve_options(&cli, Some(&cfg)).unwrap();
        assert_eq!(options.targets[0].url, "https://example.com/cli");
        assert_eq!(
            options.include.posts_with_media_type,
            Some(PostsWithMediaType::None)
        );
        assert_eq!(options.console_logger.log_level, LogLevel::Debug);
        assert!(!options.console_logger.color);
    }

    #[test]
    fn test_invalid_flag_value_names_flag() {
        let cli = parse(&["https://example.com/a", "--use-status-cache", "yes"]).to_raw_options();
        let err = resolve_options(&cli, None).unwrap_err();
        assert!(matches!(err, Error::InvalidBooleanValue { .. }));
        assert!(err.to_string().contains("'--use-status-cache'"));
    }
}
