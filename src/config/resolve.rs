//! Option resolution.
//!
//! Every field is taken from the first source that defines it, in the order
//! command line, config file, built-in default. Nested groups are resolved
//! field by field, never as whole objects.

use std::path::Path;

use tracing::{debug, info};

use crate::config::include::{resolve_include_options, IncludeEntries};
use crate::config::loader::load_config_file;
use crate::config::options::{
    ConsoleLoggerOptions, DirNameFormat, EmbedDownloader, FileExistsActions, FileLoggerOptions,
    FilenameFormat, LogLineIncludes, Options, RawEmbedDownloader, RawFileLoggerOptions,
    RawLoggerOptions, RawOptions, RequestOptions,
};
use crate::config::source::{first_defined, OptionEntry};
use crate::config::targets::{read_targets_file, TargetDeclaration, TargetEntry};
use crate::config::validation::{
    validate_boolean, validate_enum, validate_number, validate_required, validate_string,
    validate_string_or, validate_target_urls,
};
use crate::config::values::{FileExistsAction, LogFileExistsAction, LogLevel};
use crate::error::Result;

pub const DEFAULT_OUT_DIR: &str = ".";
pub const DEFAULT_CAMPAIGN_DIR_NAME_FORMAT: &str = "{creator.vanity}[ - ]?{campaign.name}";
pub const DEFAULT_CONTENT_DIR_NAME_FORMAT: &str = "{content.id}[ - ]?{content.name}";
pub const DEFAULT_MEDIA_FILENAME_FORMAT: &str = "{media.filename}";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_MAX_CONCURRENT: u32 = 10;
pub const DEFAULT_MIN_TIME_MS: u64 = 333;
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%b %d %H:%M:%S";
pub const DEFAULT_LOG_FILENAME: &str = "patreon-dl.log";

const NO_TARGET_MESSAGE: &str = "No target URL specified";

/// Two-source precedence: command line, then config file.
fn pick<'a>(cli: &'a Option<OptionEntry>, cfg: &'a Option<OptionEntry>) -> Option<&'a OptionEntry> {
    first_defined([cli.as_ref(), cfg.as_ref()])
}

/// Resolve the final options from command-line and config-file values.
///
/// Fails on the first missing required value or malformed value.
pub fn resolve_options(cli: &RawOptions, config_file: Option<&RawOptions>) -> Result<Options> {
    let empty = RawOptions::default();
    let cfg = config_file.unwrap_or(&empty);

    let global_include = cli.include.layer_over(&cfg.include);
    let targets = resolve_targets(cli, cfg, &global_include)?;
    let include = global_include.resolve()?;

    let out_dir = validate_string_or(pick(&cli.out_dir, &cfg.out_dir), DEFAULT_OUT_DIR);

    let dir_name_format = DirNameFormat {
        campaign: validate_string_or(
            pick(&cli.dir_name_format.campaign, &cfg.dir_name_format.campaign),
            DEFAULT_CAMPAIGN_DIR_NAME_FORMAT,
        ),
        content: validate_string_or(
            pick(&cli.dir_name_format.content, &cfg.dir_name_format.content),
            DEFAULT_CONTENT_DIR_NAME_FORMAT,
        ),
    };

    let filename_format = FilenameFormat {
        media: validate_string_or(
            pick(&cli.filename_format.media, &cfg.filename_format.media),
            DEFAULT_MEDIA_FILENAME_FORMAT,
        ),
    };

    let request = RequestOptions {
        max_retries: validate_number(pick(&cli.request.max_retries, &cfg.request.max_retries))?
            .unwrap_or(DEFAULT_MAX_RETRIES),
        max_concurrent: validate_number(pick(
            &cli.request.max_concurrent,
            &cfg.request.max_concurrent,
        ))?
        .unwrap_or(DEFAULT_MAX_CONCURRENT),
        min_time: validate_number(pick(&cli.request.min_time, &cfg.request.min_time))?
            .unwrap_or(DEFAULT_MIN_TIME_MS),
    };

    let (cli_actions, cfg_actions) = (&cli.file_exists_action, &cfg.file_exists_action);
    let file_exists_action = FileExistsActions {
        content: validate_enum(pick(&cli_actions.content, &cfg_actions.content))?
            .unwrap_or(FileExistsAction::Skip),
        info: validate_enum(pick(&cli_actions.info, &cfg_actions.info))?
            .unwrap_or(FileExistsAction::SaveAsCopyIfNewer),
        info_api: validate_enum(pick(&cli_actions.info_api, &cfg_actions.info_api))?
            .unwrap_or(FileExistsAction::Overwrite),
    };

    let embed_downloaders = cfg
        .embed_downloaders
        .iter()
        .map(resolve_embed_downloader)
        .collect::<Result<Vec<_>>>()?;

    let console_logger = resolve_console_logger(&cli.console_logger, &cfg.console_logger)?;
    let file_loggers = cfg
        .file_loggers
        .iter()
        .map(|logger| resolve_file_logger(logger, &out_dir))
        .collect::<Result<Vec<_>>>()?;

    let options = Options {
        targets,
        cookie: validate_string(pick(&cli.cookie, &cfg.cookie)),
        use_status_cache: validate_boolean(pick(&cli.use_status_cache, &cfg.use_status_cache))?
            .unwrap_or(true),
        no_prompt: validate_boolean(pick(&cli.no_prompt, &cfg.no_prompt))?.unwrap_or(false),
        path_to_ffmpeg: validate_string(pick(&cli.path_to_ffmpeg, &cfg.path_to_ffmpeg)),
        out_dir,
        dir_name_format,
        filename_format,
        include,
        request,
        file_exists_action,
        embed_downloaders,
        console_logger,
        file_loggers,
    };

    debug!(
        targets = options.targets.len(),
        file_loggers = options.file_loggers.len(),
        embed_downloaders = options.embed_downloaders.len(),
        "Resolved options"
    );

    Ok(options)
}

/// Determine the target list: a targets file if the value names an existing
/// file, otherwise one or more literal URLs.
fn resolve_targets(
    cli: &RawOptions,
    cfg: &RawOptions,
    global_include: &IncludeEntries,
) -> Result<Vec<TargetEntry>> {
    // A whitespace-only value counts as unset.
    let entry = pick(&cli.target_urls, &cfg.target_urls)
        .filter(|e| e.defined_value().is_some_and(|v| !v.trim().is_empty()));
    let value = validate_required(entry, NO_TARGET_MESSAGE)?;

    let targets_file = Path::new(value.trim());
    let declarations = if targets_file.is_file() {
        info!(path = %targets_file.display(), "Reading targets file");
        read_targets_file(targets_file)?
    } else {
        validate_target_urls(&value)?
            .into_iter()
            .map(TargetDeclaration::new)
            .collect()
    };

    declarations
        .into_iter()
        .map(|declaration| {
            let include = declaration
                .overrides
                .map(|overrides| resolve_include_options(&overrides, global_include))
                .transpose()?;
            Ok(TargetEntry {
                url: declaration.url,
                include,
            })
        })
        .collect()
}

fn resolve_embed_downloader(raw: &RawEmbedDownloader) -> Result<EmbedDownloader> {
    Ok(EmbedDownloader {
        provider: validate_required(
            raw.provider.as_ref(),
            &format!("'provider' not set for embedded downloader [{}]", raw.section),
        )?,
        exec: validate_required(
            raw.exec.as_ref(),
            &format!("'exec' not set for embedded downloader [{}]", raw.section),
        )?,
    })
}

/// Logger settings shared by console and file loggers.
struct CommonLoggerOptions {
    enabled: bool,
    log_level: LogLevel,
    include: LogLineIncludes,
    date_time_format: String,
}

fn resolve_common_logger(
    cli: &RawLoggerOptions,
    cfg: &RawLoggerOptions,
) -> Result<CommonLoggerOptions> {
    let flag = |a: &Option<OptionEntry>, b: &Option<OptionEntry>, default: bool| -> Result<bool> {
        Ok(validate_boolean(pick(a, b))?.unwrap_or(default))
    };

    Ok(CommonLoggerOptions {
        enabled: flag(&cli.enabled, &cfg.enabled, true)?,
        log_level: validate_enum(pick(&cli.log_level, &cfg.log_level))?.unwrap_or(LogLevel::Info),
        include: LogLineIncludes {
            date_time: flag(&cli.include_date_time, &cfg.include_date_time, true)?,
            level: flag(&cli.include_level, &cfg.include_level, true)?,
            originator: flag(&cli.include_originator, &cfg.include_originator, true)?,
            error_stack: flag(&cli.include_error_stack, &cfg.include_error_stack, false)?,
        },
        date_time_format: validate_string_or(
            pick(&cli.date_time_format, &cfg.date_time_format),
            DEFAULT_DATE_TIME_FORMAT,
        ),
    })
}

fn resolve_console_logger(
    cli: &RawLoggerOptions,
    cfg: &RawLoggerOptions,
) -> Result<ConsoleLoggerOptions> {
    let common = resolve_common_logger(cli, cfg)?;
    Ok(ConsoleLoggerOptions {
        enabled: common.enabled,
        log_level: common.log_level,
        include: common.include,
        date_time_format: common.date_time_format,
        color: validate_boolean(pick(&cli.color, &cfg.color))?.unwrap_or(true),
    })
}

/// File loggers come from the config file alone.
fn resolve_file_logger(raw: &RawFileLoggerOptions, out_dir: &str) -> Result<FileLoggerOptions> {
    let common = resolve_common_logger(&raw.common, &RawLoggerOptions::default())?;
    let default_log_dir = Path::new(out_dir).join("logs").display().to_string();

    Ok(FileLoggerOptions {
        enabled: common.enabled,
        log_dir: validate_string_or(raw.log_dir.as_ref(), &default_log_dir),
        log_filename: validate_string_or(raw.log_filename.as_ref(), DEFAULT_LOG_FILENAME),
        file_exists_action: validate_enum(raw.file_exists_action.as_ref())?
            .unwrap_or(LogFileExistsAction::Append),
        log_level: common.log_level,
        include: common.include,
        date_time_format: common.date_time_format,
        color: validate_boolean(raw.common.color.as_ref())?.unwrap_or(false),
    })
}

/// Load the config file (explicit path or default location) and resolve
/// against the given command-line values.
pub fn load_options(cli: &RawOptions, config_path: Option<&Path>) -> Result<Options> {
    let config_file = load_config_file(config_path)?;
    resolve_options(cli, config_file.as_ref())
}
