//! Logger setup from resolved logger options.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format, time::ChronoLocal, MakeWriter},
    layer::{Filter, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{ConsoleLoggerOptions, FileLoggerOptions, LogFileExistsAction, LogLineIncludes};
use crate::error::{Error, Result};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Path of the log file a file logger writes to.
pub fn log_file_path(options: &FileLoggerOptions) -> PathBuf {
    Path::new(&options.log_dir).join(&options.log_filename)
}

/// Open a file logger's log file, creating its directory, appending to or
/// truncating an existing file.
pub fn open_log_file(options: &FileLoggerOptions) -> Result<File> {
    fs::create_dir_all(&options.log_dir)?;

    let mut open = OpenOptions::new();
    open.create(true);
    match options.file_exists_action {
        LogFileExistsAction::Append => open.append(true),
        LogFileExistsAction::Overwrite => open.write(true).truncate(true),
    };
    Ok(open.open(log_file_path(options))?)
}

fn finish_layer<W, F>(
    layer: fmt::Layer<Registry, format::DefaultFields, format::Format, W>,
    include: &LogLineIncludes,
    date_time_format: &str,
    filter: F,
) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    F: Filter<Registry> + Send + Sync + 'static,
{
    let layer = layer
        .with_level(include.level)
        .with_target(include.originator)
        .with_file(include.error_stack)
        .with_line_number(include.error_stack);

    if include.date_time {
        layer
            .with_timer(ChronoLocal::new(date_time_format.to_string()))
            .with_filter(filter)
            .boxed()
    } else {
        layer.without_time().with_filter(filter).boxed()
    }
}

fn console_layer(options: &ConsoleLoggerOptions) -> BoxedLayer {
    // RUST_LOG overrides the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level.to_string()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(options.color);
    finish_layer(layer, &options.include, &options.date_time_format, filter)
}

fn file_layer(options: &FileLoggerOptions) -> Result<BoxedLayer> {
    let file = open_log_file(options)?;
    let filter = LevelFilter::from_level(options.log_level.into());

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(options.color);
    Ok(finish_layer(
        layer,
        &options.include,
        &options.date_time_format,
        filter,
    ))
}

/// Install the global subscriber: one console layer (if enabled) and one
/// layer per enabled file logger.
pub fn init_logging(console: &ConsoleLoggerOptions, files: &[FileLoggerOptions]) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if console.enabled {
        layers.push(console_layer(console));
    }

    for options in files.iter().filter(|f| f.enabled) {
        layers.push(file_layer(options)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::io::Write;

    fn file_logger(dir: &Path, action: LogFileExistsAction) -> FileLoggerOptions {
        FileLoggerOptions {
            enabled: true,
            log_dir: dir.join("logs").display().to_string(),
            log_filename: "test.log".to_string(),
            file_exists_action: action,
            log_level: LogLevel::Info,
            include: LogLineIncludes {
                date_time: true,
                level: true,
                originator: true,
                error_stack: false,
            },
            date_time_format: "%Y-%m-%d".to_string(),
            color: false,
        }
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let options = file_logger(dir.path(), LogFileExistsAction::Append);
        open_log_file(&options).unwrap();
        assert!(log_file_path(&options).is_file());
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let options = file_logger(dir.path(), LogFileExistsAction::Append);

        writeln!(open_log_file(&options).unwrap(), "first").unwrap();
        writeln!(open_log_file(&options).unwrap(), "second").unwrap();

        let content = fs::read_to_string(log_file_path(&options)).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_overwrite_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let options = file_logger(dir.path(), LogFileExistsAction::Overwrite);

        writeln!(open_log_file(&options).unwrap(), "first").unwrap();
        writeln!(open_log_file(&options).unwrap(), "second").unwrap();

        let content = fs::read_to_string(log_file_path(&options)).unwrap();
        assert_eq!(content, "second\n");
    }
}
