//! Console output utilities.

use console::style;

use crate::config::Options;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a summary of the resolved options.
pub fn print_options_summary(options: &Options) {
    println!();
    println!("{}", style("Targets:").bold());
    for target in &options.targets {
        match &target.include {
            Some(_) => println!("  {} {}", target.url, style("(custom include)").dim()),
            None => println!("  {}", target.url),
        }
    }
    println!();
    println!("{}", style("Configuration:").bold());
    println!(
        "  Cookie: {}",
        if options.cookie.is_some() { "set" } else { "not set" }
    );
    println!("  Output directory: {}", options.out_dir);
    println!(
        "  Content file exists: {}",
        options.file_exists_action.content
    );
    println!(
        "  Requests: {} concurrent, {} retries, {}ms apart",
        options.request.max_concurrent, options.request.max_retries, options.request.min_time
    );
    if let Some(ffmpeg) = &options.path_to_ffmpeg {
        println!("  FFmpeg: {}", ffmpeg);
    }
    for downloader in &options.embed_downloaders {
        println!("  Embed downloader ({}): {}", downloader.provider, downloader.exec);
    }
    println!(
        "  Console log: {}",
        if options.console_logger.enabled {
            options.console_logger.log_level.to_string()
        } else {
            "disabled".to_string()
        }
    );
    for logger in options.file_loggers.iter().filter(|l| l.enabled) {
        println!(
            "  File log: {}/{} ({}, {})",
            logger.log_dir, logger.log_filename, logger.log_level, logger.file_exists_action
        );
    }
    println!();
}
