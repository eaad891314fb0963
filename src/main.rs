//! patreon-dl-config - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use patreon_dl_config::{
    cli::Args,
    config::load_options,
    error::{exit_codes, Result},
    output::{init_logging, print_error, print_info, print_options_summary, print_warning},
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if e.is_config_error() {
                ExitCode::from(exit_codes::CONFIG_ERROR as u8)
            } else {
                ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8)
            }
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Resolve options from every source
    let options = load_options(&args.to_raw_options(), args.config_file.as_deref())?;

    // Set up logging
    init_logging(&options.console_logger, &options.file_loggers)?;
    debug!(targets = options.targets.len(), "Options resolved");

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    print_info(&format!("{} target(s) resolved", options.targets.len()));
    print_options_summary(&options);

    if options.cookie.is_none() {
        print_warning("No cookie set: only public content will be available");
    }

    info!(out_dir = %options.out_dir, "Ready");
    Ok(())
}
