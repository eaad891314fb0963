//! Output module for console output and logging.
//!
//! Provides:
//! - Colored console output
//! - Console and file logger setup

pub mod console;
pub mod logging;

pub use console::{print_error, print_info, print_options_summary, print_warning};
pub use logging::{init_logging, log_file_path, open_log_file};
