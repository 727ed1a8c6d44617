//! Command line interface shared by the reeltag binaries.

pub mod args;
pub mod commands;
pub mod output;

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize logging for a verbosity level as returned by the `verbosity()`
/// methods in [`args`].
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    let _ = Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();
}
