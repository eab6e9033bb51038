//! CLI module for tsp-compare.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, OutputFormat};
pub use commands::{execute, run_cli};
pub use output::format_summary;

/// Initialize the `log` backend.
///
/// `verbosity` is the `-v` count: 0 warn, 1 info, 2 debug, 3+ trace.
/// `RUST_LOG` overrides the level when set. Calling this twice is harmless.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests;
