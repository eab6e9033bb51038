//! CLI argument parsing.
//!
//! Command-line values override the configuration file, which overrides
//! the built-in defaults.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::CompareConfig;
use crate::error::CompareResult;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TSP_COMPARE_GIT_HASH"),
    ")"
);

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text, one block per frame.
    Text,
    /// One JSON object per frame.
    Json,
}

/// Step four TSP strategies side by side on one city set.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "tsp-compare", version, long_version = LONG_VERSION, about)]
pub struct Args {
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of random cities.
    #[arg(short = 'n', long)]
    pub cities: Option<usize>,

    /// City placement seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Genetic algorithm seed.
    #[arg(long)]
    pub ga_seed: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print every n-th frame in text mode.
    #[arg(long)]
    pub every: Option<u64>,

    /// Print the effective configuration as YAML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Merge file, defaults, and command-line overrides into a validated
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or the merged
    /// configuration is invalid.
    pub fn resolve_config(&self) -> CompareResult<CompareConfig> {
        let mut config = match &self.config {
            Some(path) => CompareConfig::load(path)?,
            None => CompareConfig::default(),
        };

        if let Some(n) = self.cities {
            config.cities.count = n;
            config.cities.coordinates.clear();
        }
        if let Some(seed) = self.seed {
            config.cities.seed = seed;
        }
        if let Some(seed) = self.ga_seed {
            config.genetic.seed = seed;
        }
        if self.max_ticks.is_some() {
            config.run.max_ticks = self.max_ticks;
        }
        if let Some(every) = self.every {
            config.run.log_every = every;
        }

        config.check()?;
        Ok(config)
    }
}
