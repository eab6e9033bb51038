//! tsp-compare CLI
//!
//! Runs the four-algorithm comparison and prints frames to stdout.

use clap::Parser;
use std::process::ExitCode;
use tsp_compare::cli::{init_logging, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    run_cli(&args)
}
