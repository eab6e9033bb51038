//! CLI command handlers.
//!
//! `execute` does the work against any writer so tests can capture output;
//! `run_cli` binds it to stdout and maps the result to an exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use super::output::format_summary;
use super::{Args, OutputFormat};
use crate::error::CompareResult;
use crate::orchestrator::ComparisonOrchestrator;
use crate::renderers::{JsonLinesSink, TextSink};
use crate::runner::{run, RunOptions};

/// Main CLI entry point.
///
/// Exit code 0 on normal completion or a requested stop, 1 on any error.
#[must_use]
pub fn run_cli(args: &Args) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve configuration, run the comparison, and write output to `out`.
///
/// # Errors
///
/// Returns error if configuration is invalid, an invariant is violated
/// during the run, or writing fails.
pub fn execute<W: Write>(args: &Args, out: &mut W) -> CompareResult<()> {
    let config = args.resolve_config()?;

    if args.print_config {
        out.write_all(config.to_yaml()?.as_bytes())?;
        return Ok(());
    }

    let orchestrator = ComparisonOrchestrator::from_config(&config)?;
    let options = RunOptions::from(&config);

    match args.format {
        OutputFormat::Text => {
            let outcome = {
                let mut sink = TextSink::new(&mut *out, config.run.log_every);
                run(orchestrator, &mut sink, options)?
            };
            if let Some(frame) = &outcome.final_frame {
                writeln!(out)?;
                write!(out, "{}", format_summary(frame))?;
            }
        }
        OutputFormat::Json => {
            let mut sink = JsonLinesSink::new(&mut *out);
            run(orchestrator, &mut sink, options)?;
        }
    }

    out.flush()?;
    Ok(())
}
