//! CLI module tests.

use super::args::{Args, OutputFormat};
use super::commands::execute;
use super::output::format_summary;
use crate::error::CompareError;
use crate::orchestrator::Frame;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

fn output_of(argv: &[&str]) -> String {
    let args = Args::parse_from(argv);
    let mut out = Vec::new();
    execute(&args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_defaults() {
    let args = Args::parse_from(["tsp-compare"]);
    assert_eq!(args.config, None);
    assert_eq!(args.cities, None);
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.verbose, 0);
    assert!(!args.print_config);
}

#[test]
fn test_parse_all_flags() {
    let args = Args::parse_from([
        "tsp-compare",
        "--config",
        "run.yaml",
        "-n",
        "6",
        "--seed",
        "3",
        "--ga-seed",
        "9",
        "--max-ticks",
        "50",
        "--format",
        "json",
        "--every",
        "10",
        "-vv",
    ]);
    assert_eq!(args.config, Some(PathBuf::from("run.yaml")));
    assert_eq!(args.cities, Some(6));
    assert_eq!(args.seed, Some(3));
    assert_eq!(args.ga_seed, Some(9));
    assert_eq!(args.max_ticks, Some(50));
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.every, Some(10));
    assert_eq!(args.verbose, 2);
}

#[test]
fn test_parse_rejects_unknown_format() {
    assert!(Args::try_parse_from(["tsp-compare", "--format", "xml"]).is_err());
}

// ============================================================================
// Config resolution tests
// ============================================================================

#[test]
fn test_resolve_overrides() {
    let args = Args::parse_from([
        "tsp-compare",
        "-n",
        "5",
        "--seed",
        "11",
        "--ga-seed",
        "12",
        "--max-ticks",
        "30",
        "--every",
        "4",
    ]);
    let config = args.resolve_config().unwrap();
    assert_eq!(config.cities.count, 5);
    assert_eq!(config.cities.seed, 11);
    assert_eq!(config.genetic.seed, 12);
    assert_eq!(config.run.max_ticks, Some(30));
    assert_eq!(config.run.log_every, 4);
}

#[test]
fn test_resolve_from_file_with_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "cities:\n  coordinates: [[0, 0], [0, 10], [10, 10], [10, 0]]\ngenetic:\n  generations: 5"
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let args = Args::parse_from(["tsp-compare", "--config", path.as_str()]);
    let config = args.resolve_config().unwrap();
    assert_eq!(config.city_count(), 4);
    assert_eq!(config.genetic.generations, 5);

    // --cities replaces explicit coordinates with a random set
    let args = Args::parse_from(["tsp-compare", "--config", path.as_str(), "-n", "6"]);
    let config = args.resolve_config().unwrap();
    assert!(config.cities.coordinates.is_empty());
    assert_eq!(config.city_count(), 6);
}

#[test]
fn test_resolve_rejects_one_city() {
    let args = Args::parse_from(["tsp-compare", "-n", "1"]);
    assert!(args.resolve_config().is_err());
}

#[test]
fn test_missing_config_file() {
    let args = Args::parse_from(["tsp-compare", "--config", "/nonexistent/tsp.yaml"]);
    let mut out = Vec::new();
    let err = execute(&args, &mut out).unwrap_err();
    assert!(matches!(err, CompareError::Io(_)));
    assert!(out.is_empty());
}

// ============================================================================
// Execution tests
// ============================================================================

#[test]
fn test_text_run_completes() {
    let text = output_of(&["tsp-compare", "-n", "4", "--every", "50"]);
    assert!(text.contains("TSP Algorithm Comparison (4 Cities)"));
    assert!(text.contains("tick 50 =="));
    assert!(text.contains("tick 100 =="));
    assert!(!text.contains("tick 1 =="));
    assert!(text.contains("All iterations completed. (100 ticks)"));
    assert!(text.contains("Summary after 100 ticks"));
    assert!(text.contains("1. "));
}

#[test]
fn test_text_run_tick_limit() {
    let text = output_of(&["tsp-compare", "--max-ticks", "7"]);
    assert!(text.contains("tick 7 =="));
    assert!(text.contains("Tick limit reached. (7 ticks)"));
    assert!(text.contains("(unfinished)"));
}

#[test]
fn test_json_run_emits_one_line_per_tick() {
    let text = output_of(&["tsp-compare", "-n", "5", "--max-ticks", "12", "--format", "json"]);
    let frames: Vec<Frame> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(frames.len(), 12);
    assert_eq!(frames[0].tick, 1);
    assert_eq!(frames[11].tick, 12);
    assert_eq!(frames[0].requests.len(), 4);
}

#[test]
fn test_print_config() {
    let text = output_of(&["tsp-compare", "--print-config", "-n", "8"]);
    assert!(text.contains("schema_version"));
    assert!(text.contains("count: 8"));
    assert!(!text.contains("Summary"));
}

#[test]
fn test_runs_are_reproducible() {
    let argv = ["tsp-compare", "-n", "6", "--seed", "21", "--ga-seed", "5", "--format", "json"];
    assert_eq!(output_of(&argv), output_of(&argv));
}

#[test]
fn test_format_summary_ranks_by_distance() {
    let args = Args::parse_from(["tsp-compare", "-n", "4", "--max-ticks", "2", "--format", "json"]);
    let text = {
        let mut out = Vec::new();
        execute(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    };
    let last: Frame = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    let summary = format_summary(&last);

    assert!(summary.starts_with("Summary after 2 ticks"));
    // 2-Opt has not started after two ticks on four cities
    let two_opt_line = summary.lines().last().unwrap();
    let fields: Vec<&str> = two_opt_line.split_whitespace().collect();
    assert_eq!(fields, ["4.", "2-Opt", "-", "(unfinished)"]);

    // The three measured algorithms come first, shortest first
    let distances: Vec<f64> = summary
        .lines()
        .skip(1)
        .take(3)
        .map(|line| {
            let line = line.trim_end_matches(" (unfinished)");
            line.split_whitespace().last().unwrap()
        })
        .map(|field| field.parse().unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{summary}");
}
