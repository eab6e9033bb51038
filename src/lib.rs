//! # tsp-compare
//!
//! Step four Traveling Salesman strategies side by side on one city set.
//!
//! Every tick advances Nearest Neighbor, Brute Force, 2-Opt and a Genetic
//! Algorithm by one unit of work each, so their progress can be watched
//! and compared frame by frame:
//! - Resumable steppers: no algorithm runs to completion in one call
//! - Jidoka: every tour a stepper emits is checked to be a valid
//!   (partial) permutation before it reaches a sink
//! - Reproducible: cities and the genetic algorithm draw from seeded RNGs
//!
//! ## Example
//!
//! ```rust
//! use tsp_compare::prelude::*;
//!
//! let config = CompareConfig::builder()
//!     .cities(5)
//!     .city_seed(42)
//!     .generations(10)
//!     .build();
//! let orchestrator = ComparisonOrchestrator::from_config(&config).unwrap();
//!
//! let mut sink = RecordingSink::new();
//! let outcome = run(orchestrator, &mut sink, RunOptions::from(&config)).unwrap();
//! assert_eq!(outcome.reason, StopReason::Exhausted);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod orchestrator;
pub mod renderers;
pub mod runner;
pub mod steppers;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CompareConfig, CompareConfigBuilder};
    pub use crate::engine::jidoka::{TourGuard, TourShape};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{CompareError, CompareResult};
    pub use crate::geometry::{City, Geometry};
    pub use crate::orchestrator::{ComparisonOrchestrator, Frame, RenderRequest};
    pub use crate::renderers::{JsonLinesSink, RecordingSink, RenderSink, SinkControl, TextSink};
    pub use crate::runner::{run, RunOptions, RunOutcome, StopReason};
    pub use crate::steppers::{
        AlgorithmKind, AlgorithmState, GeneticParams, StepResult, Stepper,
    };
}

/// Re-export for public API
pub use error::{CompareError, CompareResult};
