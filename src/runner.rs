//! Tick loop that feeds frames into a sink.
//!
//! The orchestrator does no timing and never decides when to stop; this
//! loop does. It ends when every stepper is exhausted, when the sink asks to
//! stop, or when an optional tick limit is hit. It never spins on idle
//! steppers.

use crate::config::{CompareConfig, RunConfig};
use crate::error::CompareResult;
use crate::orchestrator::{ComparisonOrchestrator, Frame};
use crate::renderers::{RenderSink, SinkControl};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every stepper finished.
    Exhausted,
    /// The sink returned [`SinkControl::Stop`].
    SinkStopped,
    /// `max_ticks` was reached first.
    TickLimit,
}

/// Loop settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub max_ticks: Option<u64>,
}

impl From<&RunConfig> for RunOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            max_ticks: config.max_ticks,
        }
    }
}

impl From<&CompareConfig> for RunOptions {
    fn from(config: &CompareConfig) -> Self {
        Self::from(&config.run)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub ticks: u64,
    pub reason: StopReason,
    pub final_frame: Option<Frame>,
}

/// Tick `orchestrator` into `sink` until a stop condition holds.
///
/// The orchestrator is consumed: on return all stepper state is released.
///
/// # Errors
///
/// Propagates fatal invariant violations from the orchestrator and write
/// errors from the sink. The loop stops at the first error.
pub fn run<S: RenderSink + ?Sized>(
    mut orchestrator: ComparisonOrchestrator,
    sink: &mut S,
    options: RunOptions,
) -> CompareResult<RunOutcome> {
    let mut final_frame = None;

    let reason = loop {
        if orchestrator.all_exhausted() {
            break StopReason::Exhausted;
        }
        if options
            .max_ticks
            .is_some_and(|limit| orchestrator.tick_count() >= limit)
        {
            break StopReason::TickLimit;
        }

        let frame = match orchestrator.tick() {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("runner: halting at tick {}: {err}", orchestrator.tick_count());
                return Err(err);
            }
        };
        let control = sink.render(&frame)?;
        final_frame = Some(frame);

        if control == SinkControl::Stop {
            log::warn!("runner: sink requested stop at tick {}", orchestrator.tick_count());
            break StopReason::SinkStopped;
        }
    };

    let outcome = RunOutcome {
        ticks: orchestrator.tick_count(),
        reason,
        final_frame,
    };
    log::info!("runner: finished after {} ticks ({:?})", outcome.ticks, outcome.reason);
    sink.finish(&outcome)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::jidoka::TourGuard;
    use crate::engine::rng::SimRng;
    use crate::error::CompareError;
    use crate::geometry::Geometry;
    use crate::renderers::RecordingSink;
    use crate::steppers::GeneticParams;
    use crate::steppers::test_support::square;
    use std::sync::Arc;

    fn orchestrator(geometry: Arc<Geometry>) -> ComparisonOrchestrator {
        ComparisonOrchestrator::new(geometry, GeneticParams::default(), SimRng::new(1)).unwrap()
    }

    #[test]
    fn test_runs_to_exhaustion() {
        let mut sink = RecordingSink::new();
        let outcome = run(orchestrator(square()), &mut sink, RunOptions::default()).unwrap();

        assert_eq!(outcome.reason, StopReason::Exhausted);
        assert_eq!(outcome.ticks, 100);
        assert_eq!(sink.frames().len(), 100);
        assert!(sink.is_finished());
        assert!(outcome.final_frame.unwrap().all_exhausted);
    }

    #[test]
    fn test_sink_stop() {
        let mut sink = RecordingSink::stop_after(5);
        let outcome = run(orchestrator(square()), &mut sink, RunOptions::default()).unwrap();

        assert_eq!(outcome.reason, StopReason::SinkStopped);
        assert_eq!(outcome.ticks, 5);
        assert_eq!(sink.frames().len(), 5);
        assert!(sink.is_finished());
    }

    #[test]
    fn test_tick_limit() {
        // Ten cities: brute force alone needs 3.6M ticks
        let geometry = Arc::new(Geometry::random(10, 100.0, &mut SimRng::new(4)).unwrap());
        let mut sink = RecordingSink::new();
        let options = RunOptions { max_ticks: Some(250) };
        let outcome = run(orchestrator(geometry), &mut sink, options).unwrap();

        assert_eq!(outcome.reason, StopReason::TickLimit);
        assert_eq!(outcome.ticks, 250);
        let last = sink.frames().last().unwrap();
        assert!(!last.all_exhausted);
    }

    #[test]
    fn test_options_from_config_bound_the_run() {
        let config = CompareConfig::builder().cities(6).max_ticks(5).build();
        let orchestrator = ComparisonOrchestrator::from_config(&config).unwrap();
        let mut sink = RecordingSink::new();
        let outcome = run(orchestrator, &mut sink, RunOptions::from(&config)).unwrap();

        assert_eq!(RunOptions::from(&config.run).max_ticks, Some(5));
        assert_eq!(outcome.reason, StopReason::TickLimit);
        assert_eq!(outcome.ticks, 5);
        assert_eq!(sink.frames().len(), 5);
    }

    #[test]
    fn test_invariant_violation_reaches_caller() {
        // Guard sized for 3 cities on a 4-city set rejects the first complete tour
        let orchestrator = orchestrator(square()).with_guard(TourGuard::new(3));
        let mut sink = RecordingSink::new();
        let err = run(orchestrator, &mut sink, RunOptions::default()).unwrap_err();

        assert!(err.is_fatal());
        assert!(matches!(err, CompareError::InvariantViolation { .. }));
        assert!(sink.frames().is_empty());
        assert!(!sink.is_finished(), "finish must not run after a fatal error");
    }

    #[test]
    fn test_zero_tick_limit() {
        let mut sink = RecordingSink::new();
        let options = RunOptions { max_ticks: Some(0) };
        let outcome = run(orchestrator(square()), &mut sink, options).unwrap();
        assert_eq!(outcome.ticks, 0);
        assert!(outcome.final_frame.is_none());
        assert!(sink.frames().is_empty());
    }
}
