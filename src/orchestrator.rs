//! Lock-step driver for the four strategies.
//!
//! # Tick
//!
//! ```text
//! NearestNeighbor.advance()
//!     └─ tour just completed and no 2-Opt yet? ──► create TwoOpt(tour)
//! BruteForce.advance()
//! TwoOpt.advance()            (only once created)
//! Genetic.advance()
//! ──► Frame { 4 × RenderRequest, all_exhausted }
//! ```
//!
//! An exhausted stepper contributes nothing new; its last result is
//! rendered again. Every fresh tour passes the Jidoka [`TourGuard`] before it
//! is stored.

use crate::config::CompareConfig;
use crate::engine::jidoka::{TourGuard, TourShape};
use crate::engine::rng::SimRng;
use crate::error::CompareResult;
use crate::geometry::Geometry;
use crate::steppers::{
    AlgorithmKind, BruteForceStepper, GeneticParams, GeneticStepper, NearestNeighborStepper,
    StepResult, Stepper, TwoOptStepper,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the render sink receives for one algorithm on one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub kind: AlgorithmKind,
    pub label: String,
    pub explanation: String,
    /// Tour to draw; empty before the algorithm has produced anything.
    pub tour: Vec<usize>,
    pub attempts: u64,
    /// Absent until the algorithm has a tour to measure.
    pub distance: Option<f64>,
    pub cities_visited: usize,
    pub total_cities: usize,
    pub complete: bool,
}

/// Everything rendered for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub title: String,
    /// One request per algorithm, in [`AlgorithmKind::ALL`] order.
    pub requests: Vec<RenderRequest>,
    pub all_exhausted: bool,
}

impl Frame {
    /// Request for one algorithm.
    #[must_use]
    pub fn request(&self, kind: AlgorithmKind) -> Option<&RenderRequest> {
        self.requests.iter().find(|r| r.kind == kind)
    }
}

/// Latest known output of one stepper.
#[derive(Debug, Clone, Default)]
struct Lane {
    last: Option<StepResult>,
}

/// Advances the four steppers in lock-step.
#[derive(Debug)]
pub struct ComparisonOrchestrator {
    geometry: Arc<Geometry>,
    guard: TourGuard,
    nearest_neighbor: NearestNeighborStepper,
    brute_force: BruteForceStepper,
    /// Created exactly once, when nearest neighbor completes.
    two_opt: Option<TwoOptStepper>,
    genetic: GeneticStepper,
    lanes: [Lane; 4],
    tick: u64,
}

impl ComparisonOrchestrator {
    /// Wire up all steppers over a shared geometry.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the genetic parameters are invalid.
    pub fn new(geometry: Arc<Geometry>, genetic: GeneticParams, rng: SimRng) -> CompareResult<Self> {
        let guard = TourGuard::new(geometry.len());
        Ok(Self {
            nearest_neighbor: NearestNeighborStepper::new(Arc::clone(&geometry)),
            brute_force: BruteForceStepper::new(Arc::clone(&geometry)),
            two_opt: None,
            genetic: GeneticStepper::new(Arc::clone(&geometry), genetic, rng)?,
            geometry,
            guard,
            lanes: Default::default(),
            tick: 0,
        })
    }

    /// Build the city set and all steppers from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the city set or genetic parameters
    /// are invalid.
    pub fn from_config(config: &CompareConfig) -> CompareResult<Self> {
        config.check()?;
        let geometry = Arc::new(config.build_geometry()?);
        log::info!(
            "orchestrator: {} cities, genetic seed {}",
            geometry.len(),
            config.genetic.seed
        );
        Self::new(
            geometry,
            config.genetic_params(),
            SimRng::new(config.genetic.seed),
        )
    }

    /// Ticks performed so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Swap in a different guard, e.g. one sized for the wrong city count.
    #[cfg(test)]
    pub(crate) fn with_guard(mut self, guard: TourGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Whether the 2-opt stepper has been created.
    #[must_use]
    pub const fn two_opt_started(&self) -> bool {
        self.two_opt.is_some()
    }

    /// True once every stepper, including 2-opt, is exhausted.
    #[must_use]
    pub fn all_exhausted(&self) -> bool {
        self.nearest_neighbor.is_exhausted()
            && self.brute_force.is_exhausted()
            && self.two_opt.as_ref().is_some_and(Stepper::is_exhausted)
            && self.genetic.is_exhausted()
    }

    /// Advance every stepper once and return the frame to render.
    ///
    /// # Errors
    ///
    /// Returns a fatal `InvariantViolation` if any stepper produced a tour
    /// that is not a valid (partial) permutation. The run must stop.
    pub fn tick(&mut self) -> CompareResult<Frame> {
        self.tick += 1;

        let result = self.nearest_neighbor.advance();
        self.record(AlgorithmKind::NearestNeighbor, result)?;
        if self.two_opt.is_none() && self.nearest_neighbor.is_complete() {
            self.start_two_opt()?;
        }

        let result = self.brute_force.advance();
        self.record(AlgorithmKind::BruteForce, result)?;

        if let Some(two_opt) = self.two_opt.as_mut() {
            let result = two_opt.advance();
            self.record(AlgorithmKind::TwoOpt, result)?;
        }

        let result = self.genetic.advance();
        self.record(AlgorithmKind::Genetic, result)?;

        let frame = self.frame();
        if frame.all_exhausted {
            log::info!("orchestrator: all algorithms exhausted at tick {}", self.tick);
        }
        Ok(frame)
    }

    /// Snapshot of the latest known state of every lane, without advancing.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick,
            title: format!("TSP Algorithm Comparison ({} Cities)", self.geometry.len()),
            requests: AlgorithmKind::ALL
                .iter()
                .map(|&kind| self.render_request(kind))
                .collect(),
            all_exhausted: self.all_exhausted(),
        }
    }

    fn start_two_opt(&mut self) -> CompareResult<()> {
        let seed = self.nearest_neighbor.tour().to_vec();
        self.guard
            .check(AlgorithmKind::NearestNeighbor.label(), &seed, TourShape::Complete)?;
        log::info!(
            "orchestrator: tick {} handing nearest-neighbor tour to 2-opt",
            self.tick
        );
        // The seed is shown until the first accepted move
        self.lanes[lane_index(AlgorithmKind::TwoOpt)].last = Some(StepResult::new(seed.clone(), 0));
        self.two_opt = Some(TwoOptStepper::new(Arc::clone(&self.geometry), seed));
        Ok(())
    }

    fn record(&mut self, kind: AlgorithmKind, result: Option<StepResult>) -> CompareResult<()> {
        let Some(result) = result else {
            return Ok(());
        };
        let shape = match kind {
            AlgorithmKind::NearestNeighbor => TourShape::Partial,
            _ => TourShape::Complete,
        };
        self.guard.check(kind.label(), &result.tour, shape)?;
        if let Some(best) = &result.best {
            self.guard.check(kind.label(), &best.tour, TourShape::Complete)?;
        }
        self.lanes[lane_index(kind)].last = Some(result);
        Ok(())
    }

    fn is_exhausted(&self, kind: AlgorithmKind) -> bool {
        match kind {
            AlgorithmKind::NearestNeighbor => self.nearest_neighbor.is_exhausted(),
            AlgorithmKind::BruteForce => self.brute_force.is_exhausted(),
            AlgorithmKind::TwoOpt => self.two_opt.as_ref().is_some_and(Stepper::is_exhausted),
            AlgorithmKind::Genetic => self.genetic.is_exhausted(),
        }
    }

    fn render_request(&self, kind: AlgorithmKind) -> RenderRequest {
        let last = self.lanes[lane_index(kind)].last.as_ref();
        let tour = last.map(|r| r.tour.clone()).unwrap_or_default();
        let distance = last.map(|r| {
            r.best
                .as_ref()
                .map_or_else(|| self.geometry.tour_length(&r.tour), |b| b.distance)
        });

        RenderRequest {
            kind,
            label: kind.label().to_string(),
            explanation: kind.explanation().to_string(),
            cities_visited: tour.len(),
            tour,
            attempts: last.map_or(0, |r| r.attempts),
            distance,
            total_cities: self.geometry.len(),
            complete: self.is_exhausted(kind),
        }
    }
}

const fn lane_index(kind: AlgorithmKind) -> usize {
    match kind {
        AlgorithmKind::NearestNeighbor => 0,
        AlgorithmKind::BruteForce => 1,
        AlgorithmKind::TwoOpt => 2,
        AlgorithmKind::Genetic => 3,
    }
}
