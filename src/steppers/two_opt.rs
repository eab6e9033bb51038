//! First-improvement 2-opt local search.
//!
//! # Governing Equation
//!
//! ```text
//! 2-opt move (i, k):  π' = π[0..i] ++ reverse(π[i..=k]) ++ π[k+1..]
//! Accept iff L(π') < L(π)
//! ```
//!
//! Each step scans `(i, k)` with `1 <= i < k <= n-1` from the top and takes
//! the first strictly improving move. A scan that finds nothing ends the
//! search. Every rescan is O(n²) candidates of O(n) each; no neighbor lists
//! or don't-look bits.

use super::{AlgorithmKind, AlgorithmState, StepResult, Stepper};
use crate::geometry::Geometry;
use std::sync::Arc;

/// Improves a seeded tour one accepted move per step.
#[derive(Debug, Clone)]
pub struct TwoOptStepper {
    geometry: Arc<Geometry>,
    tour: Vec<usize>,
    tour_length: f64,
    seed_length: f64,
    attempts: u64,
    done: bool,
}

impl TwoOptStepper {
    /// Seed the search with a complete tour.
    ///
    /// The caller guarantees `tour` is a permutation of the geometry's
    /// cities; the orchestrator checks this before handing it over.
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, tour: Vec<usize>) -> Self {
        let tour_length = geometry.tour_length(&tour);
        Self {
            geometry,
            tour,
            tour_length,
            seed_length: tour_length,
            attempts: 0,
            done: false,
        }
    }

    /// Current tour.
    #[must_use]
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Length of the current tour.
    #[must_use]
    pub const fn tour_length(&self) -> f64 {
        self.tour_length
    }

    /// Length of the tour the search was seeded with.
    #[must_use]
    pub const fn seed_length(&self) -> f64 {
        self.seed_length
    }

    /// Scan for the first improving move. Returns the candidate and its length.
    fn find_improvement(&self) -> Option<(Vec<usize>, f64)> {
        let n = self.tour.len();
        let mut candidate = self.tour.clone();
        for i in 1..n.saturating_sub(1) {
            for k in i + 1..n {
                candidate[i..=k].reverse();
                let length = self.geometry.tour_length(&candidate);
                if length < self.tour_length {
                    return Some((candidate, length));
                }
                // Undo in place rather than recloning
                candidate[i..=k].reverse();
            }
        }
        None
    }
}

impl Stepper for TwoOptStepper {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::TwoOpt
    }

    fn advance(&mut self) -> Option<StepResult> {
        if self.done {
            return None;
        }

        let Some((tour, length)) = self.find_improvement() else {
            self.done = true;
            log::info!(
                "two_opt: converged after {} moves, length {:.3} (seed {:.3})",
                self.attempts,
                self.tour_length,
                self.seed_length
            );
            return None;
        };

        self.tour = tour;
        self.tour_length = length;
        self.attempts += 1;
        log::debug!("two_opt: move={} length={length:.3}", self.attempts);

        Some(StepResult::new(self.tour.clone(), self.attempts))
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }

    fn state(&self) -> AlgorithmState {
        AlgorithmState {
            current_tour: self.tour.clone(),
            attempts: self.attempts,
            best_tour: None,
            best_distance: None,
            exhausted: self.done,
        }
    }
}
