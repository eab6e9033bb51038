//! Exhaustive enumeration of every permutation.
//!
//! Permutations are visited in lexicographic order starting from the
//! identity, and the starting city is not fixed: every rotation of every
//! cycle is scored, so the search does N× more work than it has to. That
//! redundancy is kept so the attempt counter reads N! at the end.
//!
//! Cost is O(N!) steps of O(N) each. Past ~10 cities this never finishes in
//! practice; that is accepted behavior, not a fault.

use super::{AlgorithmKind, AlgorithmState, BestSoFar, StepResult, Stepper};
use crate::geometry::Geometry;
use std::sync::Arc;

/// Scores one permutation per step, tracking the best seen.
#[derive(Debug, Clone)]
pub struct BruteForceStepper {
    geometry: Arc<Geometry>,
    /// Next permutation to score; `None` once all have been scored.
    pending: Option<Vec<usize>>,
    /// Permutation scored by the latest step.
    current: Vec<usize>,
    best: Option<BestSoFar>,
    attempts: u64,
}

impl BruteForceStepper {
    /// Start enumeration at the identity permutation.
    #[must_use]
    pub fn new(geometry: Arc<Geometry>) -> Self {
        let n = geometry.len();
        Self {
            geometry,
            pending: Some((0..n).collect()),
            current: Vec::new(),
            best: None,
            attempts: 0,
        }
    }

    /// Best tour and distance seen so far.
    #[must_use]
    pub fn best(&self) -> Option<&BestSoFar> {
        self.best.as_ref()
    }

    /// Total number of steps a full run takes (N!), saturating at `u64::MAX`.
    #[must_use]
    pub fn total_permutations(&self) -> u64 {
        (1..=self.geometry.len() as u64).fold(1u64, u64::saturating_mul)
    }
}

/// Rearrange `perm` into its lexicographic successor.
///
/// Returns `false` (leaving `perm` unchanged) when `perm` is the last
/// permutation.
pub fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    // Longest non-increasing suffix starts at `pivot + 1`
    let Some(pivot) = (0..perm.len() - 1).rev().find(|&i| perm[i] < perm[i + 1]) else {
        return false;
    };
    let Some(swap) = (pivot + 1..perm.len()).rev().find(|&j| perm[j] > perm[pivot]) else {
        return false;
    };
    perm.swap(pivot, swap);
    perm[pivot + 1..].reverse();
    true
}

impl Stepper for BruteForceStepper {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BruteForce
    }

    fn advance(&mut self) -> Option<StepResult> {
        let perm = self.pending.take()?;

        let distance = self.geometry.tour_length(&perm);
        self.attempts += 1;

        let improved = self.best.as_ref().map_or(true, |b| distance < b.distance);
        if improved {
            log::debug!(
                "brute_force: step={} new best {distance:.3} {perm:?}",
                self.attempts
            );
            self.best = Some(BestSoFar {
                tour: perm.clone(),
                distance,
            });
        }

        let mut successor = perm.clone();
        if next_permutation(&mut successor) {
            self.pending = Some(successor);
        } else {
            log::info!("brute_force: exhausted after {} permutations", self.attempts);
        }
        self.current = perm;

        Some(StepResult {
            tour: self.current.clone(),
            attempts: self.attempts,
            best: self.best.clone(),
        })
    }

    fn is_exhausted(&self) -> bool {
        self.pending.is_none()
    }

    fn state(&self) -> AlgorithmState {
        AlgorithmState {
            current_tour: self.current.clone(),
            attempts: self.attempts,
            best_tour: self.best.as_ref().map(|b| b.tour.clone()),
            best_distance: self.best.as_ref().map(|b| b.distance),
            exhausted: self.is_exhausted(),
        }
    }
}
