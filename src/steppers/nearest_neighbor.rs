//! Greedy nearest-neighbor tour construction.
//!
//! Starts at city 0 and appends the closest unvisited city each step. Ties
//! go to the lowest index. Fully deterministic.

use super::{AlgorithmKind, AlgorithmState, StepResult, Stepper};
use crate::geometry::Geometry;
use std::sync::Arc;

/// Builds one tour, one city per step.
#[derive(Debug, Clone)]
pub struct NearestNeighborStepper {
    geometry: Arc<Geometry>,
    /// Partial tour, always starting at city 0.
    tour: Vec<usize>,
    /// Unvisited cities in ascending order.
    unvisited: Vec<usize>,
    attempts: u64,
}

impl NearestNeighborStepper {
    /// Start a new construction from city 0.
    #[must_use]
    pub fn new(geometry: Arc<Geometry>) -> Self {
        let n = geometry.len();
        let mut tour = Vec::with_capacity(n);
        tour.push(0);
        Self {
            geometry,
            tour,
            unvisited: (1..n).collect(),
            attempts: 0,
        }
    }

    /// The tour built so far.
    #[must_use]
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Whether every city has been placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unvisited.is_empty()
    }
}

impl Stepper for NearestNeighborStepper {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::NearestNeighbor
    }

    fn advance(&mut self) -> Option<StepResult> {
        let &last = self.tour.last()?;

        // min_by keeps the first of equal minima, so ties go to the lowest index
        let (slot, &next) = self
            .unvisited
            .iter()
            .enumerate()
            .min_by(|a, b| {
                self.geometry
                    .distance(last, *a.1)
                    .total_cmp(&self.geometry.distance(last, *b.1))
            })?;

        self.unvisited.remove(slot);
        self.tour.push(next);
        self.attempts += 1;

        log::debug!(
            "nearest_neighbor: step={} picked={next} visited={}/{}",
            self.attempts,
            self.tour.len(),
            self.geometry.len()
        );

        Some(StepResult::new(self.tour.clone(), self.attempts))
    }

    fn is_exhausted(&self) -> bool {
        self.is_complete()
    }

    fn state(&self) -> AlgorithmState {
        AlgorithmState {
            current_tour: self.tour.clone(),
            attempts: self.attempts,
            best_tour: None,
            best_distance: None,
            exhausted: self.is_exhausted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::SimRng;
    use crate::geometry::City;
    use crate::steppers::test_support::{is_permutation, square};

    fn run_to_end(stepper: &mut NearestNeighborStepper) -> Vec<StepResult> {
        std::iter::from_fn(|| stepper.advance()).collect()
    }

    #[test]
    fn test_square_tour() {
        let g = square();
        let mut nn = NearestNeighborStepper::new(Arc::clone(&g));
        let steps = run_to_end(&mut nn);

        assert_eq!(steps.len(), 3);
        let last = steps.last().unwrap();
        assert_eq!(last.tour, vec![0, 1, 2, 3]);
        assert_eq!(last.attempts, 3);
        assert!((g.tour_length(&last.tour) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_initial_state() {
        let nn = NearestNeighborStepper::new(square());
        assert_eq!(nn.tour(), &[0]);
        assert!(!nn.is_exhausted());
        let state = nn.state();
        assert_eq!(state.attempts, 0);
        assert!(state.best_tour.is_none());
    }

    #[test]
    fn test_exhausted_is_noop() {
        let mut nn = NearestNeighborStepper::new(square());
        let _ = run_to_end(&mut nn);
        assert!(nn.is_exhausted());
        let before = nn.state();
        assert!(nn.advance().is_none());
        assert!(nn.advance().is_none());
        assert_eq!(nn.state(), before);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // Cities 1 and 2 are both at distance 1 from city 0
        let g = Arc::new(
            Geometry::new(vec![
                City::new(0.0, 0.0),
                City::new(1.0, 0.0),
                City::new(-1.0, 0.0),
            ])
            .unwrap(),
        );
        let mut nn = NearestNeighborStepper::new(g);
        let first = nn.advance().unwrap();
        assert_eq!(first.tour, vec![0, 1]);
    }

    #[test]
    fn test_step_grows_by_one() {
        let g = Arc::new(Geometry::random(9, 100.0, &mut SimRng::new(11)).unwrap());
        let mut nn = NearestNeighborStepper::new(g);
        for (i, step) in run_to_end(&mut nn).iter().enumerate() {
            assert_eq!(step.tour.len(), i + 2);
            assert_eq!(step.attempts, i as u64 + 1);
        }
        assert!(is_permutation(nn.tour(), 9));
    }

    #[test]
    fn test_deterministic() {
        let g = Arc::new(Geometry::random(10, 100.0, &mut SimRng::new(3)).unwrap());
        let a = run_to_end(&mut NearestNeighborStepper::new(Arc::clone(&g)));
        let b = run_to_end(&mut NearestNeighborStepper::new(g));
        assert_eq!(a, b);
    }
}
