//! Jidoka (自働化) - stop the line on a broken tour.
//!
//! Every tour a stepper hands out is checked before it reaches a renderer.
//! A complete tour must be a permutation of `0..n`; a partial tour must be
//! a repeat-free prefix of one. Any violation is a programming error and is
//! reported as a fatal [`CompareError::InvariantViolation`].

use crate::error::{CompareError, CompareResult};

/// Shape a tour is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourShape {
    /// Exactly `n` cities, each once.
    Complete,
    /// Between 1 and `n` cities, no repeats.
    Partial,
}

/// Guard that validates tours against the permutation invariant.
#[derive(Debug, Clone, Copy)]
pub struct TourGuard {
    n: usize,
}

impl TourGuard {
    /// Create a guard for a city set of size `n`.
    #[must_use]
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    /// Check `tour` has the given shape.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming `algorithm` when the tour has the
    /// wrong length, an out-of-range index, or a repeated city.
    pub fn check(&self, algorithm: &str, tour: &[usize], shape: TourShape) -> CompareResult<()> {
        match shape {
            TourShape::Complete if tour.len() != self.n => {
                return Err(CompareError::invariant(
                    algorithm,
                    format!("complete tour has {} cities, expected {}", tour.len(), self.n),
                ));
            }
            TourShape::Partial if tour.is_empty() || tour.len() > self.n => {
                return Err(CompareError::invariant(
                    algorithm,
                    format!("partial tour has {} cities (n = {})", tour.len(), self.n),
                ));
            }
            _ => {}
        }

        let mut seen = vec![false; self.n];
        for &city in tour {
            if city >= self.n {
                return Err(CompareError::invariant(
                    algorithm,
                    format!("city index {city} out of range 0..{}", self.n),
                ));
            }
            if seen[city] {
                return Err(CompareError::invariant(
                    algorithm,
                    format!("city {city} appears more than once"),
                ));
            }
            seen[city] = true;
        }
        Ok(())
    }
}
