//! City coordinates and tour length.
//!
//! # Governing Equations
//!
//! ```text
//! Distance:     d(a, b) = √((xₐ - x_b)² + (yₐ - y_b)²)
//! Tour Length:  L(π) = Σᵢ d(π(i), π(i+1)) + d(π(n), π(1))
//! ```
//!
//! A [`Geometry`] is built once per run and shared read-only by every
//! stepper. Callers pass valid indices by construction, so the queries are
//! infallible.

use crate::engine::rng::SimRng;
use crate::error::{CompareError, CompareResult};
use serde::{Deserialize, Serialize};

/// A 2D point representing a city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Create a new city at coordinates (x, y).
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Immutable city set with precomputed pairwise distances.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    cities: Vec<City>,
    distance_matrix: Vec<Vec<f64>>,
}

impl Geometry {
    /// Build a geometry from explicit cities.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if fewer than two cities are given or
    /// any coordinate is not finite.
    pub fn new(cities: Vec<City>) -> CompareResult<Self> {
        if cities.len() < 2 {
            return Err(CompareError::config(format!(
                "a tour needs at least 2 cities, got {}",
                cities.len()
            )));
        }
        if let Some(i) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(CompareError::config(format!(
                "city {i} has a non-finite coordinate"
            )));
        }

        let distance_matrix = cities
            .iter()
            .map(|a| cities.iter().map(|b| a.distance_to(b)).collect())
            .collect();

        Ok(Self {
            cities,
            distance_matrix,
        })
    }

    /// Place `n` cities uniformly in `[0, bound) × [0, bound)`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `n < 2` or `bound` is not a positive
    /// finite number.
    pub fn random(n: usize, bound: f64, rng: &mut SimRng) -> CompareResult<Self> {
        if !(bound.is_finite() && bound > 0.0) {
            return Err(CompareError::config(format!(
                "coordinate bound must be positive, got {bound}"
            )));
        }
        let cities = (0..n)
            .map(|_| {
                let x = rng.gen_range_f64(0.0, bound);
                let y = rng.gen_range_f64(0.0, bound);
                City::new(x, y)
            })
            .collect();
        Self::new(cities)
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always false: construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The cities, in index order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Distance between cities `i` and `j`.
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    /// Closed-cycle length of `tour`. Tours shorter than two cities have
    /// length 0.
    #[must_use]
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(tour[tour.len() - 1], tour[0])
    }
}
