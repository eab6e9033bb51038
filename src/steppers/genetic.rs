//! Generational genetic algorithm with elitism.
//!
//! One step is one generation:
//!
//! 1. Sort the population by tour length (stable).
//! 2. Report the best individual.
//! 3. Keep the best half unchanged.
//! 4. Refill with children of two distinct parents drawn from the top
//!    `parent_pool` individuals: ordered crossover, then per-gene swap
//!    mutation.
//!
//! All randomness comes from the injected [`SimRng`], so a fixed seed
//! replays the same generations.

use super::{AlgorithmKind, AlgorithmState, StepResult, Stepper};
use crate::engine::rng::SimRng;
use crate::error::{CompareError, CompareResult};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed per-run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    pub population_size: usize,
    pub generations: u64,
    pub mutation_rate: f64,
    pub parent_pool: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 100,
            mutation_rate: 0.1,
            parent_pool: 10,
        }
    }
}

impl GeneticParams {
    /// Reject parameter sets the algorithm cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the population is smaller than 2,
    /// the generation budget is zero, the mutation rate is outside `(0, 1]`,
    /// or the parent pool is smaller than 2.
    pub fn validate(&self) -> CompareResult<()> {
        if self.population_size < 2 {
            return Err(CompareError::config(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(CompareError::config("generation budget must be positive"));
        }
        if !(self.mutation_rate > 0.0 && self.mutation_rate <= 1.0) {
            return Err(CompareError::config(format!(
                "mutation rate must be in (0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.parent_pool < 2 {
            return Err(CompareError::config(format!(
                "parent pool must hold at least 2 individuals, got {}",
                self.parent_pool
            )));
        }
        Ok(())
    }

    /// Number of top individuals parents are drawn from.
    #[must_use]
    pub fn effective_pool(&self) -> usize {
        self.parent_pool.min(self.population_size)
    }
}

/// Ordered crossover with explicit cut points.
///
/// Copies `parent1[start..=end]` verbatim and fills the remaining positions
/// with `parent2`'s other cities in `parent2` order: `start` of them before
/// the segment, the rest after it.
///
/// # Panics
///
/// Panics if `start > end` or `end >= parent1.len()`.
#[must_use]
pub fn ordered_crossover(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    assert!(start <= end && end < parent1.len(), "invalid cut points");
    let segment = &parent1[start..=end];

    let mut in_segment = vec![false; parent1.len()];
    for &city in segment {
        in_segment[city] = true;
    }
    let rest: Vec<usize> = parent2.iter().copied().filter(|&c| !in_segment[c]).collect();

    let mut child = Vec::with_capacity(parent1.len());
    child.extend_from_slice(&rest[..start]);
    child.extend_from_slice(segment);
    child.extend_from_slice(&rest[start..]);
    child
}

/// Swap each position, with probability `rate`, with a uniformly chosen one.
pub fn swap_mutation(route: &mut [usize], rate: f64, rng: &mut SimRng) {
    for i in 0..route.len() {
        if rng.gen_f64() < rate {
            let j = rng.gen_index(route.len());
            route.swap(i, j);
        }
    }
}

/// Evolves a population one generation per step.
#[derive(Debug, Clone)]
pub struct GeneticStepper {
    geometry: Arc<Geometry>,
    params: GeneticParams,
    population: Vec<Vec<usize>>,
    generation: u64,
    best: Vec<usize>,
    best_length: Option<f64>,
    rng: SimRng,
}

impl GeneticStepper {
    /// Create a stepper with a uniformly shuffled initial population.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `params` fail validation.
    pub fn new(geometry: Arc<Geometry>, params: GeneticParams, mut rng: SimRng) -> CompareResult<Self> {
        params.validate()?;
        let n = geometry.len();
        log::debug!(
            "genetic: seed={} population={} generations={}",
            rng.master_seed(),
            params.population_size,
            params.generations
        );
        let population = (0..params.population_size)
            .map(|_| rng.permutation(n))
            .collect();

        Ok(Self {
            geometry,
            params,
            population,
            generation: 0,
            best: Vec::new(),
            best_length: None,
            rng,
        })
    }

    /// Generations completed.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Current population (unsorted between steps).
    #[must_use]
    pub fn population(&self) -> &[Vec<usize>] {
        &self.population
    }

    /// Sort the population ascending by tour length, keeping ties in order.
    fn sort_population(&mut self) {
        let geometry = &self.geometry;
        let mut scored: Vec<(f64, Vec<usize>)> = self
            .population
            .drain(..)
            .map(|route| (geometry.tour_length(&route), route))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.best_length = scored.first().map(|(length, _)| *length);
        self.population = scored.into_iter().map(|(_, route)| route).collect();
    }

    fn breed(&mut self) -> Vec<usize> {
        let n = self.geometry.len();
        let pool = self.params.effective_pool();
        // validate() guarantees pool >= 2; n >= 2 is a Geometry invariant
        let (a, b) = self.rng.distinct_pair(pool);
        let (c1, c2) = self.rng.distinct_pair(n);
        let (start, end) = (c1.min(c2), c1.max(c2));

        let mut child = ordered_crossover(&self.population[a], &self.population[b], start, end);
        swap_mutation(&mut child, self.params.mutation_rate, &mut self.rng);
        child
    }
}

impl Stepper for GeneticStepper {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Genetic
    }

    fn advance(&mut self) -> Option<StepResult> {
        if self.is_exhausted() {
            return None;
        }

        self.sort_population();
        self.generation += 1;
        self.best = self.population[0].clone();

        let size = self.params.population_size;
        let mut next: Vec<Vec<usize>> = self.population[..size / 2].to_vec();
        while next.len() < size {
            let child = self.breed();
            next.push(child);
        }
        self.population = next;

        log::debug!(
            "genetic: generation={} best={:.3}",
            self.generation,
            self.best_length.unwrap_or(f64::NAN)
        );
        if self.is_exhausted() {
            log::info!("genetic: finished {} generations", self.generation);
        }

        Some(StepResult::new(self.best.clone(), self.generation))
    }

    fn is_exhausted(&self) -> bool {
        self.generation >= self.params.generations
    }

    fn state(&self) -> AlgorithmState {
        AlgorithmState {
            current_tour: self.best.clone(),
            attempts: self.generation,
            best_tour: (!self.best.is_empty()).then(|| self.best.clone()),
            best_distance: self.best_length,
            exhausted: self.is_exhausted(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::steppers::test_support::is_permutation;
    use proptest::prelude::*;

    fn perm_pair(max_n: usize) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (2..max_n).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (Just(base.clone()).prop_shuffle(), Just(base).prop_shuffle())
        })
    }

    proptest! {
        /// Ordered crossover yields a permutation for every cut pair.
        #[test]
        fn prop_crossover_preserves_permutation((p1, p2) in perm_pair(16)) {
            let n = p1.len();
            for start in 0..n {
                for end in start..n {
                    let child = ordered_crossover(&p1, &p2, start, end);
                    prop_assert!(is_permutation(&child, n));
                    prop_assert_eq!(&child[start..=end], &p1[start..=end]);
                }
            }
        }

        /// Every individual of every generation stays a permutation.
        #[test]
        fn prop_population_stays_valid(seed in 0u64..2_000, n in 2usize..10) {
            let mut rng = SimRng::new(seed);
            let g = Arc::new(Geometry::random(n, 100.0, &mut rng).unwrap());
            let params = GeneticParams { generations: 10, ..Default::default() };
            let mut ga = GeneticStepper::new(g, params, rng).unwrap();
            while ga.advance().is_some() {
                for route in ga.population() {
                    prop_assert!(is_permutation(route, n));
                }
            }
        }
    }
}
