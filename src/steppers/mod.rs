//! Resumable TSP strategies.
//!
//! Each strategy is an explicit state machine: [`Stepper::advance`] runs one
//! unit of work and returns a [`StepResult`] snapshot, or `None` once the
//! strategy is exhausted. One unit is one greedy pick, one permutation
//! check, one accepted 2-opt move, or one full generation.
//!
//! # Architecture
//!
//! ```text
//! Arc<Geometry> ──► NearestNeighbor ──(complete tour)──► TwoOpt
//!              ├──► BruteForce
//!              └──► Genetic (seeded SimRng)
//! ```

pub mod brute_force;
pub mod genetic;
pub mod nearest_neighbor;
pub mod two_opt;

pub use brute_force::BruteForceStepper;
pub use genetic::{GeneticParams, GeneticStepper};
pub use nearest_neighbor::NearestNeighborStepper;
pub use two_opt::TwoOptStepper;

use serde::{Deserialize, Serialize};

/// The four compared strategies, in tick order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    NearestNeighbor,
    BruteForce,
    TwoOpt,
    Genetic,
}

impl AlgorithmKind {
    /// All kinds in the order the orchestrator advances them.
    pub const ALL: [Self; 4] = [
        Self::NearestNeighbor,
        Self::BruteForce,
        Self::TwoOpt,
        Self::Genetic,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "Nearest Neighbor",
            Self::BruteForce => "Brute Force",
            Self::TwoOpt => "2-Opt",
            Self::Genetic => "Genetic Algorithm",
        }
    }

    /// One-line description of the strategy.
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::NearestNeighbor => {
                "Greedy algorithm choosing closest next city step-by-step."
            }
            Self::BruteForce => "Checks every possible path to find the shortest.",
            Self::TwoOpt => "Improves a route by swapping two edges iteratively.",
            Self::Genetic => "Evolutionary approach using crossover and mutation.",
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Best-so-far record carried by strategies that track one separately from
/// the tour they just examined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSoFar {
    pub tour: Vec<usize>,
    pub distance: f64,
}

/// Snapshot yielded by one advance. Read once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Tour produced or examined by this step.
    pub tour: Vec<usize>,
    /// Attempts so far (picks, permutations, accepted moves, or generations).
    pub attempts: u64,
    /// Best tour so far, when tracked separately from `tour`.
    pub best: Option<BestSoFar>,
}

impl StepResult {
    /// Result with no separate best record.
    #[must_use]
    pub fn new(tour: Vec<usize>, attempts: u64) -> Self {
        Self {
            tour,
            attempts,
            best: None,
        }
    }
}

/// Read-only view of a stepper's internal progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmState {
    pub current_tour: Vec<usize>,
    pub attempts: u64,
    pub best_tour: Option<Vec<usize>>,
    pub best_distance: Option<f64>,
    pub exhausted: bool,
}

/// A resumable search procedure advanced one step at a time.
pub trait Stepper {
    /// Which strategy this is.
    fn kind(&self) -> AlgorithmKind;

    /// Run one unit of work.
    ///
    /// Returns `None` once exhausted; further calls keep returning `None`
    /// and leave the state untouched.
    fn advance(&mut self) -> Option<StepResult>;

    /// Whether the stepper has finished.
    fn is_exhausted(&self) -> bool;

    /// Snapshot of the internal state.
    fn state(&self) -> AlgorithmState;
}
