//! Core engine support shared by all steppers.
//!
//! - Deterministic RNG (PCG, explicit seeds)
//! - Jidoka tour guard for stop-on-error

pub mod jidoka;
pub mod rng;

pub use jidoka::{TourGuard, TourShape};
pub use rng::SimRng;
