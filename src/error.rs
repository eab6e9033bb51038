//! Error types for tsp-compare.
//!
//! Every fallible operation returns `Result<T, CompareError>`. Stepper
//! exhaustion is not an error: it is reported through `advance()` returning
//! `None` and the stepper's `is_exhausted()` flag.

use thiserror::Error;

/// Result type alias for tsp-compare operations.
pub type CompareResult<T> = Result<T, CompareError>;

/// Unified error type for all tsp-compare operations.
#[derive(Debug, Error)]
pub enum CompareError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter, rejected at setup.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Fatal Errors =====
    /// A produced tour broke the permutation invariant.
    ///
    /// This is a programming error; the run must halt.
    #[error("Invariant violation in {algorithm}: {message}")]
    InvariantViolation {
        /// Label of the algorithm that produced the tour.
        algorithm: String,
        /// What was wrong with the tour.
        message: String,
    },

    // ===== I/O Errors =====
    /// File or stream I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invariant violation for the named algorithm.
    #[must_use]
    pub fn invariant(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Check if this error is fatal (requires the run to stop immediately).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
