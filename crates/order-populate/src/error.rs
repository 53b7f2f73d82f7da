//! Error types for order population.

use order_generator::VocabularyError;
use thiserror::Error;

/// Errors that abort a populate run.
///
/// Per-order write failures are not errors at this level; they are
/// reported through [`crate::OrderOutcome`] and tallied in the metrics.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// The destination could not be reached before any write was attempted.
    #[error("failed to connect to {destination}: {cause:#}")]
    Connect {
        destination: String,
        cause: anyhow::Error,
    },

    /// Vocabulary could not be loaded.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Delay bounds are inverted.
    #[error("invalid delay range: min {min_ms}ms is greater than max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    /// Concurrency must allow at least one write in flight.
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,
}

/// Errors raised when reading a persisted record back into an order.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("record {sort_key} is not a primary record")]
    NotPrimary { sort_key: String },

    #[error("missing attribute '{0}'")]
    MissingAttribute(String),

    #[error("attribute '{name}' is not {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },

    #[error("attribute '{name}' has an invalid timestamp: {value}")]
    InvalidTimestamp { name: String, value: String },
}
