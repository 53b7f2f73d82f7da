//! Error types for JSONL populator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during JSONL population.
#[derive(Error, Debug)]
pub enum JsonlPopulatorError {
    /// Output file could not be opened.
    #[error("Failed to open output file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A previous write panicked while holding the writer.
    #[error("Output writer is poisoned")]
    Poisoned,
}
