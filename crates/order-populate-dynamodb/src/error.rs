//! Error types for the DynamoDB populator.

use thiserror::Error;

/// Errors converting between records and DynamoDB items.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DynamoDbPopulatorError {
    /// Item has no string partition or sort key.
    #[error("item is missing key attribute '{0}'")]
    MissingKey(String),

    /// Attribute type not produced by order-seed.
    #[error("attribute '{name}' has unsupported type {kind}")]
    UnsupportedAttribute { name: String, kind: String },

    /// A number attribute could not be parsed.
    #[error("attribute '{name}' has invalid number '{value}'")]
    InvalidNumber { name: String, value: String },
}
