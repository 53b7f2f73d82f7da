//! JSONL destination for order-seed.
//!
//! Every record is written as one JSON object per line with `pk`, `sk` and
//! its attributes at the top level, so a line deserializes straight back
//! into an `OrderRecord`.

pub mod args;
pub mod error;
pub mod sink;

pub use args::JsonlPopulateArgs;
pub use error::JsonlPopulatorError;
pub use sink::{JsonlConnector, JsonlSink, DEFAULT_BUFFER_SIZE};
