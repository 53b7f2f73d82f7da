//! DynamoDB destination for order-seed.
//!
//! Records become items keyed by `pk`/`sk` strings. Text maps to `S`,
//! integers and decimals to `N`, item lists to `L` of `M`.

pub mod args;
pub mod error;
pub mod forward;
pub mod reverse;
pub mod sink;

pub use args::{DynamoDbPopulateArgs, DEFAULT_REGION, DEFAULT_TABLE_NAME};
pub use error::DynamoDbPopulatorError;
pub use forward::{record_to_item, DynamoValue};
pub use reverse::{attribute_to_value, item_to_record};
pub use sink::{DynamoDbConnector, DynamoDbSink};
