//! Record shaping and the populate loop shared by order-seed destinations.
//!
//! Each generated order is decomposed into several independent records
//! (primary, auxiliary, one per item) which are written one at a time
//! through a [`RecordSink`]. Destination crates provide the sink and its
//! [`SinkConnector`]; this crate owns everything else.
//!
//! ```text
//! OrderGenerator ──► Order ──► shape_order ──► [OrderRecord]
//!                                                   │
//!                                   write_order ◄───┘
//!                                        │
//!                                        ▼
//!                                   RecordSink (DynamoDB, JSONL, dry-run)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let config = PopulateConfig::new("orders-table", 100);
//! let mut populator = Populator::new(OrderGenerator::default(), RngSource::seeded(42), config)?;
//! let metrics = populator.run(&connector).await?;
//! println!("{} orders written", metrics.successful_orders());
//! ```

pub mod args;
pub mod error;
pub mod populator;
pub mod record;
pub mod shape;
pub mod sink;
pub mod write;

pub use args::CommonPopulateArgs;
pub use error::{PopulateError, RecordError};
pub use populator::{DelayRange, PopulateConfig, PopulateMetrics, Populator};
pub use record::{
    item_sort_key, partition_key, AuxiliaryKind, OrderRecord, RecordKind, RecordValue,
    PARTITION_KEY, PRIMARY_SORT_KEY, SORT_KEY,
};
pub use shape::{primary_to_order, shape_order};
pub use sink::{DryRunConnector, DryRunSink, RecordSink, SinkConnector};
pub use write::{write_order, OrderOutcome};
