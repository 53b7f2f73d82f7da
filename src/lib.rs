//! order-seed library
//!
//! Seeds an orders table with realistic synthetic orders. Each order is
//! written as a primary record, a few auxiliary records and one record per
//! line item, all sharing the order's partition key.
//!
//! # CLI Usage
//!
//! ```bash
//! # 100 orders into the default table
//! order-seed populate dynamodb
//!
//! # Reproducible run against DynamoDB Local
//! order-seed populate dynamodb --endpoint-url http://localhost:8000 --seed 42
//!
//! # Inspect the records offline
//! order-seed populate jsonl --output orders.jsonl --order-count 10
//! ```

pub mod populate;

pub use populate::{populate_with, run_populate, PopulateSource};
