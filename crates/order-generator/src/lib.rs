//! Synthetic order generator for order-seed.
//!
//! Orders are built from a [`Vocabulary`] of word lists and a
//! [`RandomSource`]. Nothing here touches the network or the clock:
//! the caller passes the current time in, so a seeded source and a fixed
//! timestamp reproduce the same orders.
//!
//! ```text
//!  Vocabulary ──┐
//!               ▼
//!  ┌──────────────────┐      ┌──────────────────────┐
//!  │  OrderGenerator  │◄─────│ RandomSource (StdRng │
//!  └────────┬─────────┘      │  or ScriptedSource)  │
//!           │                └──────────────────────┘
//!           ▼
//!   Order { items: [OrderItem; 1..=8], total_amount, .. }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use order_generator::{OrderGenerator, RngSource, Vocabulary};
//!
//! let generator = OrderGenerator::new(Vocabulary::default());
//! let mut rng = RngSource::seeded(42);
//! let order = generator.generate_order(&mut rng, Utc::now());
//! assert!(order.total_is_consistent());
//! ```

pub mod generator;
pub mod model;
pub mod order_id;
pub mod random;
pub mod vocabulary;

pub use generator::{FieldProbabilities, OrderGenerator};
pub use model::{to_iso8601, Order, OrderItem};
pub use order_id::{generate_order_id, OrderIdPattern};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use vocabulary::{Vocabulary, VocabularyError, WordList};
