//! Common CLI argument definitions shared by all populators.

use crate::error::PopulateError;
use crate::populator::{DelayRange, PopulateConfig};
use clap::Args;
use order_generator::{OrderGenerator, Vocabulary};
use std::path::PathBuf;

/// Common arguments shared by all populators.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Number of orders to generate
    #[arg(long, env = "ORDER_COUNT", default_value = "100")]
    pub order_count: u64,

    /// Random seed for deterministic generation (omit for a fresh random run)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a YAML file overriding the built-in word lists
    #[arg(long, value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,

    /// Lower bound of the random pause between orders, in milliseconds
    #[arg(long, default_value = "50")]
    pub min_delay_ms: u64,

    /// Upper bound of the random pause between orders, in milliseconds
    #[arg(long, default_value = "300")]
    pub max_delay_ms: u64,

    /// Number of orders written at the same time
    #[arg(long, default_value = "1")]
    pub concurrency: usize,

    /// Dry-run mode: generate and log records without connecting to the destination
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonPopulateArgs {
    /// Build the order generator, loading the vocabulary file when given.
    pub fn order_generator(&self) -> Result<OrderGenerator, PopulateError> {
        let vocabulary = match &self.vocabulary {
            Some(path) => Vocabulary::from_file(path)?,
            None => Vocabulary::default(),
        };
        Ok(OrderGenerator::new(vocabulary))
    }

    /// Populate settings for writing to `table`.
    pub fn populate_config(&self, table: &str) -> Result<PopulateConfig, PopulateError> {
        let delay = DelayRange::new(self.min_delay_ms, self.max_delay_ms)?;
        if self.concurrency == 0 {
            return Err(PopulateError::InvalidConcurrency);
        }
        Ok(PopulateConfig::new(table, self.order_count)
            .with_delay(delay)
            .with_concurrency(self.concurrency))
    }
}
