//! CLI argument definitions for JSONL populator.

use crate::sink::JsonlConnector;
use clap::Args;
use order_populate::CommonPopulateArgs;
use std::path::PathBuf;

/// JSONL-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct JsonlPopulateArgs {
    /// Output file, one record per line
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Append to the output file instead of truncating it
    #[arg(long)]
    pub append: bool,

    /// Logical table name used in log lines
    #[arg(long, env = "DYNAMODB_TABLE_NAME", default_value = "orders-table")]
    pub table_name: String,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}

impl JsonlPopulateArgs {
    pub fn connector(&self) -> JsonlConnector {
        JsonlConnector::new(&self.output).with_append(self.append)
    }
}
