//! Populate integration tests.
//!
//! These run the full generate -> shape -> write pipeline against local
//! destinations (in-memory sinks and JSONL files), so no AWS account or
//! DynamoDB Local instance is needed.

mod cli_test;
mod failure_test;
mod jsonl_test;
mod process_test;

use clap::Parser;
use order_populate::CommonPopulateArgs;

#[derive(Parser)]
struct CommonCli {
    #[command(flatten)]
    common: CommonPopulateArgs,
}

/// Shared arguments for a fast, reproducible run of `count` orders.
pub fn common_args(count: u64, extra: &[&str]) -> CommonPopulateArgs {
    let count = count.to_string();
    let mut argv = vec!["test", "--order-count", count.as_str(), "--seed", "42"];
    for flag in ["--min-delay-ms", "--max-delay-ms"] {
        if !extra.contains(&flag) {
            argv.extend_from_slice(&[flag, "0"]);
        }
    }
    argv.extend_from_slice(extra);
    CommonCli::parse_from(argv).common
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("order_seed=debug,order_populate=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
