//! Populate command runner.

use anyhow::Context;
use clap::Subcommand;
use order_generator::RngSource;
use order_populate::{
    CommonPopulateArgs, DelayRange, DryRunConnector, PopulateMetrics, Populator, SinkConnector,
};
use order_populate_dynamodb::DynamoDbPopulateArgs;
use order_populate_jsonl::JsonlPopulateArgs;
use tracing::info;

/// Destination to populate with synthetic orders
#[derive(Subcommand, Clone, Debug)]
pub enum PopulateSource {
    /// Write orders to a DynamoDB table
    #[command(name = "dynamodb")]
    DynamoDb {
        #[command(flatten)]
        args: DynamoDbPopulateArgs,
    },
    /// Write order records to a JSONL file
    #[command(name = "jsonl")]
    Jsonl {
        #[command(flatten)]
        args: JsonlPopulateArgs,
    },
}

/// Run populate command against the selected destination.
pub async fn run_populate(source: PopulateSource) -> anyhow::Result<PopulateMetrics> {
    match source {
        PopulateSource::DynamoDb { args } => {
            info!(
                "Populating DynamoDB table '{}' in {} with {} orders",
                args.table_name, args.region, args.common.order_count
            );
            populate_with(&args.common, &args.table_name, &args.connector()).await
        }
        PopulateSource::Jsonl { args } => {
            info!(
                "Writing {} orders to {}",
                args.common.order_count,
                args.output.display()
            );
            populate_with(&args.common, &args.table_name, &args.connector()).await
        }
    }
}

/// Populate `table` through `connector` using the shared arguments.
///
/// Returns an error only when configuration is invalid or the connection
/// cannot be established. Orders that fail to write are counted in the
/// returned metrics and do not fail the run.
pub async fn populate_with<C: SinkConnector>(
    common: &CommonPopulateArgs,
    table: &str,
    connector: &C,
) -> anyhow::Result<PopulateMetrics> {
    let generator = common
        .order_generator()
        .context("Failed to load vocabulary")?;
    let mut config = common.populate_config(table)?;
    let rng = RngSource::from_optional_seed(common.seed);

    match common.seed {
        Some(seed) => info!("Using seed {seed}"),
        None => info!("No seed given, orders will differ on every run"),
    }

    if common.dry_run {
        info!(
            "[DRY-RUN] Would populate {} with {} orders",
            connector.destination(),
            common.order_count
        );
        config = config.with_delay(DelayRange::none());
        let mut populator = Populator::new(generator, rng, config)?;
        let metrics = populator.run(&DryRunConnector).await?;
        info!("[DRY-RUN] Configuration validated successfully");
        return Ok(metrics);
    }

    let mut populator = Populator::new(generator, rng, config)?;
    let metrics = populator.run(connector).await?;
    Ok(metrics)
}
