//! Command-line interface for order-seed
//!
//! ```bash
//! AWS_REGION=eu-west-1 DYNAMODB_TABLE_NAME=orders-dev ORDER_COUNT=25 \
//!   order-seed populate dynamodb
//!
//! order-seed populate dynamodb --dry-run --seed 7
//! ```
//!
//! Settings are read from flags, then environment variables, then a `.env`
//! file in the working directory.

use clap::{Parser, Subcommand};
use order_seed::{run_populate, PopulateSource};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "order-seed")]
#[command(about = "Seed a key-value orders table with synthetic orders")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate orders and write them to a destination
    Populate {
        #[command(subcommand)]
        source: PopulateSource,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Invalid arguments exit 1; --help and --version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    match cli.command {
        Commands::Populate { source } => {
            run_populate(source).await?;
        }
    }

    Ok(())
}
