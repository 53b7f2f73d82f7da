//! Argument parsing for the populate subcommands.

use clap::Parser;
use order_seed::PopulateSource;
use std::path::PathBuf;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    source: PopulateSource,
}

#[test]
fn test_dynamodb_flags() {
    let cli = TestCli::parse_from([
        "order-seed",
        "dynamodb",
        "--region",
        "us-east-1",
        "--table-name",
        "orders-staging",
        "--order-count",
        "25",
        "--seed",
        "9",
        "--concurrency",
        "4",
    ]);

    match cli.source {
        PopulateSource::DynamoDb { args } => {
            assert_eq!(args.region, "us-east-1");
            assert_eq!(args.table_name, "orders-staging");
            assert_eq!(args.common.order_count, 25);
            assert_eq!(args.common.seed, Some(9));
            assert_eq!(args.common.concurrency, 4);
            assert!(!args.common.dry_run);
        }
        other => panic!("expected dynamodb, got {other:?}"),
    }
}

#[test]
fn test_jsonl_requires_output() {
    assert!(TestCli::try_parse_from(["order-seed", "jsonl"]).is_err());

    let cli = TestCli::parse_from(["order-seed", "jsonl", "--output", "out.jsonl", "--dry-run"]);
    match cli.source {
        PopulateSource::Jsonl { args } => {
            assert_eq!(args.output, PathBuf::from("out.jsonl"));
            assert!(args.common.dry_run);
        }
        other => panic!("expected jsonl, got {other:?}"),
    }
}

#[test]
fn test_unknown_destination_is_rejected() {
    assert!(TestCli::try_parse_from(["order-seed", "mongodb"]).is_err());
}
