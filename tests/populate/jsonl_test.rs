//! End-to-end populate into a JSONL file.

use super::{common_args, init_tracing};
use order_generator::Order;
use order_populate::{primary_to_order, OrderRecord, RecordKind, PRIMARY_SORT_KEY};
use order_populate_jsonl::JsonlPopulateArgs;
use order_seed::{run_populate, PopulateSource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ORDER_COUNT: u64 = 12;

fn jsonl_source(output: PathBuf, extra: &[&str]) -> PopulateSource {
    PopulateSource::Jsonl {
        args: JsonlPopulateArgs {
            output,
            append: false,
            table_name: "orders-table".to_string(),
            common: common_args(ORDER_COUNT, extra),
        },
    }
}

fn read_records(path: &Path) -> Vec<OrderRecord> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_jsonl_populate_writes_complete_orders() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("orders.jsonl");

    let metrics = run_populate(jsonl_source(output.clone(), &[])).await?;

    assert_eq!(metrics.successful_orders(), ORDER_COUNT);
    let records = read_records(&output);
    assert_eq!(records.len() as u64, metrics.records_written);

    let mut by_order: BTreeMap<String, Vec<OrderRecord>> = BTreeMap::new();
    for record in records {
        by_order.entry(record.pk.clone()).or_default().push(record);
    }
    assert_eq!(by_order.len() as u64, ORDER_COUNT);

    for (pk, group) in &by_order {
        assert_eq!(group[0].sk, PRIMARY_SORT_KEY, "{pk}: primary must come first");
        let order: Order = primary_to_order(&group[0])?;
        assert_eq!(format!("ORDER#{}", order.order_id), *pk);
        assert!(order.total_is_consistent());

        let auxiliary = group
            .iter()
            .filter(|r| matches!(r.kind(), Some(RecordKind::Auxiliary(_))))
            .count();
        assert!((2..=4).contains(&auxiliary), "{pk}: {auxiliary} auxiliary records");

        let items = group
            .iter()
            .filter(|r| matches!(r.kind(), Some(RecordKind::Item(_))))
            .count();
        assert_eq!(items, order.items.len());
        assert_eq!(group.len(), 1 + auxiliary + items);
    }

    Ok(())
}

#[tokio::test]
async fn test_same_seed_same_orders() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let temp_dir = TempDir::new()?;
    let first = temp_dir.path().join("first.jsonl");
    let second = temp_dir.path().join("second.jsonl");

    run_populate(jsonl_source(first.clone(), &[])).await?;
    run_populate(jsonl_source(second.clone(), &[])).await?;

    let customers = |path: &Path| -> Vec<String> {
        read_records(path)
            .iter()
            .filter(|r| r.sk == PRIMARY_SORT_KEY)
            .map(|r| primary_to_order(r).unwrap().customer_name)
            .collect()
    };
    assert_eq!(customers(&first), customers(&second));

    Ok(())
}

#[tokio::test]
async fn test_dry_run_leaves_no_file() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("orders.jsonl");

    let metrics = run_populate(jsonl_source(output.clone(), &["--dry-run"])).await?;

    assert_eq!(metrics.successful_orders(), ORDER_COUNT);
    assert!(!output.exists());

    Ok(())
}

#[tokio::test]
async fn test_unwritable_output_fails_before_generating() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("no-such-dir").join("orders.jsonl");

    let err = run_populate(jsonl_source(output, &[])).await.unwrap_err();

    assert!(format!("{err:#}").contains("Failed to open output file"));
}
