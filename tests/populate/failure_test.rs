//! Per-order failures are counted; connection failures abort the run.

use super::{common_args, init_tracing};
use anyhow::{bail, Result};
use order_populate::{OrderRecord, RecordSink, SinkConnector, PRIMARY_SORT_KEY};
use order_seed::populate_with;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Rejects every record of the n-th order it sees.
#[derive(Default)]
struct RejectNthOrder {
    reject: usize,
    primaries_seen: AtomicUsize,
    rejected_pk: Mutex<Option<String>>,
    written: Mutex<Vec<OrderRecord>>,
}

#[async_trait::async_trait]
impl RecordSink for RejectNthOrder {
    async fn put_record(&self, _table: &str, record: &OrderRecord) -> Result<()> {
        if record.sk == PRIMARY_SORT_KEY {
            let seen = self.primaries_seen.fetch_add(1, Ordering::SeqCst) + 1;
            if seen == self.reject {
                *self.rejected_pk.lock().unwrap() = Some(record.pk.clone());
            }
        }
        if self.rejected_pk.lock().unwrap().as_deref() == Some(record.pk.as_str()) {
            bail!("ProvisionedThroughputExceededException");
        }
        self.written.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct SharedSink(Arc<RejectNthOrder>);

#[async_trait::async_trait]
impl RecordSink for SharedSink {
    async fn put_record(&self, table: &str, record: &OrderRecord) -> Result<()> {
        self.0.put_record(table, record).await
    }
}

struct SharedConnector(Arc<RejectNthOrder>);

#[async_trait::async_trait]
impl SinkConnector for SharedConnector {
    type Sink = SharedSink;

    fn destination(&self) -> String {
        "flaky table".to_string()
    }

    async fn connect(&self) -> Result<SharedSink> {
        Ok(SharedSink(self.0.clone()))
    }
}

/// Counts puts into a shared counter.
struct CountingSink(Arc<AtomicUsize>);

#[async_trait::async_trait]
impl RecordSink for CountingSink {
    async fn put_record(&self, _table: &str, _record: &OrderRecord) -> Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Counts connection attempts, all of which fail. A sink it handed out
/// would count its puts in `puts`.
#[derive(Default)]
struct Unreachable {
    connects: AtomicUsize,
    puts: Arc<AtomicUsize>,
}

impl Unreachable {
    fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SinkConnector for Unreachable {
    type Sink = CountingSink;

    fn destination(&self) -> String {
        "DynamoDB table 'missing'".to_string()
    }

    async fn connect(&self) -> Result<CountingSink> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        bail!("ResourceNotFoundException: Requested resource not found")
    }
}

#[tokio::test]
async fn test_failed_order_does_not_stop_the_run() {
    init_tracing();
    let sink = Arc::new(RejectNthOrder {
        reject: 2,
        ..Default::default()
    });

    let metrics = populate_with(
        &common_args(3, &[]),
        "orders-table",
        &SharedConnector(sink.clone()),
    )
    .await
    .expect("per-order failures must not fail the run");

    assert_eq!(metrics.orders_attempted, 3);
    assert_eq!(metrics.successful_orders(), 2);
    assert_eq!(metrics.orders_failed, 1);

    let rejected = sink.rejected_pk.lock().unwrap().clone().unwrap();
    let written = sink.written.lock().unwrap();
    assert!(written.iter().all(|r| r.pk != rejected));
    let primaries = written.iter().filter(|r| r.sk == PRIMARY_SORT_KEY).count();
    assert_eq!(primaries, 2);
}

#[tokio::test]
async fn test_connection_failure_is_fatal() {
    init_tracing();
    let connector = Unreachable::default();

    let err = populate_with(&common_args(5, &[]), "missing", &connector)
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("DynamoDB table 'missing'"), "{message}");
    assert!(message.contains("ResourceNotFoundException"), "{message}");
    assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
    assert_eq!(connector.puts(), 0);
}

#[tokio::test]
async fn test_dry_run_never_connects() {
    init_tracing();
    let connector = Unreachable::default();

    let metrics = populate_with(&common_args(4, &["--dry-run"]), "orders-table", &connector)
        .await
        .expect("dry run must not touch the destination");

    assert_eq!(metrics.successful_orders(), 4);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    assert_eq!(connector.puts(), 0);
}

#[tokio::test]
async fn test_invalid_delay_range_is_rejected() {
    let args = common_args(1, &["--min-delay-ms", "500", "--max-delay-ms", "10"]);

    let connector = Unreachable::default();

    let err = populate_with(&args, "orders-table", &connector)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"), "{err}");
    assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
}
