//! Generate-write-wait loop.

use crate::error::PopulateError;
use crate::record::OrderRecord;
use crate::shape::shape_order;
use crate::sink::{RecordSink, SinkConnector};
use crate::write::{write_order, OrderOutcome};
use chrono::Utc;
use futures::StreamExt;
use order_generator::{OrderGenerator, RandomSource};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default lower bound of the pause between orders.
pub const DEFAULT_MIN_DELAY_MS: u64 = 50;
/// Default upper bound of the pause between orders.
pub const DEFAULT_MAX_DELAY_MS: u64 = 300;

/// Uniform pause drawn after each order except the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, PopulateError> {
        if min_ms > max_ms {
            return Err(PopulateError::InvalidDelayRange { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = rng.int_in_range(self.min_ms as i64, self.max_ms as i64);
        Duration::from_millis(ms.max(0) as u64)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

/// Settings for one populate run.
#[derive(Debug, Clone)]
pub struct PopulateConfig {
    /// Destination table or collection.
    pub table: String,
    /// Number of orders to generate.
    pub order_count: u64,
    pub delay: DelayRange,
    /// Orders written at the same time. 1 keeps the loop strictly sequential.
    pub concurrency: usize,
}

impl PopulateConfig {
    pub fn new(table: impl Into<String>, order_count: u64) -> Self {
        Self {
            table: table.into(),
            order_count,
            delay: DelayRange::default(),
            concurrency: 1,
        }
    }

    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Metrics from a populate run.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    pub orders_attempted: u64,
    /// Orders with every record written.
    pub orders_complete: u64,
    /// Orders whose primary record was written but a later record failed.
    pub orders_partial: u64,
    /// Orders whose primary record failed.
    pub orders_failed: u64,
    pub records_written: u64,
    pub total_duration: Duration,
    /// Time spent generating and shaping orders.
    pub generation_duration: Duration,
    /// Time spent in sink calls, summed over orders.
    pub insert_duration: Duration,
}

impl PopulateMetrics {
    /// Successful orders (all records written).
    pub fn successful_orders(&self) -> u64 {
        self.orders_complete
    }

    pub fn orders_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.orders_complete as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    fn record(&mut self, outcome: &OrderOutcome) {
        self.orders_attempted += 1;
        self.records_written += outcome.records_written() as u64;
        match outcome {
            OrderOutcome::Complete { .. } => self.orders_complete += 1,
            OrderOutcome::Partial { .. } => self.orders_partial += 1,
            OrderOutcome::Failed { .. } => self.orders_failed += 1,
        }
    }
}

/// An order ready to be written.
struct PreparedOrder {
    sequence: u64,
    order_id: String,
    customer_name: String,
    total_amount: Decimal,
    records: Vec<OrderRecord>,
    /// Pause after writing; `None` for the last order.
    pause: Option<Duration>,
    generation_time: Duration,
}

/// Drives generation and writing of orders.
pub struct Populator<R> {
    generator: OrderGenerator,
    rng: R,
    config: PopulateConfig,
}

impl<R: RandomSource + Send> Populator<R> {
    pub fn new(
        generator: OrderGenerator,
        rng: R,
        config: PopulateConfig,
    ) -> Result<Self, PopulateError> {
        if config.concurrency == 0 {
            return Err(PopulateError::InvalidConcurrency);
        }
        Ok(Self {
            generator,
            rng,
            config,
        })
    }

    /// Connect, then populate.
    ///
    /// A connection failure is the only error; no record is attempted in
    /// that case. Per-order failures are counted in the returned metrics.
    pub async fn run<C: SinkConnector>(
        &mut self,
        connector: &C,
    ) -> Result<PopulateMetrics, PopulateError> {
        let destination = connector.destination();
        let sink = connector
            .connect()
            .await
            .map_err(|cause| PopulateError::Connect {
                destination: destination.clone(),
                cause,
            })?;
        info!("Connected to {}", destination);

        Ok(self.populate(&sink).await)
    }

    /// Generate and write `order_count` orders through `sink`.
    pub async fn populate<S: RecordSink + ?Sized>(&mut self, sink: &S) -> PopulateMetrics {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        let Self {
            generator,
            rng,
            config,
        } = self;
        let count = config.order_count;
        let table = config.table.as_str();
        let delay = config.delay;

        info!(
            "Populating '{}' with {} orders (concurrency: {})",
            table, count, config.concurrency
        );

        // Generation stays on this task so the random source is never shared;
        // only the writes run concurrently.
        let prepared = futures::stream::iter(1..=count).map(|sequence| {
            let gen_start = Instant::now();
            let now = Utc::now();
            let order = generator.generate_order(rng, now);
            let records = shape_order(&order, generator.vocabulary(), rng, now);
            let pause = (sequence < count).then(|| delay.sample(rng));
            info!(
                "Generating order {}/{}: {} for {} (${}, {} records)",
                sequence,
                count,
                order.order_id,
                order.customer_name,
                order.total_amount,
                records.len()
            );
            PreparedOrder {
                sequence,
                order_id: order.order_id,
                customer_name: order.customer_name,
                total_amount: order.total_amount,
                records,
                pause,
                generation_time: gen_start.elapsed(),
            }
        });

        let writes = prepared
            .map(|order| async move {
                debug!(
                    "Writing order {}/{}: {}",
                    order.sequence, count, order.order_id
                );
                let insert_start = Instant::now();
                let outcome = write_order(sink, table, &order.records).await;
                let insert_time = insert_start.elapsed();
                log_outcome(&order, &outcome);

                if let Some(pause) = order.pause.filter(|p| !p.is_zero()) {
                    tokio::time::sleep(pause).await;
                }
                (order.generation_time, insert_time, outcome)
            })
            .buffer_unordered(config.concurrency);
        let mut writes = std::pin::pin!(writes);

        while let Some((generation_time, insert_time, outcome)) = writes.next().await {
            metrics.generation_duration += generation_time;
            metrics.insert_duration += insert_time;
            metrics.record(&outcome);
        }

        metrics.total_duration = start_time.elapsed();

        info!(
            "Successfully inserted {}/{} orders ({} partial, {} failed, {} records) in {:?} ({:.2} orders/sec)",
            metrics.orders_complete,
            count,
            metrics.orders_partial,
            metrics.orders_failed,
            metrics.records_written,
            metrics.total_duration,
            metrics.orders_per_second()
        );

        metrics
    }
}

fn log_outcome(order: &PreparedOrder, outcome: &OrderOutcome) {
    match outcome {
        OrderOutcome::Complete { records_written } => {
            info!(
                "Inserted order {} - {} (${}) with {} records",
                order.order_id, order.customer_name, order.total_amount, records_written
            );
        }
        OrderOutcome::Partial {
            records_written,
            failed_sort_key,
            error,
        } => {
            warn!(
                "Order {} incomplete: {} records written, {} failed: {:#}",
                order.order_id, records_written, failed_sort_key, error
            );
        }
        OrderOutcome::Failed { error } => {
            error!("Failed to insert order {}: {:#}", order.order_id, error);
        }
    }
    debug!("Order {} outcome recorded", order.order_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_generator::RngSource;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemorySink {
        records: Mutex<Vec<OrderRecord>>,
    }

    #[async_trait::async_trait]
    impl RecordSink for MemorySink {
        async fn put_record(&self, _table: &str, record: &OrderRecord) -> anyhow::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    /// Rejects every item record.
    struct NoItems(MemorySink);

    #[async_trait::async_trait]
    impl RecordSink for NoItems {
        async fn put_record(&self, table: &str, record: &OrderRecord) -> anyhow::Result<()> {
            if record.sk.starts_with("ITEM#") {
                anyhow::bail!("item table throttled");
            }
            self.0.put_record(table, record).await
        }
    }

    /// Counts puts into a shared counter.
    struct CountingSink(Arc<AtomicUsize>);

    #[async_trait::async_trait]
    impl RecordSink for CountingSink {
        async fn put_record(&self, _table: &str, _record: &OrderRecord) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Refuses to connect; any sink it handed out would share `puts`.
    #[derive(Default)]
    struct Unreachable {
        puts: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl SinkConnector for Unreachable {
        type Sink = CountingSink;

        fn destination(&self) -> String {
            "nowhere".to_string()
        }

        async fn connect(&self) -> anyhow::Result<CountingSink> {
            anyhow::bail!("connection refused")
        }
    }

    fn populator(count: u64, concurrency: usize) -> Populator<impl RandomSource + Send> {
        let config = PopulateConfig::new("orders-table", count)
            .with_delay(DelayRange::none())
            .with_concurrency(concurrency);
        Populator::new(OrderGenerator::default(), RngSource::seeded(42), config).unwrap()
    }

    #[tokio::test]
    async fn test_connect_failure_is_fatal() {
        let mut populator = populator(3, 1);
        let connector = Unreachable::default();

        let result = populator.run(&connector).await;

        match result {
            Err(PopulateError::Connect { destination, cause }) => {
                assert_eq!(destination, "nowhere");
                assert_eq!(cause.to_string(), "connection refused");
            }
            other => panic!("expected connect error, got {other:?}"),
        }
        assert_eq!(connector.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_counting_sink_sees_every_record() {
        let mut populator = populator(2, 1);
        let puts = Arc::new(AtomicUsize::new(0));

        let metrics = populator.populate(&CountingSink(puts.clone())).await;

        assert_eq!(puts.load(Ordering::SeqCst) as u64, metrics.records_written);
    }

    #[tokio::test]
    async fn test_sequential_populate() {
        let mut populator = populator(5, 1);
        let sink = MemorySink::default();

        let metrics = populator.populate(&sink).await;

        assert_eq!(metrics.orders_attempted, 5);
        assert_eq!(metrics.successful_orders(), 5);
        assert_eq!(metrics.orders_failed, 0);

        let records = sink.records.lock().unwrap();
        assert_eq!(metrics.records_written, records.len() as u64);

        // Sequential writes keep each order's records contiguous, primary first.
        let mut seen = HashSet::new();
        let mut previous_pk: &str = "";
        for record in records.iter() {
            if record.pk != previous_pk {
                assert!(seen.insert(record.pk.clone()), "order {} split", record.pk);
                assert_eq!(record.sk, "STATE#v1");
                previous_pk = record.pk.as_str();
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_populate() {
        let mut populator = populator(20, 4);
        let sink = MemorySink::default();

        let metrics = populator.populate(&sink).await;

        assert_eq!(metrics.successful_orders(), 20);
        let records = sink.records.lock().unwrap();
        let orders: HashSet<_> = records.iter().map(|r| r.pk.as_str()).collect();
        assert_eq!(orders.len(), 20);
    }

    #[tokio::test]
    async fn test_item_failures_count_as_partial() {
        let mut populator = populator(4, 1);
        let sink = NoItems(MemorySink::default());

        let metrics = populator.populate(&sink).await;

        assert_eq!(metrics.orders_attempted, 4);
        assert_eq!(metrics.successful_orders(), 0);
        assert_eq!(metrics.orders_partial, 4);
        // primary plus 2..=4 auxiliary records per order
        assert!((12..=20).contains(&metrics.records_written));
    }

    #[tokio::test]
    async fn test_zero_orders() {
        let mut populator = populator(0, 1);
        let sink = MemorySink::default();

        let metrics = populator.populate(&sink).await;

        assert_eq!(metrics.orders_attempted, 0);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = PopulateConfig::new("t", 1).with_concurrency(0);
        let result = Populator::new(OrderGenerator::default(), RngSource::seeded(1), config);
        assert!(matches!(result, Err(PopulateError::InvalidConcurrency)));
    }

    #[test]
    fn test_delay_range() {
        assert!(matches!(
            DelayRange::new(300, 50),
            Err(PopulateError::InvalidDelayRange { .. })
        ));

        let delay = DelayRange::default();
        let mut rng = RngSource::seeded(4);
        for _ in 0..200 {
            let pause = delay.sample(&mut rng);
            assert!(pause >= Duration::from_millis(50));
            assert!(pause <= Duration::from_millis(300));
        }
        assert_eq!(DelayRange::none().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_orders_per_second() {
        let metrics = PopulateMetrics {
            orders_complete: 100,
            total_duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert_eq!(metrics.orders_per_second(), 10.0);
        assert_eq!(PopulateMetrics::default().orders_per_second(), 0.0);
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_generation_logged_before_writes_start() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut populator = populator(3, 3);
        populator.populate(&MemorySink::default()).await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        let position = |needle: &str| lines.iter().position(|l| l.contains(needle));

        let first_write = position("Writing order").unwrap();
        for sequence in 1..=3 {
            let generated = position(&format!("Generating order {sequence}/3")).unwrap();
            assert!(generated < first_write, "{output}");
        }
        assert_eq!(
            lines.iter().filter(|l| l.contains("Writing order")).count(),
            3
        );
    }
}
