//! Destination traits.
//!
//! A [`SinkConnector`] establishes the connection once per run; the
//! [`RecordSink`] it returns is shared read-only by every write.
//!
//! ```ignore
//! let sink = connector.connect().await?;   // fatal on failure
//! sink.put_record("orders-table", &record).await?;
//! ```

use crate::record::OrderRecord;
use anyhow::Result;
use tracing::info;

/// Writes single records to a destination.
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert one record into `table`. Each call is independent; nothing is
    /// rolled back when a later call fails.
    async fn put_record(&self, table: &str, record: &OrderRecord) -> Result<()>;
}

/// Opens a [`RecordSink`].
#[async_trait::async_trait]
pub trait SinkConnector: Send + Sync {
    type Sink: RecordSink;

    /// Human-readable destination name for logs and errors.
    fn destination(&self) -> String;

    /// Establish the connection. An error here aborts the whole run.
    async fn connect(&self) -> Result<Self::Sink>;
}

/// Sink that logs records instead of writing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSink;

#[async_trait::async_trait]
impl RecordSink for DryRunSink {
    async fn put_record(&self, table: &str, record: &OrderRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        info!("[DRY-RUN] {table}: {json}");
        Ok(())
    }
}

/// Connector for [`DryRunSink`]; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunConnector;

#[async_trait::async_trait]
impl SinkConnector for DryRunConnector {
    type Sink = DryRunSink;

    fn destination(&self) -> String {
        "dry-run log".to_string()
    }

    async fn connect(&self) -> Result<Self::Sink> {
        Ok(DryRunSink)
    }
}
