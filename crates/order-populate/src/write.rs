//! Writes the records of one order.

use crate::record::OrderRecord;
use crate::sink::RecordSink;
use tracing::debug;

/// Result of writing one order's records.
///
/// An order counts as successful only when every record was written.
/// A failure after the primary record leaves that record (and any other
/// earlier ones) persisted; it is reported as [`OrderOutcome::Partial`].
#[derive(Debug)]
pub enum OrderOutcome {
    /// All records written.
    Complete { records_written: usize },
    /// Primary record written, a later record failed.
    Partial {
        records_written: usize,
        failed_sort_key: String,
        error: anyhow::Error,
    },
    /// Primary record not written.
    Failed { error: anyhow::Error },
}

impl OrderOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, OrderOutcome::Complete { .. })
    }

    pub fn records_written(&self) -> usize {
        match self {
            OrderOutcome::Complete { records_written }
            | OrderOutcome::Partial {
                records_written, ..
            } => *records_written,
            OrderOutcome::Failed { .. } => 0,
        }
    }
}

/// Put `records` one at a time, in order, stopping at the first failure.
///
/// `records[0]` is expected to be the primary record.
pub async fn write_order<S: RecordSink + ?Sized>(
    sink: &S,
    table: &str,
    records: &[OrderRecord],
) -> OrderOutcome {
    for (written, record) in records.iter().enumerate() {
        if let Err(error) = sink.put_record(table, record).await {
            return if written == 0 {
                OrderOutcome::Failed { error }
            } else {
                OrderOutcome::Partial {
                    records_written: written,
                    failed_sort_key: record.sk.clone(),
                    error,
                }
            };
        }
        debug!("Added record {} {}", record.pk, record.sk);
    }

    OrderOutcome::Complete {
        records_written: records.len(),
    }
}
