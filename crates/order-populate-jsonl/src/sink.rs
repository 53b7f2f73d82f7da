//! File-backed record sink.

use crate::error::JsonlPopulatorError;
use anyhow::Result;
use async_trait::async_trait;
use order_populate::{OrderRecord, RecordSink, SinkConnector};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Opens (or creates) the output file.
#[derive(Debug, Clone)]
pub struct JsonlConnector {
    path: PathBuf,
    append: bool,
}

impl JsonlConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: false,
        }
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, JsonlPopulatorError> {
        let mut options = OpenOptions::new();
        options.create(true);
        if self.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options
            .open(&self.path)
            .map_err(|source| JsonlPopulatorError::Open {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl SinkConnector for JsonlConnector {
    type Sink = JsonlSink;

    fn destination(&self) -> String {
        format!("JSONL file '{}'", self.path.display())
    }

    async fn connect(&self) -> Result<JsonlSink> {
        let file = self.open()?;
        info!(
            "Writing records to '{}'{}",
            self.path.display(),
            if self.append { " (append)" } else { "" }
        );
        Ok(JsonlSink {
            writer: Mutex::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file)),
        })
    }
}

/// Appends one JSON line per record.
///
/// Each line is flushed before `put_record` returns, so a record counted as
/// written is on disk even if the run is interrupted.
#[derive(Debug)]
pub struct JsonlSink {
    writer: Mutex<BufWriter<File>>,
}

impl JsonlSink {
    fn write_line(&self, record: &OrderRecord) -> Result<(), JsonlPopulatorError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| JsonlPopulatorError::Poisoned)?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn put_record(&self, table: &str, record: &OrderRecord) -> Result<()> {
        self.write_line(record)?;
        debug!("{table}: wrote {} / {}", record.pk, record.sk);
        Ok(())
    }
}
