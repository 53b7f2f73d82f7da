//! DynamoDB connection and single-item writes.

use crate::forward::record_to_item;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use order_populate::{OrderRecord, RecordSink, SinkConnector};
use tracing::{debug, info};

/// Builds a DynamoDB client and checks that the target table exists.
#[derive(Debug, Clone)]
pub struct DynamoDbConnector {
    region: String,
    endpoint_url: Option<String>,
    table_name: String,
}

impl DynamoDbConnector {
    pub fn new(region: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            table_name: table_name.into(),
        }
    }

    /// Send requests to `url` instead of the regional endpoint.
    pub fn with_endpoint_url(mut self, url: Option<String>) -> Self {
        self.endpoint_url = url;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn client(&self) -> Client {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        match &self.endpoint_url {
            Some(url) => {
                debug!("Using DynamoDB endpoint override {url}");
                let config = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
                    .endpoint_url(url)
                    .build();
                Client::from_conf(config)
            }
            None => Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SinkConnector for DynamoDbConnector {
    type Sink = DynamoDbSink;

    fn destination(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("DynamoDB table '{}' at {url}", self.table_name),
            None => format!("DynamoDB table '{}' in {}", self.table_name, self.region),
        }
    }

    async fn connect(&self) -> Result<DynamoDbSink> {
        let client = self.client().await;

        let described = client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .with_context(|| format!("Failed to describe table '{}'", self.table_name))?;

        let status = described
            .table()
            .and_then(|t| t.table_status())
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        info!("Table '{}' status: {status}", self.table_name);

        Ok(DynamoDbSink { client })
    }
}

/// Writes each record with one `PutItem` call.
#[derive(Debug, Clone)]
pub struct DynamoDbSink {
    client: Client,
}

#[async_trait]
impl RecordSink for DynamoDbSink {
    async fn put_record(&self, table: &str, record: &OrderRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .with_context(|| format!("Failed to put {} / {}", record.pk, record.sk))?;
        Ok(())
    }
}
