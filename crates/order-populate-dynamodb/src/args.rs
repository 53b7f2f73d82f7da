//! CLI argument definitions for the DynamoDB populator.

use crate::sink::DynamoDbConnector;
use clap::Args;
use order_populate::CommonPopulateArgs;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "af-south-1";
/// Default table name.
pub const DEFAULT_TABLE_NAME: &str = "orders-table";

/// DynamoDB-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct DynamoDbPopulateArgs {
    /// AWS region of the table
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Target table name
    #[arg(long, env = "DYNAMODB_TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Endpoint override, e.g. http://localhost:8000 for DynamoDB Local
    #[arg(long, env = "DYNAMODB_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}

impl DynamoDbPopulateArgs {
    /// Connector for the table these arguments name.
    pub fn connector(&self) -> DynamoDbConnector {
        DynamoDbConnector::new(&self.region, &self.table_name)
            .with_endpoint_url(self.endpoint_url.clone())
    }
}
