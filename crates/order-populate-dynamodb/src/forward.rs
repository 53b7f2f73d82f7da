//! Forward conversion: `OrderRecord` → DynamoDB item.

use aws_sdk_dynamodb::types::AttributeValue;
use order_populate::{OrderRecord, RecordValue, PARTITION_KEY, SORT_KEY};
use std::collections::HashMap;

/// Wrapper for attribute values that can be written to DynamoDB.
#[derive(Debug, Clone)]
pub struct DynamoValue(pub AttributeValue);

impl DynamoValue {
    /// Get the inner attribute value.
    pub fn into_inner(self) -> AttributeValue {
        self.0
    }
}

impl From<&RecordValue> for DynamoValue {
    fn from(value: &RecordValue) -> Self {
        let av = match value {
            RecordValue::Text(s) => AttributeValue::S(s.clone()),
            RecordValue::Int(i) => AttributeValue::N(i.to_string()),
            // Decimal keeps its scale, so prices go out as "12.50"
            RecordValue::Decimal(d) => AttributeValue::N(d.to_string()),
            RecordValue::List(values) => AttributeValue::L(
                values
                    .iter()
                    .map(|v| DynamoValue::from(v).into_inner())
                    .collect(),
            ),
            RecordValue::Map(map) => AttributeValue::M(
                map.iter()
                    .map(|(k, v)| (k.clone(), DynamoValue::from(v).into_inner()))
                    .collect(),
            ),
        };
        DynamoValue(av)
    }
}

/// Convert a record into a DynamoDB item, keys included.
pub fn record_to_item(record: &OrderRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::with_capacity(record.attributes.len() + 2);
    item.insert(
        PARTITION_KEY.to_string(),
        AttributeValue::S(record.pk.clone()),
    );
    item.insert(SORT_KEY.to_string(), AttributeValue::S(record.sk.clone()));
    for (name, value) in &record.attributes {
        item.insert(name.clone(), DynamoValue::from(value).into_inner());
    }
    item
}
