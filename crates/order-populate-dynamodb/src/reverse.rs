//! Reverse conversion: DynamoDB item → `OrderRecord`.

use crate::error::DynamoDbPopulatorError;
use aws_sdk_dynamodb::types::AttributeValue;
use order_populate::{OrderRecord, RecordValue, PARTITION_KEY, SORT_KEY};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Convert one attribute value. `name` is only used in errors.
pub fn attribute_to_value(
    name: &str,
    value: &AttributeValue,
) -> Result<RecordValue, DynamoDbPopulatorError> {
    match value {
        AttributeValue::S(s) => Ok(RecordValue::Text(s.clone())),
        AttributeValue::N(n) => parse_number(name, n),
        AttributeValue::L(values) => values
            .iter()
            .map(|v| attribute_to_value(name, v))
            .collect::<Result<Vec<_>, _>>()
            .map(RecordValue::List),
        AttributeValue::M(map) => map
            .iter()
            .map(|(k, v)| attribute_to_value(k, v).map(|v| (k.clone(), v)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(RecordValue::Map),
        other => Err(DynamoDbPopulatorError::UnsupportedAttribute {
            name: name.to_string(),
            kind: attribute_kind(other).to_string(),
        }),
    }
}

/// Convert a DynamoDB item back into a record.
pub fn item_to_record(
    item: &HashMap<String, AttributeValue>,
) -> Result<OrderRecord, DynamoDbPopulatorError> {
    let key = |name: &str| {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| DynamoDbPopulatorError::MissingKey(name.to_string()))
    };
    let pk = key(PARTITION_KEY)?;
    let sk = key(SORT_KEY)?;

    let mut attributes = BTreeMap::new();
    for (name, value) in item {
        if name == PARTITION_KEY || name == SORT_KEY {
            continue;
        }
        attributes.insert(name.clone(), attribute_to_value(name, value)?);
    }

    Ok(OrderRecord { pk, sk, attributes })
}

fn parse_number(name: &str, raw: &str) -> Result<RecordValue, DynamoDbPopulatorError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(RecordValue::Int(i));
    }
    Decimal::from_str(raw)
        .map(RecordValue::Decimal)
        .map_err(|_| DynamoDbPopulatorError::InvalidNumber {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn attribute_kind(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::B(_) => "B",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::Bs(_) => "BS",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::Ss(_) => "SS",
        _ => "unknown",
    }
}
