//! Destination-independent record representation.
//!
//! Every row written for an order shares the partition key
//! `ORDER#{orderId}` and is told apart by its sort key:
//!
//! - `STATE#v1` primary record
//! - `STATE#v2`, `PAYMENT#v1`, `SHIPPING#v1`, `AUDIT#v1` auxiliary records
//! - `ITEM#001`, `ITEM#002`, ... one per line item

use crate::error::RecordError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partition key attribute name.
pub const PARTITION_KEY: &str = "pk";
/// Sort key attribute name.
pub const SORT_KEY: &str = "sk";
/// Sort key of the primary record.
pub const PRIMARY_SORT_KEY: &str = "STATE#v1";

const ITEM_SORT_KEY_PREFIX: &str = "ITEM#";

/// Partition key shared by all records of an order.
pub fn partition_key(order_id: &str) -> String {
    format!("ORDER#{order_id}")
}

/// Sort key of the item at zero-based `index`.
pub fn item_sort_key(index: usize) -> String {
    format!("{ITEM_SORT_KEY_PREFIX}{:03}", index + 1)
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Text(String),
    Int(i64),
    Decimal(#[serde(with = "rust_decimal::serde::float")] Decimal),
    List(Vec<RecordValue>),
    Map(BTreeMap<String, RecordValue>),
}

impl RecordValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a decimal; integers widen.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RecordValue::Decimal(d) => Some(*d),
            RecordValue::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RecordValue]> {
        match self {
            RecordValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, RecordValue>> {
        match self {
            RecordValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<String> for RecordValue {
    fn from(value: String) -> Self {
        RecordValue::Text(value)
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        RecordValue::Text(value.to_string())
    }
}

impl From<i64> for RecordValue {
    fn from(value: i64) -> Self {
        RecordValue::Int(value)
    }
}

impl From<u32> for RecordValue {
    fn from(value: u32) -> Self {
        RecordValue::Int(i64::from(value))
    }
}

impl From<Decimal> for RecordValue {
    fn from(value: Decimal) -> Self {
        RecordValue::Decimal(value)
    }
}

/// Lookup helpers shared by record readers.
pub(crate) trait AttributeMapExt {
    fn require(&self, name: &str) -> Result<&RecordValue, RecordError>;
    fn require_text(&self, name: &str) -> Result<&str, RecordError>;
    fn optional_text(&self, name: &str) -> Result<Option<&str>, RecordError>;
    fn require_decimal(&self, name: &str) -> Result<Decimal, RecordError>;
    fn require_int(&self, name: &str) -> Result<i64, RecordError>;
}

impl AttributeMapExt for BTreeMap<String, RecordValue> {
    fn require(&self, name: &str) -> Result<&RecordValue, RecordError> {
        self.get(name)
            .ok_or_else(|| RecordError::MissingAttribute(name.to_string()))
    }

    fn require_text(&self, name: &str) -> Result<&str, RecordError> {
        self.require(name)?
            .as_text()
            .ok_or_else(|| wrong_type(name, "text"))
    }

    fn optional_text(&self, name: &str) -> Result<Option<&str>, RecordError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_text()
                .map(Some)
                .ok_or_else(|| wrong_type(name, "text")),
        }
    }

    fn require_decimal(&self, name: &str) -> Result<Decimal, RecordError> {
        self.require(name)?
            .as_decimal()
            .ok_or_else(|| wrong_type(name, "a number"))
    }

    fn require_int(&self, name: &str) -> Result<i64, RecordError> {
        self.require(name)?
            .as_int()
            .ok_or_else(|| wrong_type(name, "an integer"))
    }
}

fn wrong_type(name: &str, expected: &'static str) -> RecordError {
    RecordError::WrongType {
        name: name.to_string(),
        expected,
    }
}

/// Canned secondary records, in the order they are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliaryKind {
    /// Second schema-version marker.
    StateV2,
    Payment,
    Shipping,
    Audit,
}

impl AuxiliaryKind {
    /// Attachment priority: an order with `n` auxiliary records gets the first `n`.
    pub const PRIORITY: [AuxiliaryKind; 4] = [
        AuxiliaryKind::StateV2,
        AuxiliaryKind::Payment,
        AuxiliaryKind::Shipping,
        AuxiliaryKind::Audit,
    ];

    pub fn sort_key(self) -> &'static str {
        match self {
            AuxiliaryKind::StateV2 => "STATE#v2",
            AuxiliaryKind::Payment => "PAYMENT#v1",
            AuxiliaryKind::Shipping => "SHIPPING#v1",
            AuxiliaryKind::Audit => "AUDIT#v1",
        }
    }

    pub fn from_sort_key(sort_key: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.sort_key() == sort_key)
    }
}

/// What a record represents within its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Primary,
    Auxiliary(AuxiliaryKind),
    /// One-based item sequence number.
    Item(u32),
}

/// One row to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub pk: String,
    pub sk: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, RecordValue>,
}

impl OrderRecord {
    pub fn new(order_id: &str, sort_key: impl Into<String>) -> Self {
        Self {
            pk: partition_key(order_id),
            sk: sort_key.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<RecordValue>) -> &mut Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Set an attribute only when a value is present.
    pub fn set_opt<V: Into<RecordValue>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.attributes.get(name)
    }

    pub fn kind(&self) -> Option<RecordKind> {
        if self.sk == PRIMARY_SORT_KEY {
            return Some(RecordKind::Primary);
        }
        if let Some(kind) = AuxiliaryKind::from_sort_key(&self.sk) {
            return Some(RecordKind::Auxiliary(kind));
        }
        self.sk
            .strip_prefix(ITEM_SORT_KEY_PREFIX)
            .filter(|seq| seq.len() == 3)
            .and_then(|seq| seq.parse().ok())
            .map(RecordKind::Item)
    }
}
