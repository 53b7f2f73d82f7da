//! Decomposes an order into the records written for it.

use crate::error::RecordError;
use crate::record::{
    item_sort_key, AttributeMapExt, AuxiliaryKind, OrderRecord, RecordKind, RecordValue,
    PRIMARY_SORT_KEY,
};
use chrono::{DateTime, Utc};
use order_generator::{to_iso8601, Order, OrderItem, RandomSource, Vocabulary};
use std::collections::BTreeMap;

/// Fewest auxiliary records attached to an order.
pub const MIN_AUXILIARY: i64 = 2;
/// Most auxiliary records attached to an order.
pub const MAX_AUXILIARY: i64 = 4;

/// Build every record for `order`: the primary record first, then the
/// auxiliary records, then one record per item.
///
/// Operational metadata (status, priority, region, ...) is drawn
/// independently of the order's own fields.
pub fn shape_order<R: RandomSource + ?Sized>(
    order: &Order,
    vocabulary: &Vocabulary,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<OrderRecord> {
    let timestamp = to_iso8601(&now);
    let mut records = Vec::with_capacity(1 + MAX_AUXILIARY as usize + order.items.len());

    records.push(primary_record(order, vocabulary, rng, &timestamp));

    let auxiliary_count = rng.int_in_range(MIN_AUXILIARY, MAX_AUXILIARY) as usize;
    for kind in AuxiliaryKind::PRIORITY.into_iter().take(auxiliary_count) {
        records.push(auxiliary_record(order, kind, vocabulary, rng, &timestamp));
    }

    for (index, item) in order.items.iter().enumerate() {
        let mut record = OrderRecord::new(&order.order_id, item_sort_key(index));
        record
            .set("orderId", order.order_id.as_str())
            .set("itemId", item.item_id.as_str())
            .set("productName", item.product_name.as_str())
            .set("quantity", item.quantity)
            .set("price", item.price)
            .set("createdAt", timestamp.as_str());
        records.push(record);
    }

    records
}

fn primary_record<R: RandomSource + ?Sized>(
    order: &Order,
    vocabulary: &Vocabulary,
    rng: &mut R,
    timestamp: &str,
) -> OrderRecord {
    let mut record = OrderRecord::new(&order.order_id, PRIMARY_SORT_KEY);
    record
        .set("orderId", order.order_id.as_str())
        .set("customerName", order.customer_name.as_str())
        .set("customerEmail", order.customer_email.as_str())
        .set_opt("customerPhone", order.customer_phone.as_deref())
        .set_opt("shippingAddress", order.shipping_address.as_deref())
        .set("totalAmount", order.total_amount)
        .set("status", vocabulary.order_statuses.pick(rng))
        .set("pdfStatus", vocabulary.document_statuses.pick(rng))
        .set_opt("orderDate", order.order_date.as_ref().map(to_iso8601))
        .set_opt("notes", order.notes.as_deref())
        .set("createdAt", timestamp)
        .set("updatedAt", timestamp)
        .set(
            "items",
            RecordValue::List(order.items.iter().map(item_value).collect()),
        )
        .set("processingTime", rng.int_in_range(100, 5000))
        .set("source", vocabulary.sources.pick(rng))
        .set("priority", vocabulary.priorities.pick(rng))
        .set("region", vocabulary.regions.pick(rng));
    record
}

fn auxiliary_record<R: RandomSource + ?Sized>(
    order: &Order,
    kind: AuxiliaryKind,
    vocabulary: &Vocabulary,
    rng: &mut R,
    timestamp: &str,
) -> OrderRecord {
    let mut record = OrderRecord::new(&order.order_id, kind.sort_key());
    record
        .set("orderId", order.order_id.as_str())
        .set("createdAt", timestamp);

    match kind {
        AuxiliaryKind::StateV2 => {
            record
                .set("version", "v2")
                .set("description", "Order state version 2 - updated schema");
        }
        AuxiliaryKind::Payment => {
            record
                .set("paymentStatus", "COMPLETED")
                .set("paymentMethod", vocabulary.payment_methods.pick(rng))
                .set("transactionId", format!("TXN-{}", rng.alphanumeric(10)));
        }
        AuxiliaryKind::Shipping => {
            record
                .set("shippingStatus", vocabulary.shipping_statuses.pick(rng))
                .set("trackingNumber", format!("TRK-{}", rng.alphanumeric(12)))
                .set("carrier", vocabulary.carriers.pick(rng));
        }
        AuxiliaryKind::Audit => {
            let octets: Vec<String> = (0..4)
                .map(|_| rng.int_in_range(1, 255).to_string())
                .collect();
            record
                .set("action", "ORDER_CREATED")
                .set("userId", format!("USER-{}", rng.alphanumeric(8)))
                .set("ipAddress", octets.join("."));
        }
    }

    record
}

fn item_value(item: &OrderItem) -> RecordValue {
    let mut map = BTreeMap::new();
    map.insert("itemId".to_string(), RecordValue::from(item.item_id.as_str()));
    map.insert(
        "productName".to_string(),
        RecordValue::from(item.product_name.as_str()),
    );
    map.insert("quantity".to_string(), RecordValue::from(item.quantity));
    map.insert("price".to_string(), RecordValue::from(item.price));
    RecordValue::Map(map)
}

/// Read a primary record back into the order it was built from.
///
/// Operational metadata is ignored.
pub fn primary_to_order(record: &OrderRecord) -> Result<Order, RecordError> {
    if record.kind() != Some(RecordKind::Primary) {
        return Err(RecordError::NotPrimary {
            sort_key: record.sk.clone(),
        });
    }
    let attrs = &record.attributes;

    let items = attrs
        .require("items")?
        .as_list()
        .ok_or_else(|| RecordError::WrongType {
            name: "items".to_string(),
            expected: "a list",
        })?
        .iter()
        .map(value_to_item)
        .collect::<Result<Vec<_>, _>>()?;

    let order_date = attrs
        .optional_text("orderDate")?
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| RecordError::InvalidTimestamp {
                    name: "orderDate".to_string(),
                    value: value.to_string(),
                })
        })
        .transpose()?;

    Ok(Order {
        order_id: attrs.require_text("orderId")?.to_string(),
        customer_name: attrs.require_text("customerName")?.to_string(),
        customer_email: attrs.require_text("customerEmail")?.to_string(),
        customer_phone: attrs.optional_text("customerPhone")?.map(str::to_string),
        shipping_address: attrs.optional_text("shippingAddress")?.map(str::to_string),
        items,
        total_amount: attrs.require_decimal("totalAmount")?,
        order_date,
        notes: attrs.optional_text("notes")?.map(str::to_string),
    })
}

fn value_to_item(value: &RecordValue) -> Result<OrderItem, RecordError> {
    let map = value.as_map().ok_or_else(|| RecordError::WrongType {
        name: "items[]".to_string(),
        expected: "a map",
    })?;
    let quantity = map.require_int("quantity")?;

    Ok(OrderItem {
        item_id: map.require_text("itemId")?.to_string(),
        product_name: map.require_text("productName")?.to_string(),
        quantity: u32::try_from(quantity).map_err(|_| RecordError::WrongType {
            name: "quantity".to_string(),
            expected: "a non-negative integer",
        })?,
        price: map.require_decimal("price")?,
    })
}
