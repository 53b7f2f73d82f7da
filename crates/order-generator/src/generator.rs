//! Builds random orders from a vocabulary and a random source.

use crate::model::{Order, OrderItem};
use crate::order_id::generate_order_id;
use crate::random::RandomSource;
use crate::vocabulary::Vocabulary;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Fewest items in an order.
pub const MIN_ITEMS: i64 = 1;
/// Most items in an order.
pub const MAX_ITEMS: i64 = 8;
/// Largest quantity on a single line.
pub const MAX_QUANTITY: i64 = 5;
/// Extra attempts at finding a product name not yet used in the order.
pub const PRODUCT_NAME_RETRIES: usize = 10;

/// Independent presence probabilities for optional order fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldProbabilities {
    pub phone: f64,
    pub address: f64,
    pub note: f64,
}

impl Default for FieldProbabilities {
    fn default() -> Self {
        Self {
            phone: 0.8,
            address: 0.9,
            note: 0.4,
        }
    }
}

/// Produces orders. Generation never fails.
#[derive(Debug, Clone, Default)]
pub struct OrderGenerator {
    vocabulary: Vocabulary,
    probabilities: FieldProbabilities,
}

impl OrderGenerator {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            probabilities: FieldProbabilities::default(),
        }
    }

    pub fn with_probabilities(mut self, probabilities: FieldProbabilities) -> Self {
        self.probabilities = probabilities;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Generate a complete order stamped relative to `now`.
    pub fn generate_order<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Order {
        let items = self.generate_items(rng);
        let total_amount = Order::compute_total(&items);

        let first = self.vocabulary.first_names.pick(rng).to_string();
        let last = self.vocabulary.last_names.pick(rng).to_string();
        let customer_email = self.email(rng, &first, &last);

        Order {
            order_id: generate_order_id(rng, now, &self.vocabulary.order_id_channels),
            customer_name: format!("{first} {last}"),
            customer_email,
            customer_phone: rng
                .chance(self.probabilities.phone)
                .then(|| self.phone(rng)),
            shipping_address: rng
                .chance(self.probabilities.address)
                .then(|| self.address(rng)),
            items,
            total_amount,
            order_date: Some(self.order_date(rng, now)),
            notes: rng
                .chance(self.probabilities.note)
                .then(|| self.vocabulary.order_notes.pick(rng).to_string()),
        }
    }

    /// Generate between [`MIN_ITEMS`] and [`MAX_ITEMS`] line items.
    pub fn generate_items<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<OrderItem> {
        let count = rng.int_in_range(MIN_ITEMS, MAX_ITEMS) as usize;
        let mut used_names = HashSet::with_capacity(count);
        let mut items = Vec::with_capacity(count);

        for _ in 0..count {
            let mut product_name = self.product_name(rng);
            let mut attempts = 0;
            while used_names.contains(&product_name) && attempts < PRODUCT_NAME_RETRIES {
                product_name = self.product_name(rng);
                attempts += 1;
            }
            used_names.insert(product_name.clone());

            let price_cents = price_cents(rng);
            let prefix = self.vocabulary.item_id_prefixes.pick(rng).to_string();
            let suffix_len = rng.int_in_range(6, 10) as usize;

            items.push(OrderItem {
                item_id: format!("{prefix}-{}", rng.alphanumeric(suffix_len)),
                product_name,
                quantity: rng.int_in_range(1, MAX_QUANTITY) as u32,
                price: Decimal::new(price_cents, 2),
            });
        }

        items
    }

    fn product_name<R: RandomSource + ?Sized>(&self, rng: &mut R) -> String {
        let category = self.vocabulary.product_categories.pick(rng);
        let adjective = self.vocabulary.product_adjectives.pick(rng);
        let noun = self.vocabulary.product_nouns.pick(rng);
        format!("{adjective} {category} {noun}")
    }

    fn email<R: RandomSource + ?Sized>(&self, rng: &mut R, first: &str, last: &str) -> String {
        let domain = self.vocabulary.email_domains.pick(rng);
        let first = first.to_lowercase();
        let last = last.to_lowercase();

        let local = match rng.index(5) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}{last}"),
            2 => format!("{first}_{last}"),
            3 => format!("{first}{}", rng.int_in_range(1, 999)),
            _ => format!(
                "{}{}{}",
                first.chars().take(3).collect::<String>(),
                last.chars().take(3).collect::<String>(),
                rng.int_in_range(10, 99)
            ),
        };
        format!("{local}@{domain}")
    }

    fn phone<R: RandomSource + ?Sized>(&self, rng: &mut R) -> String {
        let area = self.vocabulary.phone_area_codes.pick(rng).to_string();
        let exchange = rng.int_in_range(100, 999);
        let number = rng.int_in_range(1000, 9999);
        format!("+1-{area}-{exchange}-{number}")
    }

    fn address<R: RandomSource + ?Sized>(&self, rng: &mut R) -> String {
        let number = rng.int_in_range(100, 9999);
        let street = self.vocabulary.street_names.pick(rng).to_string();
        let city = self.vocabulary.cities.pick(rng).to_string();
        let state = self.vocabulary.states.pick(rng).to_string();
        let zip = rng.int_in_range(10000, 99999);
        format!("{number} {street}, {city}, {state} {zip}")
    }

    /// A moment within the 30 days before `now`.
    fn order_date<R: RandomSource + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = rng.int_in_range(0, 30);
        let hours = rng.int_in_range(0, 23);
        let minutes = rng.int_in_range(0, 59);
        now - Duration::days(days) - Duration::hours(hours) - Duration::minutes(minutes)
    }
}

/// Price in cents: a base price or one of its variations.
fn price_cents<R: RandomSource + ?Sized>(rng: &mut R) -> i64 {
    let base = rng.int_in_range(299, 49_999);
    match rng.index(5) {
        0 => base,
        1 => scale_rounded(base, 85),
        2 => scale_rounded(base, 115),
        3 => scale_rounded(base, 95),
        _ => base + rng.int_in_range(-50, 200),
    }
}

/// `round(value * percent / 100)` for non-negative values, half up.
fn scale_rounded(value: i64, percent: i64) -> i64 {
    (value * percent + 50) / 100
}
