//! Word lists used to build orders and record metadata.
//!
//! The built-in tables live in [`Vocabulary::default`]. A YAML file can
//! override any subset of them:
//!
//! ```yaml
//! first_names: [Ada]
//! last_names: [Lovelace]
//! carriers: [DHL]
//! ```

use crate::random::{RandomSource, ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// A word list was empty.
    #[error("word list must not be empty")]
    EmptyWordList,

    /// The vocabulary file could not be read.
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The vocabulary YAML was malformed.
    #[error("invalid vocabulary YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An order id channel is not uppercase alphanumeric.
    #[error("order id channel '{0}' must match [A-Z0-9]+")]
    InvalidChannel(String),
}

/// A non-empty list of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WordList(Vec<String>);

impl WordList {
    pub fn new<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_from(words.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    fn from_static(words: &[&str]) -> Self {
        debug_assert!(!words.is_empty());
        Self(words.iter().map(|w| (*w).to_string()).collect())
    }

    /// Pick one word uniformly.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &str {
        let idx = rng.index(self.0.len()).min(self.0.len() - 1);
        &self.0[idx]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|w| w == word)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for WordList {
    type Error = VocabularyError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        if words.is_empty() {
            return Err(VocabularyError::EmptyWordList);
        }
        Ok(Self(words))
    }
}

impl From<WordList> for Vec<String> {
    fn from(list: WordList) -> Self {
        list.0
    }
}

/// All fixed word lists, grouped by what they feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    // Customers
    pub first_names: WordList,
    pub last_names: WordList,
    pub email_domains: WordList,
    pub phone_area_codes: WordList,
    pub street_names: WordList,
    pub cities: WordList,
    pub states: WordList,
    pub order_notes: WordList,

    // Products
    pub product_adjectives: WordList,
    pub product_categories: WordList,
    pub product_nouns: WordList,
    pub item_id_prefixes: WordList,

    // Order id channel prefixes, [A-Z0-9]+ only
    pub order_id_channels: WordList,

    // Record metadata
    pub order_statuses: WordList,
    pub document_statuses: WordList,
    pub priorities: WordList,
    pub sources: WordList,
    pub regions: WordList,
    pub payment_methods: WordList,
    pub shipping_statuses: WordList,
    pub carriers: WordList,
}

impl Vocabulary {
    /// Parse a vocabulary from YAML. Lists not present keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Self = serde_yaml::from_str(yaml)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Check constraints that the list types alone cannot express.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if let Some(channel) = self
            .order_id_channels
            .as_slice()
            .iter()
            .find(|c| c.is_empty() || !c.bytes().all(|b| ALPHANUMERIC.contains(&b)))
        {
            return Err(VocabularyError::InvalidChannel(channel.clone()));
        }
        Ok(())
    }

    /// Load a vocabulary from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            first_names: WordList::from_static(&[
                "John",
                "Jane",
                "Michael",
                "Sarah",
                "David",
                "Emma",
                "Robert",
                "Lisa",
                "James",
                "Jennifer",
                "William",
                "Jessica",
                "Richard",
                "Ashley",
                "Charles",
                "Amanda",
                "Thomas",
                "Melissa",
                "Christopher",
                "Deborah",
                "Daniel",
                "Rachel",
                "Matthew",
                "Carolyn",
                "Anthony",
                "Janet",
                "Mark",
                "Catherine",
                "Donald",
                "Maria",
            ]),
            last_names: WordList::from_static(&[
                "Smith",
                "Johnson",
                "Williams",
                "Brown",
                "Jones",
                "Garcia",
                "Miller",
                "Davis",
                "Rodriguez",
                "Martinez",
                "Hernandez",
                "Lopez",
                "Gonzalez",
                "Wilson",
                "Anderson",
                "Thomas",
                "Taylor",
                "Moore",
                "Jackson",
                "Martin",
                "Lee",
                "Perez",
                "Thompson",
                "White",
                "Harris",
                "Sanchez",
                "Clark",
                "Ramirez",
                "Lewis",
                "Robinson",
            ]),
            email_domains: WordList::from_static(&[
                "gmail.com",
                "yahoo.com",
                "hotmail.com",
                "outlook.com",
                "email.com",
                "company.com",
                "business.net",
                "mail.org",
                "inbox.com",
                "fastmail.com",
                "protonmail.com",
                "icloud.com",
                "live.com",
                "msn.com",
                "aol.com",
                "zoho.com",
                "yandex.com",
                "tutanota.com",
                "mailfence.com",
                "hey.com",
            ]),
            phone_area_codes: WordList::from_static(&[
                "555", "444", "333", "222", "111", "666", "777", "888", "999",
            ]),
            street_names: WordList::from_static(&[
                "Main Street",
                "Oak Avenue",
                "Park Road",
                "First Street",
                "Second Avenue",
                "Elm Street",
                "Washington Avenue",
                "Maple Street",
                "Cedar Road",
                "Pine Street",
                "Lincoln Avenue",
                "Broadway",
                "Church Street",
                "High Street",
                "School Road",
            ]),
            cities: WordList::from_static(&[
                "Springfield",
                "Franklin",
                "Georgetown",
                "Madison",
                "Riverside",
                "Oakland",
                "Fairview",
                "Greenville",
                "Salem",
                "Bristol",
                "Clinton",
                "Manchester",
                "Ashland",
                "Burlington",
                "Dover",
            ]),
            states: WordList::from_static(&[
                "CA", "NY", "TX", "FL", "IL", "PA", "OH", "GA", "NC", "MI",
            ]),
            order_notes: WordList::from_static(&[
                "Please handle with care",
                "Gift wrapping requested",
                "Delivery instructions: Ring doorbell",
                "Leave at front door if not home",
                "Contact customer before delivery",
                "Fragile items - handle carefully",
                "Rush delivery requested",
                "Customer prefers morning delivery",
                "Special packaging requested",
                "Contact via phone for delivery",
            ]),
            product_adjectives: WordList::from_static(&[
                "Premium",
                "Deluxe",
                "Professional",
                "Eco-Friendly",
                "Smart",
                "Wireless",
                "Portable",
                "Durable",
                "Luxury",
                "Compact",
            ]),
            product_categories: WordList::from_static(&[
                "Electronics",
                "Home & Garden",
                "Clothing",
                "Books",
                "Sports",
                "Beauty",
                "Automotive",
                "Office",
                "Kitchen",
                "Tech",
            ]),
            product_nouns: WordList::from_static(&[
                "Headphones",
                "Notebook",
                "Coffee Mug",
                "Phone Case",
                "Backpack",
                "Desk Lamp",
                "Water Bottle",
                "Keyboard",
                "Mouse Pad",
                "Charger",
                "Bluetooth Speaker",
                "Tablet Stand",
                "Pen Set",
                "Calendar",
                "Power Bank",
                "Cable Organizer",
                "Monitor Stand",
                "Webcam",
                "USB Hub",
                "Desk Organizer",
                "Plant Pot",
                "Picture Frame",
                "Travel Mug",
                "Notebook Holder",
                "Smartphone Stand",
                "Laptop Sleeve",
            ]),
            item_id_prefixes: WordList::from_static(&["ITEM", "SKU", "PROD"]),
            order_id_channels: WordList::from_static(&["WEB", "APP", "STORE"]),
            order_statuses: WordList::from_static(&[
                "PENDING",
                "PROCESSING",
                "CONFIRMED",
                "SHIPPED",
                "DELIVERED",
            ]),
            document_statuses: WordList::from_static(&[
                "PENDING",
                "GENERATING",
                "COMPLETED",
                "FAILED",
            ]),
            priorities: WordList::from_static(&["low", "normal", "high", "urgent"]),
            sources: WordList::from_static(&["website", "mobile_app", "phone", "store", "api"]),
            regions: WordList::from_static(&["us-east", "us-west", "eu-central", "ap-southeast"]),
            payment_methods: WordList::from_static(&[
                "credit_card",
                "debit_card",
                "paypal",
                "bank_transfer",
            ]),
            shipping_statuses: WordList::from_static(&[
                "PENDING",
                "DISPATCHED",
                "IN_TRANSIT",
                "DELIVERED",
            ]),
            carriers: WordList::from_static(&["FedEx", "UPS", "DHL", "USPS"]),
        }
    }
}
