//! Order identifier patterns.
//!
//! Five shapes simulate heterogeneous upstream id schemes. Each embeds the
//! generation timestamp and a random alphanumeric suffix; collisions are
//! improbable but not prevented.
//!
//! | Pattern       | Shape                                   |
//! |---------------|-----------------------------------------|
//! | `Timestamped` | `ORD-{millis}-{4}`                      |
//! | `Calendar`    | `ORDER-{YYYYMMDD}-{HHMMSSmmm}-{4}`      |
//! | `Channel`     | `{channel}-{millis}-{3}`                |
//! | `Test`        | `TEST-{last 8 digits of millis}-{4}`    |
//! | `Wrapped`     | `{2}-{millis}-{2}`                      |

use crate::random::{RandomSource, ALPHANUMERIC};
use crate::vocabulary::WordList;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderIdPattern {
    Timestamped,
    Calendar,
    Channel,
    Test,
    Wrapped,
}

impl OrderIdPattern {
    pub const ALL: [OrderIdPattern; 5] = [
        OrderIdPattern::Timestamped,
        OrderIdPattern::Calendar,
        OrderIdPattern::Channel,
        OrderIdPattern::Test,
        OrderIdPattern::Wrapped,
    ];

    /// Pick one of the five patterns uniformly.
    pub fn choose<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Render an id in this pattern.
    pub fn generate<R: RandomSource + ?Sized>(
        self,
        rng: &mut R,
        now: DateTime<Utc>,
        channels: &WordList,
    ) -> String {
        let millis = now.timestamp_millis();
        match self {
            Self::Timestamped => format!("ORD-{millis}-{}", rng.alphanumeric(4)),
            Self::Calendar => format!(
                "ORDER-{}-{}-{}",
                now.format("%Y%m%d"),
                now.format("%H%M%S%3f"),
                rng.alphanumeric(4)
            ),
            Self::Channel => format!(
                "{}-{millis}-{}",
                channels.pick(rng),
                rng.alphanumeric(3)
            ),
            Self::Test => format!(
                "TEST-{:08}-{}",
                millis.rem_euclid(100_000_000),
                rng.alphanumeric(4)
            ),
            Self::Wrapped => format!(
                "{}-{millis}-{}",
                rng.alphanumeric(2),
                rng.alphanumeric(2)
            ),
        }
    }

    /// Identify which pattern produced `id`, if any.
    pub fn classify(id: &str) -> Option<Self> {
        let parts: Vec<&str> = id.split('-').collect();
        match parts.as_slice() {
            ["ORD", millis, suffix] if is_digits(millis) && is_alnum(suffix, 4) => {
                Some(Self::Timestamped)
            }
            ["ORDER", date, time, suffix]
                if is_digits(date)
                    && date.len() == 8
                    && is_digits(time)
                    && time.len() == 9
                    && is_alnum(suffix, 4) =>
            {
                Some(Self::Calendar)
            }
            ["TEST", tail, suffix] if is_digits(tail) && tail.len() == 8 && is_alnum(suffix, 4) => {
                Some(Self::Test)
            }
            [prefix, millis, suffix]
                if is_alnum(prefix, 2) && is_digits(millis) && is_alnum(suffix, 2) =>
            {
                Some(Self::Wrapped)
            }
            [channel, millis, suffix]
                if !channel.is_empty()
                    && channel.bytes().all(|b| ALPHANUMERIC.contains(&b))
                    && is_digits(millis)
                    && is_alnum(suffix, 3) =>
            {
                Some(Self::Channel)
            }
            _ => None,
        }
    }
}

/// Generate an id using a uniformly chosen pattern.
pub fn generate_order_id<R: RandomSource + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    channels: &WordList,
) -> String {
    OrderIdPattern::choose(rng).generate(rng, now, channels)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_alnum(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| ALPHANUMERIC.contains(&b))
}
