//! Movie runtime, stored as whole minutes and exchanged as `"<N> mins"`.
//!
//! The database and validation layers see a plain integer; only the JSON
//! boundary uses the human-readable string form. Decoding is strict: anything
//! other than exactly two space-separated tokens, the second being `mins`,
//! is rejected.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Unit suffix used on the wire, independent of the quantity.
pub const RUNTIME_UNIT: &str = "mins";

/// Runtime in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(pub i32);

impl Runtime {
    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl From<i32> for Runtime {
    fn from(minutes: i32) -> Self {
        Self(minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeParseError {
    #[error("invalid runtime format: expected \"<integer> mins\", got {0:?}")]
    Format(String),

    #[error("invalid runtime quantity {value:?}: {reason}")]
    Quantity { value: String, reason: String },
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {RUNTIME_UNIT}", self.0)
    }
}

impl FromStr for Runtime {
    type Err = RuntimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(' ').collect();
        let [quantity, unit] = parts.as_slice() else {
            return Err(RuntimeParseError::Format(s.to_string()));
        };
        if *unit != RUNTIME_UNIT {
            return Err(RuntimeParseError::Format(s.to_string()));
        }

        quantity
            .parse::<i32>()
            .map(Runtime)
            .map_err(|e| RuntimeParseError::Quantity {
                value: quantity.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string of the form \"<integer> {RUNTIME_UNIT}\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Runtime, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RuntimeVisitor)
    }
}
