//! [`Fee`] represents an order amount in the smallest currency unit (fen).
//!
//! This module holds its type definition and implementations.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Represents an order amount, in fen.
///
/// The gateway transmits `total_fee` as a decimal string, so that is how it serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee(pub u64);

impl Fee {
    /// Reject zero amounts before anything is sent to the gateway.
    pub fn validate(self) -> Result<Self> {
        if self.0 == 0 {
            return Err(Error::AmountInvalid);
        }
        Ok(self)
    }
}

impl From<u8> for Fee {
    fn from(value: u8) -> Self {
        Fee(value as u64)
    }
}

impl From<u16> for Fee {
    fn from(value: u16) -> Self {
        Fee(value as u64)
    }
}

impl From<u32> for Fee {
    fn from(value: u32) -> Self {
        Fee(value as u64)
    }
}

impl From<u64> for Fee {
    fn from(value: u64) -> Self {
        Fee(value)
    }
}

impl Display for Fee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Fee {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Fee {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = s.parse::<u64>().map_err(serde::de::Error::custom)?;
        Ok(Fee(value))
    }
}
