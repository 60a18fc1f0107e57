//! Opaque identifiers for transactions and spendings.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// A unique identifier generated by a store when a record is created.
///
/// Clients should treat the ID as an opaque string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordID(Uuid);

impl RecordID {
    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID taken from a URL path.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if `param` is not a valid ID, since no record
    /// can have it.
    pub fn parse_param(param: &str) -> Result<Self, Error> {
        Self::from_str(param).map_err(|error| {
            tracing::debug!("Rejected record ID \"{param}\": {error}");
            Error::NotFound
        })
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RecordID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for RecordID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Display for RecordID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
