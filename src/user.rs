//! The registered users of the application and their identifiers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// Every budget config, transaction and spending is owned by exactly one user ID.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user logs in with.
///
/// Usernames have surrounding whitespace removed and are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a username from `raw_username`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyUsername] if nothing is left after trimming.
    pub fn new(raw_username: &str) -> Result<Self, Error> {
        let trimmed = raw_username.trim();

        if trimmed.is_empty() {
            Err(Error::EmptyUsername)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Create a username without any validation.
    ///
    /// The caller should ensure the string is trimmed and non-empty, e.g. when
    /// reading a username back from a store.
    pub fn new_unchecked(raw_username: &str) -> Self {
        Self(raw_username.to_owned())
    }

    /// The username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::new(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// The caller should ensure that `id` and `username` are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application store.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: Username,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}
