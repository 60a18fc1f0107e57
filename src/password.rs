//! Password validation and hashing.
//!
//! A [ValidatedPassword] wraps a raw password that is strong enough to use,
//! and a [PasswordHash] is the salted bcrypt hash that gets stored.

use std::fmt::Display;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that has been validated, but not yet hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create and validate a new password from a string.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] if the password is easy to guess. The error
    /// message explains why and suggests how to make it stronger.
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        let analysis = zxcvbn(raw_password, &[]);

        match analysis.score() {
            Score::Three | Score::Four => Ok(Self(raw_password.to_owned())),
            _ => Err(Error::TooWeak(
                analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }

    /// Create a new `ValidatedPassword` without any validation.
    ///
    /// Only intended for tests and tooling where the strength check gets in the way.
    pub fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_owned())
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default bcrypt cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a validated password with the specified bcrypt `cost`.
    ///
    /// A cost of at least 12 is recommended outside of tests.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the password could not be hashed.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap an existing hash without checking it, e.g. when loading a user from a store.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Validate and hash `raw_password` in one step.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let validated_password = ValidatedPassword::new(raw_password)?;
        PasswordHash::new(validated_password, cost)
    }

    /// Check that `raw_password` matches the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }

    /// The hash as a string slice, for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod validated_password_tests {
    use crate::{Error, ValidatedPassword};

    #[test]
    fn new_fails_on_empty() {
        let result = ValidatedPassword::new("");

        assert!(matches!(result, Err(Error::TooWeak(_))));
    }

    #[test]
    fn new_fails_on_common_password() {
        let result = ValidatedPassword::new("password1234");

        assert!(matches!(result, Err(Error::TooWeak(_))));
    }

    #[test]
    fn new_succeeds_on_long_password() {
        let result = ValidatedPassword::new("averylongandsecurepassword");

        assert!(result.is_ok());
    }

    #[test]
    fn display_hides_password() {
        let password = ValidatedPassword::new_unchecked("hunter2");

        assert_eq!(password.to_string(), "********");
    }
}

#[cfg(test)]
mod password_hash_tests {
    use crate::{PasswordHash, ValidatedPassword};

    #[test]
    fn hash_password_produces_verifiable_hash() {
        let password = "roostersgocockledoodledoo";
        let hash = PasswordHash::from_raw_password(password, 4).unwrap();

        assert!(hash.verify(password).unwrap());
        assert!(!hash.verify("the_wrong_password").unwrap());
    }

    #[test]
    fn hash_duplicate_password_produces_unique_hash() {
        let password = ValidatedPassword::new("turkeysgogobblegobble").unwrap();
        let hash = PasswordHash::new(password.clone(), 4).unwrap();
        let dupe_hash = PasswordHash::new(password, 4).unwrap();

        assert_ne!(hash, dupe_hash);
    }

    #[test]
    fn verify_fails_on_malformed_hash() {
        let hash = PasswordHash::new_unchecked("not a bcrypt hash");

        assert!(hash.verify("anything").is_err());
    }
}
