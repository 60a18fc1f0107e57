//! Defines the user store trait.

use crate::{Error, PasswordHash, User, UserID, Username};

/// Handles the creation and retrieval of [User]s.
pub trait UserStore: Send + Sync {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateUsername] if the username is already taken.
    fn create(&self, username: Username, password_hash: PasswordHash) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// Returns [Error::NotFound] if no user has the given ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their username.
    ///
    /// Returns [Error::NotFound] if no user has the given username.
    fn get_by_username(&self, username: &Username) -> Result<User, Error>;
}
