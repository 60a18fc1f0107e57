//! Implements a struct that holds the state of the REST server.

use std::{path::Path, sync::Arc};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error, PasswordHash,
    auth::DEFAULT_COOKIE_DURATION,
    stores::{
        BudgetConfigStore, JsonFileStore, SpendingStore, TransactionStore, UserStore,
        sqlite::create_sqlite_stores,
    },
};

/// The state of the REST server.
///
/// The stores are trait objects so the storage backend can be picked at
/// start-up.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,

    /// The store for users.
    pub user_store: Arc<dyn UserStore>,

    /// The store for budget configs.
    pub budget_config_store: Arc<dyn BudgetConfigStore>,

    /// The store for transactions.
    pub transaction_store: Arc<dyn TransactionStore>,

    /// The store for spendings.
    pub spending_store: Arc<dyn SpendingStore>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn with_sqlite(db_connection: Connection, cookie_secret: &str) -> Result<Self, Error> {
        let stores = create_sqlite_stores(db_connection)?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            password_cost: PasswordHash::DEFAULT_COST,
            user_store: Arc::new(stores.user_store),
            budget_config_store: Arc::new(stores.budget_config_store),
            transaction_store: Arc::new(stores.transaction_store),
            spending_store: Arc::new(stores.spending_store),
        })
    }

    /// Create a new [AppState] that keeps all records in the JSON file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn with_json_file(path: impl AsRef<Path>, cookie_secret: &str) -> Result<Self, Error> {
        let store = Arc::new(JsonFileStore::open(path)?);

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            password_cost: PasswordHash::DEFAULT_COST,
            user_store: store.clone(),
            budget_config_store: store.clone(),
            transaction_store: store.clone(),
            spending_store: store,
        })
    }

    /// Use `cost` for hashing passwords of new users.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
