//! SQLite backed implementations of the store traits.
//!
//! All of the stores share one connection, see [create_sqlite_stores].

mod budget_config;
mod spending;
mod transaction;
mod user;

pub use budget_config::SQLiteBudgetConfigStore;
pub use spending::SQLiteSpendingStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The SQLite stores for each model, sharing a single connection.
#[derive(Debug, Clone)]
pub struct SQLiteStores {
    /// The store for users.
    pub user_store: SQLiteUserStore,
    /// The store for budget configs.
    pub budget_config_store: SQLiteBudgetConfigStore,
    /// The store for transactions.
    pub transaction_store: SQLiteTransactionStore,
    /// The store for spendings.
    pub spending_store: SQLiteSpendingStore,
}

/// Create the tables for the domain models in `connection` and wrap it in one
/// store per model.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn create_sqlite_stores(connection: Connection) -> Result<SQLiteStores, Error> {
    initialize(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    Ok(SQLiteStores {
        user_store: SQLiteUserStore::new(connection.clone()),
        budget_config_store: SQLiteBudgetConfigStore::new(connection.clone()),
        transaction_store: SQLiteTransactionStore::new(connection.clone()),
        spending_store: SQLiteSpendingStore::new(connection),
    })
}

fn lock(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("Could not acquire the database lock: {error}");
        Error::DatabaseLockError
    })
}
