//! Traits and helpers shared by the SQLite backed stores.

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use rust_decimal::Decimal;

use crate::stores::sqlite::{
    SQLiteBudgetConfigStore, SQLiteSpendingStore, SQLiteTransactionStore, SQLiteUserStore,
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type a row is mapped to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Read a decimal that was stored as TEXT.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

/// Create all of the application's tables.
///
/// The tables are created inside a single exclusive SQL transaction, so either
/// every table exists afterwards or none of the changes are kept.
///
/// # Errors
/// Returns an error if any table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteBudgetConfigStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;
    SQLiteSpendingStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
