//! Implements a SQLite backed spending store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::{
    Error, NewSpending, RecordID, Spending, UserID,
    db::{CreateTable, MapRow, get_decimal},
    stores::SpendingStore,
};

use super::lock;

/// Stores spendings in the `spending` table.
#[derive(Debug, Clone)]
pub struct SQLiteSpendingStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSpendingStore {
    /// Create a new store from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SpendingStore for SQLiteSpendingStore {
    fn create(&self, user_id: UserID, spending: NewSpending) -> Result<Spending, Error> {
        let spending = spending.finalize(RecordID::generate(), user_id);

        lock(&self.connection)?.execute(
            "INSERT INTO spending (id, user_id, date, amount, description, category)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                spending.id.as_uuid(),
                user_id.as_i64(),
                spending.date,
                spending.amount.to_string(),
                &spending.description,
                &spending.category,
            ),
        )?;

        Ok(spending)
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Spending>, Error> {
        lock(&self.connection)?
            .prepare(
                "SELECT id, user_id, date, amount, description, category
                FROM spending WHERE user_id = :user_id ORDER BY date ASC",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], SQLiteSpendingStore::map_row)?
            .map(|maybe_spending| maybe_spending.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error> {
        let rows_affected = lock(&self.connection)?.execute(
            "DELETE FROM spending WHERE id = ?1 AND user_id = ?2",
            (id.as_uuid(), user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteSpendingStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS spending (
                id BLOB PRIMARY KEY,
                user_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                amount TEXT NOT NULL,
                description TEXT,
                category TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_spending_user_date ON spending(user_id, date)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteSpendingStore {
    type ReturnType = Spending;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        let id: Uuid = row.get(0)?;
        let user_id: i64 = row.get(1)?;

        Ok(Spending {
            id: id.into(),
            user_id: UserID::new(user_id),
            date: row.get(2)?,
            amount: get_decimal(row, 3)?,
            description: row.get(4)?,
            category: row.get(5)?,
        })
    }
}
