//! Implements a SQLite backed budget config store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    BudgetConfig, Error, UserID,
    db::{CreateTable, MapRow, get_decimal},
    stores::BudgetConfigStore,
};

use super::lock;

/// Saves and loads one budget config per user.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetConfigStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetConfigStore {
    /// Create a new store from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetConfigStore for SQLiteBudgetConfigStore {
    fn get(&self, user_id: UserID) -> Result<Option<BudgetConfig>, Error> {
        lock(&self.connection)?
            .prepare(
                "SELECT start_money, start_date, end_money, end_date
                FROM budget_config WHERE user_id = :user_id",
            )?
            .query_row(
                &[(":user_id", &user_id.as_i64())],
                SQLiteBudgetConfigStore::map_row,
            )
            .optional()
            .map_err(|error| error.into())
    }

    /// Insert the config, or overwrite every column of the user's existing config.
    ///
    /// The upsert is a single statement, so readers see either the old or the new config.
    fn upsert(&self, user_id: UserID, config: BudgetConfig) -> Result<(), Error> {
        lock(&self.connection)?.execute(
            "INSERT INTO budget_config (user_id, start_money, start_date, end_money, end_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(user_id) DO UPDATE SET
                    start_money=excluded.start_money,
                    start_date=excluded.start_date,
                    end_money=excluded.end_money,
                    end_date=excluded.end_date;",
            (
                user_id.as_i64(),
                config.start_money.to_string(),
                config.start_date,
                config.end_money.to_string(),
                config.end_date,
            ),
        )?;

        Ok(())
    }
}

impl CreateTable for SQLiteBudgetConfigStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget_config (
                user_id INTEGER PRIMARY KEY,
                start_money TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_money TEXT NOT NULL,
                end_date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetConfigStore {
    type ReturnType = BudgetConfig;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(BudgetConfig {
            start_money: get_decimal(row, 0)?,
            start_date: row.get(1)?,
            end_money: get_decimal(row, 2)?,
            end_date: row.get(3)?,
        })
    }
}
