//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::{
    Error, NewTransaction, RecordID, Transaction, UserID,
    db::{CreateTable, MapRow, get_decimal},
    stores::TransactionStore,
};

use super::lock;

/// Stores transactions in the `ledger_transaction` table.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn create(&self, user_id: UserID, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = transaction.finalize(RecordID::generate(), user_id);

        lock(&self.connection)?.execute(
            "INSERT INTO ledger_transaction (id, user_id, amount, is_income, description, category)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                transaction.id.as_uuid(),
                user_id.as_i64(),
                transaction.amount.to_string(),
                transaction.is_income,
                &transaction.description,
                &transaction.category,
            ),
        )?;

        Ok(transaction)
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        lock(&self.connection)?
            .prepare(
                "SELECT id, user_id, amount, is_income, description, category
                FROM ledger_transaction WHERE user_id = :user_id",
            )?
            .query_map(
                &[(":user_id", &user_id.as_i64())],
                SQLiteTransactionStore::map_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error> {
        let rows_affected = lock(&self.connection)?.execute(
            "DELETE FROM ledger_transaction WHERE id = ?1 AND user_id = ?2",
            (id.as_uuid(), user_id.as_i64()),
        )?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS ledger_transaction (
                id BLOB PRIMARY KEY,
                user_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                is_income INTEGER NOT NULL,
                description TEXT,
                category TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_ledger_transaction_user_id
                ON ledger_transaction(user_id)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        let id: Uuid = row.get(0)?;
        let user_id: i64 = row.get(1)?;

        Ok(Transaction {
            id: id.into(),
            user_id: UserID::new(user_id),
            amount: get_decimal(row, 2)?,
            is_income: row.get(3)?,
            description: row.get(4)?,
            category: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{
        Error, NewTransaction, RecordID, UserID, db::CreateTable, stores::TransactionStore,
    };

    use super::SQLiteTransactionStore;

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteTransactionStore::create_table(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_then_list() {
        let store = get_test_store();
        let user_id = UserID::new(1);

        let created = store
            .create(
                user_id,
                NewTransaction::new(dec!(2500.75), true)
                    .unwrap()
                    .description(Some("Salary".to_owned())),
            )
            .unwrap();

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.amount, dec!(2500.75));
        assert_eq!(store.get_by_user(user_id), Ok(vec![created]));
    }

    #[test]
    fn create_generates_unique_ids() {
        let store = get_test_store();
        let user_id = UserID::new(1);

        let first = store
            .create(user_id, NewTransaction::new(dec!(1), false).unwrap())
            .unwrap();
        let second = store
            .create(user_id, NewTransaction::new(dec!(1), false).unwrap())
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn list_only_returns_own_transactions() {
        let store = get_test_store();
        let mine = store
            .create(UserID::new(1), NewTransaction::new(dec!(10), false).unwrap())
            .unwrap();
        store
            .create(UserID::new(2), NewTransaction::new(dec!(20), false).unwrap())
            .unwrap();

        assert_eq!(store.get_by_user(UserID::new(1)), Ok(vec![mine]));
    }

    #[test]
    fn delete_removes_transaction() {
        let store = get_test_store();
        let user_id = UserID::new(1);
        let transaction = store
            .create(user_id, NewTransaction::new(dec!(10), false).unwrap())
            .unwrap();

        store.delete(user_id, transaction.id).unwrap();

        assert_eq!(store.get_by_user(user_id), Ok(vec![]));
    }

    #[test]
    fn delete_missing_transaction_is_not_found() {
        let store = get_test_store();

        assert_eq!(
            store.delete(UserID::new(1), RecordID::generate()),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_other_users_transaction_is_not_found() {
        let store = get_test_store();
        let transaction = store
            .create(UserID::new(1), NewTransaction::new(dec!(10), false).unwrap())
            .unwrap();

        assert_eq!(
            store.delete(UserID::new(2), transaction.id),
            Err(Error::NotFound)
        );
        assert_eq!(store.get_by_user(UserID::new(1)), Ok(vec![transaction]));
    }
}
