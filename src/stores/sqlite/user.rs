//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error, PasswordHash, User, UserID, Username,
    db::{CreateTable, MapRow},
    stores::UserStore,
};

use super::lock;

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if the username is taken, or
    /// [Error::SqlError] if an SQL related error occurred.
    fn create(&self, username: Username, password_hash: PasswordHash) -> Result<User, Error> {
        let connection = lock(&self.connection)?;

        connection
            .execute(
                "INSERT INTO user (username, password) VALUES (?1, ?2)",
                (username.as_str(), password_hash.as_str()),
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                    if sql_error.extended_code == 2067 && desc.contains("username") =>
                {
                    Error::DuplicateUsername(username.to_string())
                }
                error => error.into(),
            })?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User {
            id,
            username,
            password_hash,
        })
    }

    /// Get the user from the database that has the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such user or [Error::SqlError] if there are SQL related errors.
    fn get(&self, id: UserID) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, username, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such user or [Error::SqlError] if there are SQL related errors.
    fn get_by_username(&self, username: &Username) -> Result<User, Error> {
        lock(&self.connection)?
            .prepare("SELECT id, username, password FROM user WHERE username = :username")?
            .query_row(
                &[(":username", username.as_str())],
                SQLiteUserStore::map_row,
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    username TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(0)?;
        let raw_username: String = row.get(1)?;
        let raw_password_hash: String = row.get(2)?;

        Ok(User {
            id: UserID::new(raw_id),
            username: Username::new_unchecked(&raw_username),
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}

#[cfg(test)]
mod user_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, PasswordHash, UserID, Username, db::CreateTable, stores::UserStore};

    use super::SQLiteUserStore;

    fn get_store() -> SQLiteUserStore {
        let conn = Connection::open_in_memory().unwrap();
        SQLiteUserStore::create_table(&conn).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn insert_user_succeeds() {
        let store = get_store();
        let username = Username::new("alice").unwrap();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user = store
            .create(username.clone(), password_hash.clone())
            .unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.username, username);
        assert_eq!(inserted_user.password_hash, password_hash);
    }

    #[test]
    fn insert_user_fails_on_duplicate_username() {
        let store = get_store();
        let username = Username::new("alice").unwrap();

        store
            .create(username.clone(), PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        assert_eq!(
            store.create(username, PasswordHash::new_unchecked("hunter3")),
            Err(Error::DuplicateUsername("alice".to_owned()))
        );
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let store = get_store();

        assert_eq!(store.get(UserID::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let store = get_store();
        let test_user = store
            .create(
                Username::new("bob").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        assert_eq!(store.get(test_user.id), Ok(test_user));
    }

    #[test]
    fn get_user_by_username() {
        let store = get_store();
        let test_user = store
            .create(
                Username::new("carol").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        assert_eq!(store.get_by_username(&test_user.username), Ok(test_user));
        assert_eq!(
            store.get_by_username(&Username::new("dave").unwrap()),
            Err(Error::NotFound)
        );
    }
}
