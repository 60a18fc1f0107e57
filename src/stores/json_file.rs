//! A store that keeps every record in a single JSON document on disk.
//!
//! The whole document is rewritten on each change. A change is first applied
//! to a copy of the in-memory dataset, the copy is written to a temporary file
//! next to the data file and then renamed over it. The in-memory dataset is
//! only replaced once the rename succeeds, so a failed write leaves both the
//! file and the store unchanged.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};

use crate::{
    BudgetConfig, Error, NewSpending, NewTransaction, PasswordHash, RecordID, Spending,
    Transaction, User, UserID, Username,
    stores::{BudgetConfigStore, SpendingStore, TransactionStore, UserStore},
};

const TMP_SUFFIX: &str = "tmp";

/// The contents of the data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Dataset {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    configs: Vec<OwnedConfig>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    spendings: Vec<Spending>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OwnedConfig {
    user_id: UserID,
    config: BudgetConfig,
}

/// Stores users, budget configs, transactions and spendings in one JSON file.
///
/// A single `JsonFileStore` implements every store trait, wrap it in an
/// [Arc](std::sync::Arc) to share it between them.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    dataset: Mutex<Dataset>,
}

impl JsonFileStore {
    /// Open the data file at `path`.
    ///
    /// A missing file is treated as an empty dataset. The file is created on
    /// the first change.
    ///
    /// # Errors
    /// Returns [Error::FileStoreError] if the file exists but cannot be read or
    /// does not contain a valid dataset.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let dataset = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|error| {
                file_store_error(&path, "parse", error)
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                Dataset::default()
            }
            Err(error) => return Err(file_store_error(&path, "read", error)),
        };

        Ok(Self {
            path,
            dataset: Mutex::new(dataset),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Dataset>, Error> {
        self.dataset.lock().map_err(|error| {
            tracing::error!("Could not acquire the data file lock: {error}");
            Error::DatabaseLockError
        })
    }

    /// Apply `change` to a copy of the dataset, persist the copy and then make
    /// it the current dataset.
    fn update<T>(&self, change: impl FnOnce(&mut Dataset) -> Result<T, Error>) -> Result<T, Error> {
        let mut dataset = self.lock()?;
        let mut updated = dataset.clone();

        let result = change(&mut updated)?;
        self.save(&updated)?;
        *dataset = updated;

        Ok(result)
    }

    fn save(&self, dataset: &Dataset) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(dataset)
            .map_err(|error| file_store_error(&self.path, "serialize", error))?;

        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json).map_err(|error| file_store_error(&tmp, "write", error))?;
        fs::rename(&tmp, &self.path)
            .map_err(|error| file_store_error(&self.path, "replace", error))?;

        tracing::debug!("Saved data file {}", self.path.display());

        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = match path.extension().and_then(|extension| extension.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_owned(),
    };
    tmp.set_extension(extension);
    tmp
}

fn write_file(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}

fn file_store_error(path: &Path, action: &str, error: impl std::fmt::Display) -> Error {
    tracing::error!("Could not {action} {}: {error}", path.display());
    Error::FileStoreError(format!("could not {action} {}: {error}", path.display()))
}

impl UserStore for JsonFileStore {
    fn create(&self, username: Username, password_hash: PasswordHash) -> Result<User, Error> {
        self.update(|dataset| {
            if dataset.users.iter().any(|user| user.username == username) {
                return Err(Error::DuplicateUsername(username.to_string()));
            }

            let next_id = dataset
                .users
                .iter()
                .map(|user| user.id.as_i64())
                .max()
                .unwrap_or(0)
                + 1;

            let user = User {
                id: UserID::new(next_id),
                username,
                password_hash,
            };
            dataset.users.push(user.clone());

            Ok(user)
        })
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.lock()?
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_by_username(&self, username: &Username) -> Result<User, Error> {
        self.lock()?
            .users
            .iter()
            .find(|user| &user.username == username)
            .cloned()
            .ok_or(Error::NotFound)
    }
}

impl BudgetConfigStore for JsonFileStore {
    fn get(&self, user_id: UserID) -> Result<Option<BudgetConfig>, Error> {
        Ok(self
            .lock()?
            .configs
            .iter()
            .find(|owned| owned.user_id == user_id)
            .map(|owned| owned.config.clone()))
    }

    fn upsert(&self, user_id: UserID, config: BudgetConfig) -> Result<(), Error> {
        self.update(|dataset| {
            match dataset
                .configs
                .iter_mut()
                .find(|owned| owned.user_id == user_id)
            {
                Some(owned) => owned.config = config,
                None => dataset.configs.push(OwnedConfig { user_id, config }),
            }

            Ok(())
        })
    }
}

impl TransactionStore for JsonFileStore {
    fn create(&self, user_id: UserID, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = transaction.finalize(RecordID::generate(), user_id);

        self.update(|dataset| {
            dataset.transactions.push(transaction.clone());
            Ok(transaction)
        })
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .lock()?
            .transactions
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error> {
        self.update(|dataset| {
            let position = dataset
                .transactions
                .iter()
                .position(|transaction| transaction.id == id && transaction.user_id == user_id)
                .ok_or(Error::NotFound)?;
            dataset.transactions.remove(position);

            Ok(())
        })
    }
}

impl SpendingStore for JsonFileStore {
    fn create(&self, user_id: UserID, spending: NewSpending) -> Result<Spending, Error> {
        let spending = spending.finalize(RecordID::generate(), user_id);

        self.update(|dataset| {
            dataset.spendings.push(spending.clone());
            Ok(spending)
        })
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Spending>, Error> {
        let mut spendings: Vec<Spending> = self
            .lock()?
            .spendings
            .iter()
            .filter(|spending| spending.user_id == user_id)
            .cloned()
            .collect();
        spendings.sort_by_key(|spending| spending.date);

        Ok(spendings)
    }

    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error> {
        self.update(|dataset| {
            let position = dataset
                .spendings
                .iter()
                .position(|spending| spending.id == id && spending.user_id == user_id)
                .ok_or(Error::NotFound)?;
            dataset.spendings.remove(position);

            Ok(())
        })
    }
}
