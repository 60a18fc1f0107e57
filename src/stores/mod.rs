//! Contains traits and implementations for objects that store users, budget
//! configs, transactions and spendings.
//!
//! Two backends are provided: [sqlite] keeps records in a SQLite database and
//! [json_file] keeps the whole dataset in a single JSON document.

mod budget_config;
mod spending;
mod transaction;
mod user;

pub mod json_file;
pub mod sqlite;

pub use budget_config::BudgetConfigStore;
pub use json_file::JsonFileStore;
pub use spending::SpendingStore;
pub use transaction::TransactionStore;
pub use user::UserStore;
