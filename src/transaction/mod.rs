//! Transactions: period-wide income and expenses.
//!
//! This module contains the `Transaction` model and the route handlers for
//! listing, creating and deleting transactions.

mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod list_transactions_endpoint;

pub use core::{NewTransaction, Transaction};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use list_transactions_endpoint::list_transactions_endpoint;
