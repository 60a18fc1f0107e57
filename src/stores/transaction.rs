//! Defines the transaction store trait.

use crate::{Error, NewTransaction, RecordID, Transaction, UserID};

/// Handles the creation, retrieval and deletion of [Transaction]s.
///
/// Every operation is scoped to one user: implementers must never return or
/// delete a transaction owned by a different user.
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction for `user_id` under a freshly generated ID.
    fn create(&self, user_id: UserID, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve all transactions owned by `user_id`, in no particular order.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id` owned by `user_id`.
    ///
    /// Returns [Error::NotFound] if there is no such transaction, including
    /// when the ID belongs to another user.
    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error>;
}
