//! Defines the spending store trait.

use crate::{Error, NewSpending, RecordID, Spending, UserID};

/// Handles the creation, retrieval and deletion of [Spending]s.
///
/// Every operation is scoped to one user: implementers must never return or
/// delete a spending owned by a different user.
pub trait SpendingStore: Send + Sync {
    /// Store a new spending for `user_id` under a freshly generated ID.
    fn create(&self, user_id: UserID, spending: NewSpending) -> Result<Spending, Error>;

    /// Retrieve all spendings owned by `user_id`, in no particular order.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Spending>, Error>;

    /// Delete the spending with `id` owned by `user_id`.
    ///
    /// Returns [Error::NotFound] if there is no such spending, including when
    /// the ID belongs to another user.
    fn delete(&self, user_id: UserID, id: RecordID) -> Result<(), Error>;
}
