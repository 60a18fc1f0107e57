//! Defines the budget config store trait.

use crate::{BudgetConfig, Error, UserID};

/// Handles saving and loading each user's [BudgetConfig].
pub trait BudgetConfigStore: Send + Sync {
    /// Get the config owned by `user_id`, or `None` if the user has not set one.
    fn get(&self, user_id: UserID) -> Result<Option<BudgetConfig>, Error>;

    /// Save `config` for `user_id`, replacing any existing config as a whole.
    fn upsert(&self, user_id: UserID, config: BudgetConfig) -> Result<(), Error>;
}
