use axum::{Extension, Json, extract::State};

use crate::{Error, Transaction, UserID};

use super::create_transaction_endpoint::TransactionState;

/// A route handler that lists every transaction of the logged in user.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Transaction>>, Error> {
    state.transaction_store.get_by_user(user_id).map(Json)
}
