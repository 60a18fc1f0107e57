use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, Error, NewTransaction, Transaction, UserID, stores::TransactionStore};

/// The state needed to list, create or delete transactions.
#[derive(Clone)]
pub struct TransactionState {
    /// The store for managing transactions.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The body of a request to create a transaction.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionForm {
    /// How much money moved, as a JSON number or string.
    pub amount: Decimal,
    /// Whether the money came in.
    pub is_income: bool,
    /// What the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
    /// A free-text label for grouping transactions.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for creating a new transaction for the logged in user.
///
/// Responds with 201 Created and the stored transaction, including its ID.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let new_transaction = NewTransaction::new(form.amount, form.is_income)?
        .description(form.description)
        .category(form.category);

    let transaction = state.transaction_store.create(user_id, new_transaction)?;
    tracing::debug!("Created transaction {} for user {user_id}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
