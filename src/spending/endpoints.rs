//! Route handlers for listing, creating and deleting spendings.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    AppState, Error, NewSpending, RecordID, Spending, UserID, date::parse_date,
    stores::SpendingStore,
};

/// The state needed to list, create or delete spendings.
#[derive(Clone)]
pub struct SpendingState {
    /// The store for managing spendings.
    pub spending_store: Arc<dyn SpendingStore>,
}

impl FromRef<AppState> for SpendingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            spending_store: state.spending_store.clone(),
        }
    }
}

/// The body of a request to record a spending.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpendingForm {
    /// The day the money was spent, as DD/MM/YYYY.
    pub date: String,
    /// How much was spent, as a JSON number or string.
    pub amount: Decimal,
    /// What the money was spent on.
    #[serde(default)]
    pub description: Option<String>,
    /// A free-text label for grouping spendings.
    #[serde(default)]
    pub category: Option<String>,
}

/// Record a spending for the logged in user and respond with 201 Created.
pub async fn create_spending_endpoint(
    State(state): State<SpendingState>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<SpendingForm>,
) -> Result<(StatusCode, Json<Spending>), Error> {
    let date = parse_date(&form.date)?;
    let new_spending = NewSpending::new(date, form.amount)?
        .description(form.description)
        .category(form.category);

    let spending = state.spending_store.create(user_id, new_spending)?;
    tracing::debug!("Created spending {} for user {user_id}", spending.id);

    Ok((StatusCode::CREATED, Json(spending)))
}

/// List every spending of the logged in user.
pub async fn list_spendings_endpoint(
    State(state): State<SpendingState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Spending>>, Error> {
    state.spending_store.get_by_user(user_id).map(Json)
}

/// Delete one of the logged in user's spendings.
///
/// Responds with 404 if the user has no spending with that ID.
pub async fn delete_spending_endpoint(
    State(state): State<SpendingState>,
    Extension(user_id): Extension<UserID>,
    Path(spending_id): Path<String>,
) -> Result<StatusCode, Error> {
    let spending_id = RecordID::parse_param(&spending_id)?;
    state.spending_store.delete(user_id, spending_id)?;

    Ok(StatusCode::NO_CONTENT)
}
