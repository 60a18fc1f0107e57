use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, BudgetConfig, Error, UserID, date::parse_date, stores::BudgetConfigStore};

/// The state needed to read or replace a budget config.
#[derive(Clone)]
pub struct BudgetConfigState {
    /// The store for budget configs.
    pub budget_config_store: Arc<dyn BudgetConfigStore>,
}

impl FromRef<AppState> for BudgetConfigState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_config_store: state.budget_config_store.clone(),
        }
    }
}

/// The body of a request to set the budget config.
///
/// Dates are DD/MM/YYYY strings and money may be a JSON number or string.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetConfigForm {
    pub start_money: Decimal,
    pub start_date: String,
    pub end_money: Decimal,
    pub end_date: String,
}

/// Get the logged in user's budget config.
///
/// # Errors
///
/// Returns [Error::ConfigMissing] if the user has not set a config yet.
pub async fn get_config_endpoint(
    State(state): State<BudgetConfigState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<BudgetConfig>, Error> {
    state
        .budget_config_store
        .get(user_id)?
        .map(Json)
        .ok_or(Error::ConfigMissing)
}

/// Replace the logged in user's budget config and respond with the saved config.
pub async fn set_config_endpoint(
    State(state): State<BudgetConfigState>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<BudgetConfigForm>,
) -> Result<Json<BudgetConfig>, Error> {
    let config = BudgetConfig::new(
        form.start_money,
        parse_date(&form.start_date)?,
        form.end_money,
        parse_date(&form.end_date)?,
    )?;

    state.budget_config_store.upsert(user_id, config.clone())?;
    tracing::debug!(
        "Set budget window {} to {} for user {user_id}",
        config.start_date,
        config.end_date
    );

    Ok(Json(config))
}
