use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    AppState, Error, UserID,
    allowance::calculate_daily_allowance,
    date::parse_date_param,
    stores::{BudgetConfigStore, SpendingStore, TransactionStore},
};

/// The state needed to calculate a daily allowance.
#[derive(Clone)]
pub struct AllowanceState {
    /// The store for budget configs.
    pub budget_config_store: Arc<dyn BudgetConfigStore>,
    /// The store for transactions.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The store for spendings.
    pub spending_store: Arc<dyn SpendingStore>,
}

impl FromRef<AppState> for AllowanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_config_store: state.budget_config_store.clone(),
            transaction_store: state.transaction_store.clone(),
            spending_store: state.spending_store.clone(),
        }
    }
}

/// The daily allowance for a date.
#[derive(Debug, Serialize)]
pub struct AllowanceResponse {
    #[serde(with = "crate::date::day_month_year")]
    date: Date,
    allowance: Decimal,
}

/// Get how much the logged in user may spend per day from the date in the
/// path, written as DD_MM_YYYY, through the end of their budget window.
///
/// # Errors
///
/// - [Error::InvalidDateFormat] if the date cannot be parsed.
/// - [Error::ConfigMissing] if the user has not set a budget config.
/// - [Error::DateOutOfRange] if the date is outside the budget window.
pub async fn get_allowance_endpoint(
    State(state): State<AllowanceState>,
    Extension(user_id): Extension<UserID>,
    Path(date): Path<String>,
) -> Result<Json<AllowanceResponse>, Error> {
    let date = parse_date_param(&date)?;
    let config = state
        .budget_config_store
        .get(user_id)?
        .ok_or(Error::ConfigMissing)?;
    let transactions = state.transaction_store.get_by_user(user_id)?;
    let spendings = state.spending_store.get_by_user(user_id)?;

    let allowance = calculate_daily_allowance(&config, &transactions, &spendings, date)?;

    Ok(Json(AllowanceResponse { date, allowance }))
}
