//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::{
    AppState, Error,
    allowance::get_allowance_endpoint,
    auth::auth_guard,
    budget_config::{get_config_endpoint, set_config_endpoint},
    endpoints,
    log_in::post_log_in,
    log_out::get_log_out,
    logging::logging_middleware,
    register_user::register_user,
    spending::{create_spending_endpoint, delete_spending_endpoint, list_spendings_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::USERS, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_routes = Router::new()
        .route(
            endpoints::CONFIG,
            get(get_config_endpoint).post(set_config_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::SPENDINGS,
            get(list_spendings_endpoint).post(create_spending_endpoint),
        )
        .route(endpoints::SPENDING, delete(delete_spending_endpoint))
        .route(endpoints::ALLOWANCE, get(get_allowance_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
