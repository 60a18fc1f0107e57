//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The route to register users.
pub const USERS: &str = "/api/users";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to read and replace the budget config.
pub const CONFIG: &str = "/api/config";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create spendings.
pub const SPENDINGS: &str = "/api/spendings";
/// The route to delete a single spending.
pub const SPENDING: &str = "/api/spendings/{spending_id}";
/// The route to get the daily allowance for a date given as DD_MM_YYYY.
pub const ALLOWANCE: &str = "/api/allowance/{date}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/spendings/{spending_id}', '{spending_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
