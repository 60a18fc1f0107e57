//! Allowance is a small personal-finance budgeting API.
//!
//! Users define a budget window (start and end money and dates), record
//! transactions and day-dated spendings, and ask how much they may still
//! spend per day for the rest of the window.
//!
//! This library provides a JSON REST API backed by either a SQLite database or
//! a single JSON data file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use time::Date;
use tokio::signal;

mod allowance;
mod app_state;
mod auth;
mod budget_config;
mod date;
mod db;
pub mod endpoints;
mod log_in;
mod log_out;
mod logging;
mod password;
mod record_id;
mod register_user;
mod routing;
mod spending;
pub mod stores;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use allowance::calculate_daily_allowance;
pub use app_state::AppState;
pub use budget_config::BudgetConfig;
pub use date::{format_date, parse_date_param};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use record_id::RecordID;
pub use routing::build_router;
pub use spending::{NewSpending, Spending};
pub use transaction::{NewTransaction, Transaction};
pub use user::{User, UserID, Username};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user has not defined a budget window yet.
    ///
    /// The client should create a config before asking for an allowance.
    #[error("no budget config has been set")]
    ConfigMissing,

    /// The requested date lies outside of the budget window.
    #[error("{date} is outside of the budget window {start} to {end}")]
    DateOutOfRange {
        /// The requested date.
        date: Date,
        /// The first day of the budget window.
        start: Date,
        /// The last day of the budget window.
        end: Date,
    },

    /// A budget config was given a start date after its end date.
    #[error("the start date {start} is after the end date {end}")]
    InvalidBudgetWindow {
        /// The first day of the rejected budget window.
        start: Date,
        /// The last day of the rejected budget window.
        end: Date,
    },

    /// A transaction or spending was given a negative amount.
    ///
    /// Use [crate::Transaction::is_income] to tell inflows and outflows apart.
    #[error("amounts must not be negative")]
    NegativeAmount,

    /// The stored amounts are too large to add up.
    #[error("the budget amounts are too large to calculate an allowance")]
    AmountOverflow,

    /// A date string could not be parsed.
    ///
    /// Callers should pass in the string that could not be parsed.
    #[error("could not parse \"{0}\" as a date, expected DD/MM/YYYY")]
    InvalidDateFormat(String),

    /// An empty string was used as a username.
    #[error("username cannot be empty")]
    EmptyUsername,

    /// The username is already taken by another user.
    #[error("the username \"{0}\" is already in use")]
    DuplicateUsername(String),

    /// The user provided an invalid combination of username and password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Either the user ID or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The auth cookies could not be built.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not set the auth cookie: {0}")]
    CookieError(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested resource was not found.
    ///
    /// This is also returned when the resource exists but belongs to another
    /// user, so that clients cannot learn whether other users' records exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The JSON data file could not be read, parsed or written.
    #[error("could not access the data file: {0}")]
    FileStoreError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound | Error::ConfigMissing => StatusCode::NOT_FOUND,
            Error::DateOutOfRange { .. }
            | Error::InvalidBudgetWindow { .. }
            | Error::NegativeAmount
            | Error::AmountOverflow
            | Error::InvalidDateFormat(_)
            | Error::EmptyUsername
            | Error::TooWeak(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateUsername(_) => StatusCode::CONFLICT,
            Error::InvalidCredentials | Error::CookieMissing => StatusCode::UNAUTHORIZED,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use time::macros::date;

    use crate::Error;

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::ConfigMissing, StatusCode::NOT_FOUND),
            (
                Error::DateOutOfRange {
                    date: date!(2024 - 02 - 01),
                    start: date!(2024 - 01 - 01),
                    end: date!(2024 - 01 - 10),
                },
                StatusCode::BAD_REQUEST,
            ),
            (Error::NegativeAmount, StatusCode::BAD_REQUEST),
            (Error::AmountOverflow, StatusCode::BAD_REQUEST),
            (
                Error::DuplicateUsername("alice".to_owned()),
                StatusCode::CONFLICT,
            ),
            (Error::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::FileStoreError("disk full".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want) in cases {
            let description = error.to_string();
            let got = error.into_response().status();

            assert_eq!(got, want, "want {want} for \"{description}\", got {got}");
        }
    }
}
