//! The endpoint for logging in a user.
//!
//! The auth module handles the lower level cookie logic.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use serde::Deserialize;
use time::Duration;

use crate::{AppState, Error, Username, auth::set_auth_cookie, stores::UserStore};

/// The state needed to perform a login.
#[derive(Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The store to look the user up in.
    pub user_store: Arc<dyn UserStore>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            user_store: state.user_store.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials entered during log-in.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests.
///
/// On success the auth cookies are set and 200 OK is returned.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The username does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred when verifying the password.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, PrivateCookieJar), Error> {
    let username = Username::new(&credentials.username).map_err(|_| Error::InvalidCredentials)?;

    let user = match state.user_store.get_by_username(&username) {
        Ok(user) => user,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    if !user.password_hash.verify(&credentials.password)? {
        tracing::debug!("Wrong password for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration).map_err(|error| {
        tracing::error!("Could not set the auth cookie: {error}");
        Error::CookieError(error.to_string())
    })?;

    Ok((StatusCode::OK, jar))
}
