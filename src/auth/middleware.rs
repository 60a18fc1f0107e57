//! Authentication middleware that validates the auth cookies and extends sessions.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::{
    AppState, Error,
    auth::cookie::{extend_auth_cookie_duration_if_needed, get_user_id_from_auth_cookie},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid authorization cookie.
///
/// If the cookie is valid, the user ID is placed into the request extensions,
/// the request is executed normally and the cookie expiry is pushed back by the
/// session duration. Otherwise a 401 JSON error is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("Error getting cookie jar: {error:?}");
            return Error::CookieMissing.into_response();
        }
    };

    let user_id = match get_user_id_from_auth_cookie(&jar) {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!("Rejected request to {}: {error}", parts.uri.path());
            return error.into_response();
        }
    };

    parts.extensions.insert(user_id);
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    let jar = match extend_auth_cookie_duration_if_needed(jar.clone(), state.cookie_duration) {
        Ok(updated_jar) => updated_jar,
        Err(error) => {
            tracing::error!("Error extending cookie duration: {error}. Rolling back cookie jar.");
            jar
        }
    };

    for (key, value) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, value.to_owned());
    }

    Response::from_parts(parts, body)
}
