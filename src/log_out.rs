//! Log-out route handler that invalidates the authentication cookies.

use axum::http::StatusCode;
use axum_extra::extract::PrivateCookieJar;

use crate::auth::invalidate_auth_cookie;

/// Invalidate the auth cookies.
pub async fn get_log_out(jar: PrivateCookieJar) -> (StatusCode, PrivateCookieJar) {
    (StatusCode::NO_CONTENT, invalidate_auth_cookie(jar))
}
