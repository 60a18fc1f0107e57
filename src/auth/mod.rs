//! Cookie based authentication: setting, reading and invalidating the auth
//! cookies, and the middleware that guards the protected routes.

mod cookie;
mod middleware;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use middleware::{AuthState, auth_guard};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_EXPIRY, COOKIE_USER_ID};
