//! The endpoint for registering new users.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, PasswordHash, UserID, Username, ValidatedPassword, stores::UserStore,
};

/// The state needed for creating a new user.
#[derive(Clone)]
pub struct RegistrationState {
    /// The bcrypt cost used to hash the new user's password.
    pub password_cost: u32,
    /// The store the new user is added to.
    pub user_store: Arc<dyn UserStore>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            password_cost: state.password_cost,
            user_store: state.user_store.clone(),
        }
    }
}

/// The body of a registration request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterForm {
    /// The name the user logs in with.
    pub username: String,
    /// The user's password in plain text.
    pub password: String,
}

/// The public view of a newly registered user.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisteredUser {
    /// The ID of the new user.
    pub id: UserID,
    /// The username of the new user.
    pub username: Username,
}

/// Handler for registering a new user.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The username is empty.
/// - The password is too weak.
/// - The username is already taken.
/// - An internal error occurred when hashing the password or saving the user.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Json(form): Json<RegisterForm>,
) -> Result<Response, Error> {
    let username = Username::new(&form.username)?;
    let password = ValidatedPassword::new(&form.password)?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    let user = state.user_store.create(username, password_hash)?;
    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id,
            username: user.username,
        }),
    )
        .into_response())
}
