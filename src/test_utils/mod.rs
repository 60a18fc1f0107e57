#![allow(missing_docs)]

use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, endpoints};

/// A password strong enough to pass validation.
pub(crate) const TEST_PASSWORD: &str = "averysafeandsecurepassword";

/// The lowest cost bcrypt accepts, so the tests stay fast.
const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::with_sqlite(connection, "foobar")
        .expect("Could not create app state.")
        .with_password_cost(TEST_PASSWORD_COST)
}

pub(crate) fn get_test_server() -> TestServer {
    server_for_state(get_test_state())
}

pub(crate) fn server_for_state(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Register `username` with [TEST_PASSWORD] and return the response body.
pub(crate) async fn register(server: &TestServer, username: &str) -> Value {
    let response = server
        .post(endpoints::USERS)
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json()
}

/// Register and log in `username`. Pass `.cookies()` of the returned response
/// to authenticated requests.
pub(crate) async fn log_in_new_user(server: &TestServer, username: &str) -> TestResponse {
    register(server, username).await;

    let response = server
        .post(endpoints::LOG_IN)
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    response
}

#[track_caller]
pub(crate) fn assert_error_body(response: &TestResponse) {
    let body: Value = response.json();

    assert!(
        body["error"].is_string(),
        "want a JSON error body, got {body}"
    );
}
