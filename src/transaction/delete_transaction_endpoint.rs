use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{Error, RecordID, UserID};

use super::create_transaction_endpoint::TransactionState;

/// A route handler for deleting one of the logged in user's transactions.
///
/// Responds with 204 No Content, or 404 if the user has no transaction with
/// that ID.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, Error> {
    let transaction_id = RecordID::parse_param(&transaction_id)?;
    state.transaction_store.delete(user_id, transaction_id)?;
    tracing::debug!("Deleted transaction {transaction_id} for user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod delete_transaction_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        RecordID,
        endpoints::{self, format_endpoint},
        test_utils::{assert_error_body, get_test_server, log_in_new_user},
    };

    #[tokio::test]
    async fn delete_transaction_removes_it() {
        let server = get_test_server();
        let log_in = log_in_new_user(&server, "alice").await;
        let created: Value = server
            .post(endpoints::TRANSACTIONS)
            .add_cookies(log_in.cookies())
            .json(&json!({ "amount": 10, "is_income": true }))
            .await
            .json();
        let id = created["id"].as_str().unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookies(log_in.cookies())
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        server
            .get(endpoints::TRANSACTIONS)
            .add_cookies(log_in.cookies())
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = get_test_server();
        let log_in = log_in_new_user(&server, "alice").await;

        let response = server
            .delete(&format_endpoint(
                endpoints::TRANSACTION,
                RecordID::generate(),
            ))
            .add_cookies(log_in.cookies())
            .await;

        response.assert_status_not_found();
        assert_error_body(&response);
    }

    #[tokio::test]
    async fn delete_other_users_transaction_is_not_found() {
        let server = get_test_server();
        let alice = log_in_new_user(&server, "alice").await;
        let bob = log_in_new_user(&server, "bob").await;
        let created: Value = server
            .post(endpoints::TRANSACTIONS)
            .add_cookies(alice.cookies())
            .json(&json!({ "amount": 10, "is_income": true }))
            .await
            .json();
        let id = created["id"].as_str().unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookies(bob.cookies())
            .await;

        response.assert_status_not_found();
        let remaining: Value = server
            .get(endpoints::TRANSACTIONS)
            .add_cookies(alice.cookies())
            .await
            .json();
        assert_eq!(remaining.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_transaction_with_malformed_id_is_not_found() {
        let server = get_test_server();
        let log_in = log_in_new_user(&server, "alice").await;

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, "not-an-id"))
            .add_cookies(log_in.cookies())
            .await;

        response.assert_status_not_found();
        assert_error_body(&response);
    }
}
