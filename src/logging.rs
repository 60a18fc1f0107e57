//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// The `password` field of JSON request bodies is never logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let is_json = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        log_request(&parts, &redact_password(&body_text));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_text));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body(body).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &body_text);

    Response::from_parts(parts, Body::from(body_text))
}

async fn read_body(body: Body) -> Result<String, axum::Error> {
    let body_bytes = to_bytes(body, usize::MAX).await?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

/// Replace the value of the top-level "password" field of a JSON object.
///
/// Text that is not a JSON object is returned unchanged.
fn redact_password(json_text: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(json_text) else {
        return json_text.to_string();
    };

    match value.get_mut("password") {
        Some(password) => {
            *password = Value::String(REDACTED.to_owned());
            value.to_string()
        }
        None => json_text.to_string(),
    }
}

/// The longest prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::{Json, Router, middleware, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, redact_password, truncate};

    #[test]
    fn redacts_password_field() {
        let redacted = redact_password(r#"{"username":"alice","password":"hunter2"}"#);

        let value: Value = serde_json::from_str(&redacted).unwrap();
        assert_eq!(value["username"], "alice");
        assert_eq!(value["password"], "********");
        assert!(!redacted.contains("hunter2"));
    }

    #[test]
    fn leaves_other_bodies_unchanged() {
        assert_eq!(redact_password(r#"{"amount":"12"}"#), r#"{"amount":"12"}"#);
        assert_eq!(redact_password("password=hunter2"), "password=hunter2");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate(&text);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(text.starts_with(truncated));
    }

    #[tokio::test]
    async fn middleware_passes_bodies_through() {
        async fn echo(Json(body): Json<Value>) -> Json<Value> {
            Json(body)
        }

        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).unwrap();
        let body = json!({ "password": "hunter2", "note": "x".repeat(100) });

        let response = server.post("/echo").json(&body).await;

        response.assert_status_ok();
        response.assert_json(&body);
    }
}
