//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the server as the same JSON shape,
//! `{"statusCode": .., "message": ..}`, optionally with `error` and `errors`.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::{ErrorResponse, FieldError};
use crate::error::AppError;

/// Upper bound on a plain-text error body read back by [`global_error_handler`]
const MAX_ERROR_BODY: usize = 16 * 1024;

/// # Status Code Mapping
/// - UniqueViolation → 409 CONFLICT
/// - RecordNotFound → 404 NOT_FOUND
/// - ValidationErrors, BadRequest → 400 BAD_REQUEST
/// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::UniqueViolation { .. } => StatusCode::CONFLICT,
        AppError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        AppError::ValidationErrors { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, cause = ?self, "Request failed");
        }

        let mut body = ErrorResponse::new(status.as_u16(), self.public_message());

        match self {
            AppError::ValidationErrors { errors } => {
                let errors = errors
                    .into_iter()
                    .map(|e| FieldError {
                        field: e.field,
                        message: e.message,
                    })
                    .collect();
                body = body.with_error(reason_phrase(status)).with_errors(errors);
            }
            AppError::BadRequest { .. } => {
                body = body.with_error(reason_phrase(status));
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Error")
}

/// Rewrites error responses produced outside the handlers (unknown route,
/// wrong method, timeouts) into the JSON error shape.
///
/// Responses that already carry JSON pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = axum::body::to_bytes(body, MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if status == StatusCode::NOT_FOUND && text.is_empty() {
        format!("Cannot {} {}", method, path)
    } else if status.is_server_error() {
        "Internal server error".to_string()
    } else if text.is_empty() {
        reason_phrase(status).to_string()
    } else {
        text
    };

    let error_body = ErrorResponse::new(status.as_u16(), message).with_error(reason_phrase(status));

    let mut response = (status, Json(error_body)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }
    response
}

fn is_json(response: &Response<Body>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{UniqueTarget, ValidationFieldError};
    use axum::{Router, middleware, routing::get};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unique_violation_is_409() {
        let error = AppError::UniqueViolation {
            target: Some(UniqueTarget::Fields(vec!["email".to_string()])),
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({
                "statusCode": 409,
                "message": "Unique constraint failed on the fields: (`email`)"
            })
        );
    }

    #[tokio::test]
    async fn test_record_not_found_is_404_with_cause() {
        let response = AppError::record_not_found("Record to update not found.").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 404, "message": "Record to update not found."})
        );
    }

    #[tokio::test]
    async fn test_record_not_found_default_message() {
        let response = AppError::RecordNotFound { cause: None }.into_response();
        let body = body_json(response).await;
        assert_eq!(body["message"], "Record not found.");
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_details() {
        let error = AppError::Database {
            operation: "insert article".to_string(),
            source: anyhow::anyhow!("relation \"articles\" does not exist"),
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 500, "message": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".to_string(),
                message: "email must be an email".to_string(),
            }],
        };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "statusCode": 400,
                "message": "email must be an email",
                "error": "Bad Request",
                "errors": [{"field": "email", "message": "email must be an email"}]
            })
        );
    }

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/plain",
                get(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "nope") }),
            )
            .route(
                "/json",
                get(|| async { AppError::RecordNotFound { cause: None } }),
            )
            .layer(middleware::from_fn(global_error_handler))
    }

    #[tokio::test]
    async fn test_unknown_route_becomes_json_404() {
        let response = app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 404, "message": "Cannot GET /missing", "error": "Not Found"})
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_is_wrapped() {
        let response = app()
            .oneshot(Request::builder().uri("/plain").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["message"], "nope");
        assert_eq!(body["statusCode"], 422);
    }

    #[tokio::test]
    async fn test_timeout_becomes_json_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .layer(tower_http::timeout::TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                std::time::Duration::from_millis(10),
            ))
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 408, "message": "Request Timeout", "error": "Request Timeout"})
        );
    }

    #[tokio::test]
    async fn test_json_errors_and_successes_pass_through() {
        let response = app()
            .oneshot(Request::builder().uri("/json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["message"], "Record not found.");

        let response = app()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
