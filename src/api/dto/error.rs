//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response.
///
/// `error` carries the reason phrase for errors raised while decoding the
/// request; `errors` lists each failing field of a validated body.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "Record not found.")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Bad Request")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// One failing request field
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "email must be an email")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            error: None,
            errors: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}
