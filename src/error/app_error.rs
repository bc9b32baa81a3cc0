use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection};
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::error::{ConstraintParser, DatabaseErrorConverter};

/// Application-wide error type.
///
/// Storage failures are classified into [`AppError::UniqueViolation`],
/// [`AppError::RecordNotFound`] or [`AppError::Database`] before they reach
/// the HTTP boundary, where each variant maps to exactly one status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// A unique constraint rejected a write
    #[error("{}", unique_violation_message(.target.as_ref()))]
    UniqueViolation { target: Option<UniqueTarget> },

    /// The addressed record does not exist
    #[error("{}", .cause.as_deref().unwrap_or(RECORD_NOT_FOUND))]
    RecordNotFound { cause: Option<String> },

    /// Request body failed field validation
    #[error("Validation failed: {}", summarize(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Request could not be decoded
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

pub(crate) const RECORD_NOT_FOUND: &str = "Record not found.";

/// Fields (or the constraint) named by a unique violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueTarget {
    /// Model field names, e.g. `["email"]`
    Fields(Vec<String>),
    /// Constraint name when no field list could be recovered
    Constraint(String),
}

impl fmt::Display for UniqueTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => {
                let quoted: Vec<String> = fields.iter().map(|field| format!("`{}`", field)).collect();
                f.write_str(&quoted.join(", "))
            }
            Self::Constraint(name) => f.write_str(name),
        }
    }
}

/// `Unique constraint failed on the fields: (...)`, or the bare sentence
/// when the target is missing or renders empty.
pub fn unique_violation_message(target: Option<&UniqueTarget>) -> String {
    match target.map(ToString::to_string) {
        Some(formatted) if !formatted.is_empty() => {
            format!("Unique constraint failed on the fields: ({})", formatted)
        }
        _ => "Unique constraint failed.".to_string(),
    }
}

/// One failing field of a validated request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

fn summarize(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn record_not_found(cause: impl Into<String>) -> Self {
        Self::RecordNotFound {
            cause: Some(cause.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Client-facing message; server-side failures never expose their source.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database { .. } | Self::Configuration { .. } | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
            Self::BadRequest { message } => message.clone(),
            Self::ValidationErrors { errors } => summarize(errors),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::Database {
            operation: "acquire connection".to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = ConstraintParser::to_camel_case(&field);
                field_errors.iter().map(move |error| ValidationFieldError {
                    field: field.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationErrors { errors: fields }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
