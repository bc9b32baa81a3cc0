use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Classifies Diesel errors into the storage outcomes the API distinguishes:
/// unique violations, missing records and everything else.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an `AppError`.
    ///
    /// `operation` describes the failing call and only ends up in logs.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::convert_unique_violation(info.as_ref())
            }
            DieselError::NotFound => AppError::RecordNotFound { cause: None },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Like [`Self::convert_diesel_error`], but a missing row carries `cause`.
    pub fn convert_with_cause(error: DieselError, operation: &str, cause: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::record_not_found(cause),
            other => Self::convert_diesel_error(other, operation),
        }
    }

    fn convert_unique_violation(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> AppError {
        let target = ConstraintParser::parse_unique_violation(
            info.details(),
            info.message(),
            info.constraint_name(),
        );
        AppError::UniqueViolation { target }
    }
}
