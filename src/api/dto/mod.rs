//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - user request bodies and the `UserEntity` presenter
//! - `article` - article request bodies and the `ArticleEntity` presenter
//! - `error` - the common error body

mod article;
mod error;
mod user;

pub use article::{ArticleEntity, CreateArticleRequest, UpdateArticleRequest};
pub use error::{ErrorResponse, FieldError};
pub use user::{CreateUserRequest, UpdateUserRequest, UserEntity};

/// Millisecond precision, always UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub(crate) fn format_timestamp(timestamp: jiff_diesel::Timestamp) -> String {
    timestamp.to_jiff().strftime(TIMESTAMP_FORMAT).to_string()
}
