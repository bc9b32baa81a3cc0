//! User request bodies and the `UserEntity` presenter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::format_timestamp;
use crate::models::{NewUser, UpdateUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Unknown properties are dropped during deserialization.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, message = "email should not be empty"),
        email(message = "email must be an email")
    )]
    #[schema(format = "email", example = "alex@ruheni.com")]
    pub email: String,

    #[schema(example = "Alex Ruheni")]
    pub name: Option<String>,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    #[schema(format = "password", min_length = 6)]
    pub password: String,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            name: self.name,
            password: self.password,
        }
    }
}

/// Request body for a partial user update; absent fields stay unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate, Default)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 1, message = "email should not be empty"),
        email(message = "email must be an email")
    )]
    #[schema(format = "email")]
    pub email: Option<String>,

    pub name: Option<String>,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    #[schema(format = "password", min_length = 6)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            email: self.email,
            name: self.name,
            password: self.password,
        }
    }
}

// ============================================================================
// Presenter
// ============================================================================

/// Public view of a user.
///
/// The password is carried so the presenter mirrors the stored row, but it
/// is never serialized and never appears in the OpenAPI schema.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
    #[schema(format = DateTime, example = "2026-01-01T12:00:00.000Z")]
    pub created_at: String,
    #[schema(format = DateTime, example = "2026-01-01T12:00:00.000Z")]
    pub updated_at: String,
}

impl UserEntity {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            password: user.password,
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

impl From<User> for UserEntity {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}
