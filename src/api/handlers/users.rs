//! User CRUD request handlers.
//!
//! Provides HTTP handlers for user management operations.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USERS_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, UpdateUserRequest, UserEntity};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedPath};

/// Creates user-related routes.
///
/// Routes:
/// - POST /users          - Create a user
/// - GET /users           - List all users
/// - GET /users/{id}      - Get user by ID
/// - PATCH /users/{id}    - Update user by ID
/// - DELETE /users/{id}   - Delete user by ID
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user, list_users))
        .routes(routes!(get_user, update_user, delete_user))
}

/// POST /users - Create new user
///
/// Returns 201 Created with the stored user, password omitted.
#[utoipa::path(
    post,
    path = "/users",
    tag = USERS_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEntity),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserEntity>)> {
    let user = state.services.users.create(payload.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(UserEntity::new(user))))
}

/// GET /users - List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users ordered by id", body = Vec<UserEntity>)
    )
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserEntity>>> {
    let users = state.services.users.find_all().await?;
    Ok(Json(users.into_iter().map(UserEntity::new).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserEntity),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<UserEntity>> {
    let user = state.services.users.find_one(id).await?;
    Ok(Json(UserEntity::new(user)))
}

/// PATCH /users/{id} - Update user
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEntity),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserEntity>> {
    let user = state
        .services
        .users
        .update(id, payload.into_update_user())
        .await?;
    Ok(Json(UserEntity::new(user)))
}

/// DELETE /users/{id} - Delete user
///
/// Responds with the deleted record.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user", body = UserEntity),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<UserEntity>> {
    let user = state.services.users.remove(id).await?;
    Ok(Json(UserEntity::new(user)))
}
