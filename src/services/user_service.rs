//! User service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserRepository;

/// User service wrapping the `UserRepository`.
///
/// Returns full stored rows, password included; the API presenter decides
/// what leaves the process.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates a new user.
    ///
    /// A duplicate email surfaces as `AppError::UniqueViolation`.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        self.repo.create(new_user).await
    }

    /// All users by ascending id.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repo.list_all().await
    }

    /// Gets a user by id, or `RecordNotFound` without a cause.
    pub async fn find_one(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::RecordNotFound { cause: None })
    }

    pub async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        self.repo.update(id, changes).await
    }

    /// Deletes a user and returns the deleted row.
    pub async fn remove(&self, id: i32) -> AppResult<User> {
        self.repo.delete(id).await
    }

    pub async fn first(&self) -> AppResult<Option<User>> {
        self.repo.find_first().await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }
}
