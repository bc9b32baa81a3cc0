//! Article service for business logic operations.
//!
//! Every operation returns the article joined with its author.

use crate::error::{AppError, AppResult};
use crate::models::{ArticleWithAuthor, NewArticle, UpdateArticle};
use crate::repositories::ArticleRepository;

#[derive(Clone)]
pub struct ArticleService {
    repo: ArticleRepository,
}

impl ArticleService {
    pub fn new(repo: ArticleRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new_article: NewArticle) -> AppResult<ArticleWithAuthor> {
        self.repo.create(new_article).await
    }

    /// Published articles only.
    pub async fn find_all(&self) -> AppResult<Vec<ArticleWithAuthor>> {
        self.repo.list_by_published(true).await
    }

    /// Unpublished articles only.
    pub async fn find_drafts(&self) -> AppResult<Vec<ArticleWithAuthor>> {
        self.repo.list_by_published(false).await
    }

    pub async fn find_one(&self, id: i32) -> AppResult<ArticleWithAuthor> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::RecordNotFound { cause: None })
    }

    pub async fn update(&self, id: i32, changes: UpdateArticle) -> AppResult<ArticleWithAuthor> {
        self.repo.update(id, changes).await
    }

    pub async fn remove(&self, id: i32) -> AppResult<ArticleWithAuthor> {
        self.repo.delete(id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }
}
