//! Article request bodies and the `ArticleEntity` presenter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::format_timestamp;
use crate::api::dto::user::UserEntity;
use crate::models::{Article, NewArticle, UpdateArticle, User};

/// Request body for creating an article.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,

    #[validate(length(max = 300, message = "description must be shorter than or equal to 300 characters"))]
    #[schema(max_length = 300)]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "body should not be empty"))]
    pub body: String,

    /// Defaults to `false` (draft)
    #[serde(default)]
    #[schema(default = false)]
    pub published: bool,

    #[validate(range(min = 1, message = "authorId must be a positive number"))]
    #[schema(minimum = 1)]
    pub author_id: Option<i32>,
}

impl CreateArticleRequest {
    pub fn into_new_article(self) -> NewArticle {
        NewArticle {
            title: self.title,
            description: self.description,
            body: self.body,
            published: self.published,
            author_id: self.author_id,
        }
    }
}

/// Request body for a partial article update.
#[derive(Debug, Deserialize, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,

    #[validate(length(max = 300, message = "description must be shorter than or equal to 300 characters"))]
    #[schema(max_length = 300)]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "body should not be empty"))]
    pub body: Option<String>,

    pub published: Option<bool>,

    #[validate(range(min = 1, message = "authorId must be a positive number"))]
    #[schema(minimum = 1)]
    pub author_id: Option<i32>,
}

impl UpdateArticleRequest {
    pub fn into_update_article(self) -> UpdateArticle {
        UpdateArticle {
            title: self.title,
            description: self.description,
            body: self.body,
            published: self.published,
            author_id: self.author_id,
        }
    }
}

/// Public view of an article with its author nested.
///
/// `author` is always present in the JSON and is `null` when the article
/// has no author.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEntity {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub published: bool,
    pub author_id: Option<i32>,
    pub author: Option<UserEntity>,
    #[schema(format = DateTime, example = "2026-01-01T12:00:00.000Z")]
    pub created_at: String,
    #[schema(format = DateTime, example = "2026-01-01T12:00:00.000Z")]
    pub updated_at: String,
}

impl ArticleEntity {
    pub fn new(article: Article, author: Option<User>) -> Self {
        Self {
            id: article.id,
            title: article.title,
            description: article.description,
            body: article.body,
            published: article.published,
            author_id: article.author_id,
            author: author.map(UserEntity::new),
            created_at: format_timestamp(article.created_at),
            updated_at: format_timestamp(article.updated_at),
        }
    }
}

impl From<(Article, Option<User>)> for ArticleEntity {
    fn from((article, author): (Article, Option<User>)) -> Self {
        Self::new(article, author)
    }
}
