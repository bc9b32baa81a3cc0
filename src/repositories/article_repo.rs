//! Article repository for async database operations.
//!
//! Every read returns the article together with its author (left join), so
//! callers never issue a second query per row.

use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{Article, ArticleWithAuthor, NewArticle, UpdateArticle, User};
use crate::repositories::user_repo::{DELETE_NOT_FOUND, UPDATE_NOT_FOUND};
use crate::schema::{articles, users};

#[derive(Clone)]
pub struct ArticleRepository {
    pool: AsyncDbPool,
}

impl ArticleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_article: NewArticle) -> Result<ArticleWithAuthor, AppError> {
        let mut conn = self.pool.get().await?;

        let article = diesel::insert_into(articles::table)
            .values(&new_article)
            .returning(Article::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert article"))?;

        attach_author(&mut conn, article).await
    }

    /// Articles whose `published` flag equals `is_published`, in storage order.
    pub async fn list_by_published(
        &self,
        is_published: bool,
    ) -> Result<Vec<ArticleWithAuthor>, AppError> {
        let mut conn = self.pool.get().await?;

        articles::table
            .left_join(users::table)
            .filter(articles::published.eq(is_published))
            .select((Article::as_select(), Option::<User>::as_select()))
            .load::<ArticleWithAuthor>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, article_id: i32) -> Result<Option<ArticleWithAuthor>, AppError> {
        let mut conn = self.pool.get().await?;

        articles::table
            .left_join(users::table)
            .filter(articles::id.eq(article_id))
            .select((Article::as_select(), Option::<User>::as_select()))
            .first::<ArticleWithAuthor>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.pool.get().await?;

        articles::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies the given fields and refreshes `updated_at`.
    pub async fn update(
        &self,
        article_id: i32,
        changes: UpdateArticle,
    ) -> Result<ArticleWithAuthor, AppError> {
        let mut conn = self.pool.get().await?;

        let article = diesel::update(articles::table.find(article_id))
            .set((&changes, articles::updated_at.eq(now)))
            .returning(Article::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_with_cause(e, "update article", UPDATE_NOT_FOUND)
            })?;

        attach_author(&mut conn, article).await
    }

    /// Deletes an article and returns it with the author it had.
    pub async fn delete(&self, article_id: i32) -> Result<ArticleWithAuthor, AppError> {
        let mut conn = self.pool.get().await?;

        let article = diesel::delete(articles::table.find(article_id))
            .returning(Article::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_with_cause(e, "delete article", DELETE_NOT_FOUND)
            })?;

        attach_author(&mut conn, article).await
    }
}

async fn attach_author(
    conn: &mut AsyncPgConnection,
    article: Article,
) -> Result<ArticleWithAuthor, AppError> {
    let author = match article.author_id {
        Some(author_id) => users::table
            .find(author_id)
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)?,
        None => None,
    };

    Ok((article, author))
}
