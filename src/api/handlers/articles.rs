//! Article request handlers.
//!
//! Every response nests the article's author (or `null`).

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ARTICLES_TAG;
use crate::api::dto::{ArticleEntity, CreateArticleRequest, ErrorResponse, UpdateArticleRequest};
use crate::error::AppResult;
use crate::models::ArticleWithAuthor;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedPath};

/// Creates article-related routes.
///
/// Routes:
/// - POST /articles          - Create article
/// - GET /articles           - List published articles
/// - GET /articles/drafts    - List unpublished articles
/// - GET /articles/{id}      - Get article by ID
/// - PATCH /articles/{id}    - Update article
/// - DELETE /articles/{id}   - Delete article
pub fn article_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_article, list_published))
        .routes(routes!(list_drafts))
        .routes(routes!(get_article, update_article, delete_article))
}

fn present(rows: Vec<ArticleWithAuthor>) -> Vec<ArticleEntity> {
    rows.into_iter().map(ArticleEntity::from).collect()
}

/// POST /articles - Create article
#[utoipa::path(
    post,
    path = "/articles",
    tag = ARTICLES_TAG,
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleEntity),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 409, description = "Title already used", body = ErrorResponse)
    )
)]
async fn create_article(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> AppResult<(StatusCode, Json<ArticleEntity>)> {
    let created = state
        .services
        .articles
        .create(payload.into_new_article())
        .await?;
    Ok((StatusCode::CREATED, Json(ArticleEntity::from(created))))
}

/// GET /articles - List published articles
#[utoipa::path(
    get,
    path = "/articles",
    tag = ARTICLES_TAG,
    responses(
        (status = 200, description = "Published articles", body = Vec<ArticleEntity>)
    )
)]
async fn list_published(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleEntity>>> {
    let rows = state.services.articles.find_all().await?;
    Ok(Json(present(rows)))
}

/// GET /articles/drafts - List unpublished articles
#[utoipa::path(
    get,
    path = "/articles/drafts",
    tag = ARTICLES_TAG,
    responses(
        (status = 200, description = "Draft articles", body = Vec<ArticleEntity>)
    )
)]
async fn list_drafts(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleEntity>>> {
    let rows = state.services.articles.find_drafts().await?;
    Ok(Json(present(rows)))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = ARTICLES_TAG,
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article", body = ArticleEntity),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
async fn get_article(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<ArticleEntity>> {
    let row = state.services.articles.find_one(id).await?;
    Ok(Json(ArticleEntity::from(row)))
}

/// PATCH /articles/{id} - Update article
#[utoipa::path(
    patch,
    path = "/articles/{id}",
    tag = ARTICLES_TAG,
    params(("id" = i32, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleEntity),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse),
        (status = 409, description = "Title already used", body = ErrorResponse)
    )
)]
async fn update_article(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateArticleRequest>,
) -> AppResult<Json<ArticleEntity>> {
    let row = state
        .services
        .articles
        .update(id, payload.into_update_article())
        .await?;
    Ok(Json(ArticleEntity::from(row)))
}

/// DELETE /articles/{id} - Delete article
#[utoipa::path(
    delete,
    path = "/articles/{id}",
    tag = ARTICLES_TAG,
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Deleted article", body = ArticleEntity),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
async fn delete_article(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<ArticleEntity>> {
    let row = state.services.articles.remove(id).await?;
    Ok(Json(ArticleEntity::from(row)))
}
