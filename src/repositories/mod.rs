//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for users and articles.

mod article_repo;
mod user_repo;

pub use article_repo::ArticleRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub articles: ArticleRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            articles: ArticleRepository::new(pool),
        }
    }
}
