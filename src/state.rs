//! Application state for Axum web framework.
//!
//! Contains the shared services accessible across all request handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared state handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap since the services share the pool through an Arc.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Wires repositories and services on top of `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        let repos = Repositories::new(pool);
        Self {
            services: Services::new(repos),
        }
    }
}
