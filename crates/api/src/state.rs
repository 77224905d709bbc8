use std::sync::Arc;

use stashbook_core::engine::ProjectEngine;
use stashbook_db::repositories::{PgCatalog, PgProjectStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the engine and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the catalog handlers.
    pub pool: stashbook_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Catalog lookups, shared with the engine and used to expand gauge references.
    pub catalog: PgCatalog,
    /// Project aggregate engine over the Postgres store and catalog.
    pub engine: Arc<ProjectEngine>,
}

impl AppState {
    pub fn new(pool: stashbook_db::DbPool, config: ServerConfig) -> Self {
        let catalog = PgCatalog::new(pool.clone());
        let engine = ProjectEngine::new(
            Arc::new(PgProjectStore::new(pool.clone())),
            Arc::new(catalog.clone()),
        );
        Self {
            pool,
            config: Arc::new(config),
            catalog,
            engine: Arc::new(engine),
        }
    }
}
