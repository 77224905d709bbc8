//! Repositories over the Postgres tables.
//!
//! Each repo is a zero-sized struct with associated async functions taking a
//! `&PgPool`. [`PgProjectStore`] and [`PgCatalog`] wrap a pool to serve the
//! core engine's store and catalog traits.

mod catalog;
pub mod conversion_repo;
pub mod gauge_repo;
pub mod hook_repo;
pub mod needle_repo;
pub mod project_repo;
pub mod yarn_repo;

pub use catalog::PgCatalog;
pub use conversion_repo::ConversionRepo;
pub use gauge_repo::GaugeRepo;
pub use hook_repo::HookRepo;
pub use needle_repo::NeedleRepo;
pub use project_repo::{PgProjectStore, ProjectRepo};
pub use yarn_repo::YarnRepo;

use stashbook_core::error::CoreError;

/// Surface a driver failure through the core error type.
pub(crate) fn internal(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}
