use std::sync::Arc;

/// Read-only catalog access
///
/// The recommendation core only ever reads from the catalog: game records,
/// existence checks, and the catalog-wide tag statistics. Implementations
/// decide the storage (the shipped one is a directory of JSON records).
use crate::{
    error::AppResult,
    models::{AppId, Game, TagStats},
};

pub mod blacklist;
pub mod fs;

pub use blacklist::tag_blacklist;
pub use fs::FileCatalog;

/// Trait for catalog stores
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All known app ids in stable enumeration order
    async fn list_app_ids(&self) -> AppResult<Vec<AppId>>;

    /// Fetch one game record, `NotFound` when no record exists
    async fn get_game(&self, app_id: AppId) -> AppResult<Game>;

    /// Whether a record exists for the id
    async fn game_exists(&self, app_id: AppId) -> AppResult<bool>;

    /// Catalog-wide tag statistics, loaded once per process start
    fn tag_stats(&self) -> Arc<TagStats>;
}
