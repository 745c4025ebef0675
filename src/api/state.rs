use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::services::providers::PlayerProvider;

/// Shared application state
///
/// Both collaborators sit behind trait objects so integration tests can
/// swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub players: Arc<dyn PlayerProvider>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, players: Arc<dyn PlayerProvider>) -> Self {
        Self { catalog, players }
    }
}
