use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{AppId, Game, TagStats},
};

use super::CatalogStore;

/// File-backed catalog store
///
/// Expects the layout the scraper produces:
///
/// ```text
/// <dir>/games/<app_id>.json   one record per game
/// <dir>/tagData.json          { "tagFrequency": {...}, "tagIDF": {...} }
/// ```
///
/// Tag statistics are read once at construction and shared as an `Arc`;
/// game records are read per request.
pub struct FileCatalog {
    games_dir: PathBuf,
    tag_stats: Arc<TagStats>,
}

impl FileCatalog {
    /// Opens a catalog directory and loads its tag statistics
    pub async fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();
        let raw = tokio::fs::read(dir.join("tagData.json")).await?;
        let tag_stats: TagStats = serde_json::from_slice(&raw)?;

        tracing::info!(
            tag_count = tag_stats.tag_frequency.len(),
            dir = %dir.display(),
            "Loaded catalog tag statistics"
        );

        Ok(Self {
            games_dir: dir.join("games"),
            tag_stats: Arc::new(tag_stats),
        })
    }

    fn game_path(&self, app_id: AppId) -> PathBuf {
        self.games_dir.join(format!("{}.json", app_id))
    }
}

#[async_trait::async_trait]
impl CatalogStore for FileCatalog {
    async fn list_app_ids(&self) -> AppResult<Vec<AppId>> {
        let mut entries = tokio::fs::read_dir(&self.games_dir).await?;
        let mut app_ids = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(app_id) = stem.parse::<AppId>() {
                    app_ids.push(app_id);
                }
            }
        }

        // Directory iteration order is platform-dependent; sort for a stable
        // enumeration order, which downstream tie-breaking relies on.
        app_ids.sort_unstable();
        Ok(app_ids)
    }

    async fn get_game(&self, app_id: AppId) -> AppResult<Game> {
        let raw = match tokio::fs::read(self.game_path(app_id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "No catalog record for app {}",
                    app_id
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let game: Game = serde_json::from_slice(&raw)?;
        Ok(game)
    }

    async fn game_exists(&self, app_id: AppId) -> AppResult<bool> {
        Ok(tokio::fs::try_exists(self.game_path(app_id)).await?)
    }

    fn tag_stats(&self) -> Arc<TagStats> {
        self.tag_stats.clone()
    }
}
