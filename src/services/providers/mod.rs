use serde::Deserialize;

/// Player data provider abstraction
///
/// The profile builder needs one upstream fact: which games an account owns
/// and how long each was played. The trait keeps that seam pluggable so
/// tests can inject canned libraries instead of calling the Steam Web API.
use crate::{error::AppResult, models::AppId};

pub mod steam;

pub use steam::SteamProvider;

/// One owned game with its total engagement
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OwnedGame {
    #[serde(rename = "appid")]
    pub app_id: AppId,
    /// Total minutes played across all time
    #[serde(rename = "playtime_forever")]
    pub playtime_minutes: u32,
}

/// An account's identity plus its played-games list
#[derive(Debug, Clone)]
pub struct PlayerLibrary {
    /// Opaque account record, passed through to the presentation layer untouched
    pub account: serde_json::Value,
    pub games: Vec<OwnedGame>,
}

/// Trait for player data providers
#[async_trait::async_trait]
pub trait PlayerProvider: Send + Sync {
    /// Resolve a handle (vanity name or numeric id) to an account and fetch
    /// its owned games with playtime.
    ///
    /// Fails with `Resolution` when the handle does not map to an account
    /// and with `Fetch` when engagement data cannot be retrieved.
    async fn resolve_and_fetch(&self, handle: &str) -> AppResult<PlayerLibrary>;
}
