/// Steam Web API provider
///
/// Resolution flow mirrors how handles behave in practice:
/// 1. Try ResolveVanityURL; a hit yields the numeric steamid.
/// 2. On a miss, treat the handle as a numeric steamid directly.
/// 3. GetOwnedGames (played free games included) supplies engagement data.
/// 4. GetPlayerSummaries supplies the opaque account record.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::providers::{OwnedGame, PlayerLibrary, PlayerProvider},
};

#[derive(Clone)]
pub struct SteamProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct VanityResponse {
    #[serde(default)]
    response: VanityBody,
}

#[derive(Debug, Deserialize, Default)]
struct VanityBody {
    #[serde(default)]
    steamid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedGamesBody,
}

#[derive(Debug, Deserialize, Default)]
struct OwnedGamesBody {
    #[serde(default)]
    games: Option<Vec<OwnedGame>>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummariesResponse {
    #[serde(default)]
    response: PlayerSummariesBody,
}

#[derive(Debug, Deserialize, Default)]
struct PlayerSummariesBody {
    #[serde(default)]
    players: Vec<serde_json::Value>,
}

impl SteamProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Resolves a vanity URL fragment into a numeric steamid
    ///
    /// Returns `None` when Steam reports no match, which just means the
    /// handle was not a vanity name.
    async fn resolve_vanity_url(&self, handle: &str) -> AppResult<Option<String>> {
        let url = format!("{}/ISteamUser/ResolveVanityURL/v0001", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("vanityurl", handle)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Resolution(format!(
                "Steam vanity resolution returned status {}",
                response.status()
            )));
        }

        let body: VanityResponse = response.json().await?;
        Ok(body.response.steamid)
    }

    async fn fetch_owned_games(&self, steam_id: &str) -> AppResult<Vec<OwnedGame>> {
        let url = format!("{}/IPlayerService/GetOwnedGames/v0001/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("format", "json"),
                ("include_played_free_games", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Steam owned-games request returned status {}",
                response.status()
            )));
        }

        let body: OwnedGamesResponse = response.json().await?;

        // Unknown or private accounts come back with an empty response body
        body.response.games.ok_or_else(|| {
            AppError::Resolution(format!("Couldn't resolve account '{}'", steam_id))
        })
    }

    async fn fetch_player_summary(&self, steam_id: &str) -> AppResult<serde_json::Value> {
        let url = format!("{}/ISteamUser/GetPlayerSummaries/v2/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("steamids", steam_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Steam player-summary request returned status {}",
                response.status()
            )));
        }

        let body: PlayerSummariesResponse = response.json().await?;

        body.response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Fetch(format!("No player summary for '{}'", steam_id)))
    }
}

#[async_trait::async_trait]
impl PlayerProvider for SteamProvider {
    async fn resolve_and_fetch(&self, handle: &str) -> AppResult<PlayerLibrary> {
        // A vanity miss is not an error; fall back to treating the handle
        // as a numeric steamid.
        let steam_id = match self.resolve_vanity_url(handle).await {
            Ok(Some(steam_id)) => steam_id,
            Ok(None) => handle.to_string(),
            Err(e) => {
                tracing::debug!(error = %e, handle = %handle, "Vanity resolution failed, trying raw id");
                handle.to_string()
            }
        };

        let games = self.fetch_owned_games(&steam_id).await?;
        let account = self.fetch_player_summary(&steam_id).await?;

        tracing::info!(
            steam_id = %steam_id,
            owned_games = games.len(),
            "Fetched player library"
        );

        Ok(PlayerLibrary { account, games })
    }
}
