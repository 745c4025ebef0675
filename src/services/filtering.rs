use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::{
    catalog::CatalogStore,
    error::AppResult,
    models::{AppId, Game},
};

/// Play-mode filters over a game's opaque attributes
///
/// Each flag passes a game when any of its store categories or community
/// tags appears in the matching relevance set. The core never sees these;
/// they exist for catalog browsing only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFilters {
    #[serde(default)]
    pub multiplayer: bool,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub coop: bool,
    #[serde(default)]
    pub local_multiplayer: bool,
    #[serde(default)]
    pub min_user_score: f64,
}

struct RelevanceSet {
    categories: HashSet<&'static str>,
    tags: HashSet<&'static str>,
}

impl RelevanceSet {
    fn matches(&self, categories: &[&str], tags: &[&str]) -> bool {
        categories.iter().any(|c| self.categories.contains(c))
            || tags.iter().any(|t| self.tags.contains(t))
    }
}

fn multiplayer_set() -> &'static RelevanceSet {
    static SET: OnceLock<RelevanceSet> = OnceLock::new();
    SET.get_or_init(|| RelevanceSet {
        categories: [
            "Local Co-op",
            "Multi-player",
            "MMO",
            "Local Multi-Player",
            "Shared/Split Screen",
            "Cross-Platform Multiplayer",
            "Online Multi-Player",
            "Online Co-op",
            "Co-op",
        ]
        .into_iter()
        .collect(),
        tags: [
            "Massively Multiplayer",
            "Co-op",
            "4 Player Local",
            "Online Co-Op",
            "Co-op Campaign",
            "PvP",
            "MMORPG",
            "MOBA",
            "Local Co-Op",
            "Asynchronous Multiplayer",
            "Multiplayer",
            "Local Multiplayer",
        ]
        .into_iter()
        .collect(),
    })
}

fn online_set() -> &'static RelevanceSet {
    static SET: OnceLock<RelevanceSet> = OnceLock::new();
    SET.get_or_init(|| RelevanceSet {
        categories: [
            "Cross-Platform Multiplayer",
            "Online Multi-Player",
            "Online Co-op",
        ]
        .into_iter()
        .collect(),
        tags: ["Massively Multiplayer", "Online Co-Op", "MMORPG", "MOBA"]
            .into_iter()
            .collect(),
    })
}

fn coop_set() -> &'static RelevanceSet {
    static SET: OnceLock<RelevanceSet> = OnceLock::new();
    SET.get_or_init(|| RelevanceSet {
        categories: ["Local Co-op", "Online Co-op", "Co-op"].into_iter().collect(),
        tags: ["Co-op", "Online Co-Op", "Co-op Campaign", "Local Co-Op"]
            .into_iter()
            .collect(),
    })
}

fn local_multiplayer_set() -> &'static RelevanceSet {
    static SET: OnceLock<RelevanceSet> = OnceLock::new();
    SET.get_or_init(|| RelevanceSet {
        categories: ["Local Co-op", "Local Multi-Player", "Shared/Split Screen"]
            .into_iter()
            .collect(),
        tags: ["4 Player Local", "Local Co-Op", "Local Multiplayer", "Split Screen"]
            .into_iter()
            .collect(),
    })
}

fn attribute_strings<'a>(game: &'a Game, key: &str) -> Vec<&'a str> {
    game.attributes
        .get(key)
        .and_then(|v| v.as_array())
        .map(|values| values.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default()
}

/// Whether one game passes every enabled filter
pub fn game_passes_filters(game: &Game, filters: &GameFilters) -> bool {
    let categories = attribute_strings(game, "categories");
    let tags: Vec<&str> = game.tags.keys().map(String::as_str).collect();

    let checks: [(bool, &RelevanceSet); 4] = [
        (filters.multiplayer, multiplayer_set()),
        (filters.online, online_set()),
        (filters.coop, coop_set()),
        (filters.local_multiplayer, local_multiplayer_set()),
    ];

    for (enabled, set) in checks {
        if enabled && !set.matches(&categories, &tags) {
            return false;
        }
    }

    let user_score = game
        .attributes
        .get("user_score")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    user_score >= filters.min_user_score
}

/// Fetches and filters game records with paging
///
/// Walks `app_ids` in order, keeps games passing `filters`, skips the first
/// `start_index` passing games, and stops after `max_count` results.
pub async fn filter_games(
    catalog: &dyn CatalogStore,
    app_ids: &[AppId],
    filters: &GameFilters,
    start_index: usize,
    max_count: usize,
) -> AppResult<Vec<Game>> {
    let mut passing = 0;
    let mut results = Vec::new();

    for &app_id in app_ids {
        if results.len() >= max_count {
            break;
        }

        let game = catalog.get_game(app_id).await?;
        if game_passes_filters(&game, filters) {
            if passing >= start_index {
                results.push(game);
            } else {
                passing += 1;
            }
        }
    }

    Ok(results)
}
