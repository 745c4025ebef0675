use std::collections::HashSet;

use crate::{
    catalog::{tag_blacklist, CatalogStore},
    error::{AppError, AppResult},
    models::{Game, Profile, TagStats, TagVector},
    services::providers::PlayerProvider,
    services::scoring::prepare_tags,
};

/// Minimum engagement before a game counts toward a profile
pub const MIN_ENGAGEMENT_MINUTES: u32 = 120;

/// Builds a taste profile from played games
///
/// Weighting scheme:
/// 1. Only games played at least [`MIN_ENGAGEMENT_MINUTES`] count.
/// 2. Each game's tags are blacklist-filtered and rescaled by the game's own
///    maximum vote count, so a single game adds at most 1.0 per tag.
/// 3. Per-tag contributions are summed across games, then multiplied by the
///    tag's squared IDF; discriminative tags count more than ubiquitous ones.
/// 4. Weights are normalized by the profile maximum and pruned to the
///    [`Profile::MAX_TAGS`] strongest tags.
///
/// A tag without an IDF entry is a catalog/statistics mismatch and fails the
/// build; silently defaulting would corrupt the normalization. No qualifying
/// games is not an error and yields an empty profile.
pub fn build_profile(
    played: &[(Game, u32)],
    stats: &TagStats,
    blacklist: &HashSet<&str>,
) -> AppResult<Profile> {
    let mut totals = TagVector::new();

    for (game, minutes) in played {
        if *minutes < MIN_ENGAGEMENT_MINUTES {
            continue;
        }

        for (tag, weight) in prepare_tags(&game.tags, blacklist) {
            *totals.entry(tag).or_insert(0.0) += weight;
        }
    }

    for (tag, total) in totals.iter_mut() {
        let idf = stats
            .tag_idf
            .get(tag)
            .copied()
            .ok_or_else(|| AppError::MissingTagStatistic(tag.clone()))?;
        *total *= idf * idf;
    }

    let max_weight = totals.values().copied().fold(0.0_f64, f64::max);
    if max_weight > 0.0 {
        for weight in totals.values_mut() {
            *weight /= max_weight;
        }
    }

    Ok(Profile {
        tags: prune_to_strongest(totals, Profile::MAX_TAGS),
    })
}

/// Keeps the `limit` highest-weighted tags, ties broken by tag name so
/// construction is deterministic
fn prune_to_strongest(tags: TagVector, limit: usize) -> TagVector {
    let mut entries: Vec<(String, f64)> = tags.into_iter().collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(limit);
    entries.into_iter().collect()
}

/// Builds a profile from an external account handle
///
/// Resolves the handle, fetches the account's played games, pulls the
/// matching catalog records (games missing from the catalog are skipped),
/// and runs [`build_profile`]. Returns the opaque account record alongside
/// the profile for passthrough to the presentation layer.
pub async fn build_profile_from_handle(
    catalog: &dyn CatalogStore,
    players: &dyn PlayerProvider,
    handle: &str,
) -> AppResult<(serde_json::Value, Profile)> {
    let library = players.resolve_and_fetch(handle).await?;

    let mut played = Vec::new();
    for owned in &library.games {
        if owned.playtime_minutes < MIN_ENGAGEMENT_MINUTES {
            continue;
        }
        if catalog.game_exists(owned.app_id).await? {
            let game = catalog.get_game(owned.app_id).await?;
            played.push((game, owned.playtime_minutes));
        }
    }

    let stats = catalog.tag_stats();
    let profile = build_profile(&played, &stats, tag_blacklist())?;

    tracing::info!(
        handle = %handle,
        qualifying_games = played.len(),
        profile_tags = profile.tags.len(),
        "Built taste profile"
    );

    Ok((library.account, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagVector;
    use serde_json::Value;
    use std::collections::HashMap;

    fn vector(entries: &[(&str, f64)]) -> TagVector {
        entries
            .iter()
            .map(|(tag, weight)| (tag.to_string(), *weight))
            .collect()
    }

    fn game(app_id: u32, tags: &[(&str, f64)]) -> Game {
        Game {
            app_id,
            tags: vector(tags),
            attributes: Value::Null,
        }
    }

    fn stats_with_idf(entries: &[(&str, f64)]) -> TagStats {
        TagStats {
            tag_frequency: HashMap::new(),
            tag_idf: entries
                .iter()
                .map(|(tag, idf)| (tag.to_string(), *idf))
                .collect(),
        }
    }

    #[test]
    fn test_short_playtime_games_are_ignored() {
        let played = vec![(game(1, &[("Puzzle", 100.0)]), 119)];
        let stats = stats_with_idf(&[("Puzzle", 1.0)]);

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        assert!(profile.tags.is_empty());
    }

    #[test]
    fn test_playtime_threshold_is_inclusive() {
        let played = vec![(game(1, &[("Puzzle", 100.0)]), 120)];
        let stats = stats_with_idf(&[("Puzzle", 1.0)]);

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        assert_eq!(profile.tags["Puzzle"], 1.0);
    }

    #[test]
    fn test_blacklisted_tags_never_enter_profile() {
        let blacklist: HashSet<&str> = ["Multiplayer"].into_iter().collect();
        let played = vec![(game(1, &[("Multiplayer", 900.0), ("Puzzle", 300.0)]), 500)];
        let stats = stats_with_idf(&[("Puzzle", 1.0), ("Multiplayer", 1.0)]);

        let profile = build_profile(&played, &stats, &blacklist).unwrap();
        assert!(!profile.tags.contains_key("Multiplayer"));
        // Puzzle is the max tag once Multiplayer is gone, so it rescales to 1.0
        assert_eq!(profile.tags["Puzzle"], 1.0);
    }

    #[test]
    fn test_per_game_rescale_caps_contribution_at_one() {
        // One game with lopsided votes: each tag's contribution is votes/max
        let played = vec![(game(1, &[("Action", 1000.0), ("Horror", 250.0)]), 300)];
        let stats = stats_with_idf(&[("Action", 1.0), ("Horror", 1.0)]);

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        assert_eq!(profile.tags["Action"], 1.0);
        assert_eq!(profile.tags["Horror"], 0.25);
    }

    #[test]
    fn test_idf_squared_weighting() {
        // Equal raw contributions; IDF separates them quadratically
        let played = vec![
            (game(1, &[("Common", 100.0)]), 300),
            (game(2, &[("Rare", 100.0)]), 300),
        ];
        let stats = stats_with_idf(&[("Common", 0.5), ("Rare", 1.0)]);

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        assert_eq!(profile.tags["Rare"], 1.0);
        // (1.0 * 0.5^2) / (1.0 * 1.0^2)
        assert_eq!(profile.tags["Common"], 0.25);
    }

    #[test]
    fn test_missing_idf_entry_is_fatal() {
        let played = vec![(game(1, &[("Obscure", 10.0)]), 300)];
        let stats = stats_with_idf(&[]);

        let err = build_profile(&played, &stats, &HashSet::new()).unwrap_err();
        assert!(matches!(err, AppError::MissingTagStatistic(tag) if tag == "Obscure"));
    }

    #[test]
    fn test_weights_bounded_and_pruned_to_thirty() {
        // 40 distinct tags across games, varying weights
        let mut played = Vec::new();
        for i in 0..40 {
            let tag = format!("tag-{:02}", i);
            played.push((game(i, &[(tag.as_str(), 100.0 + i as f64)]), 300));
        }
        let stats = TagStats {
            tag_frequency: HashMap::new(),
            tag_idf: (0..40).map(|i| (format!("tag-{:02}", i), 1.0)).collect(),
        };

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        assert!(profile.tags.len() <= Profile::MAX_TAGS);
        for weight in profile.tags.values() {
            assert!((0.0..=1.0).contains(weight));
        }
    }

    #[test]
    fn test_pruning_keeps_strongest_tags() {
        let played = vec![(
            game(1, &[("Strong", 1000.0), ("Weak", 1.0)]),
            300,
        )];
        let stats = stats_with_idf(&[("Strong", 1.0), ("Weak", 1.0)]);

        let pruned = prune_to_strongest(
            build_profile(&played, &stats, &HashSet::new()).unwrap().tags,
            1,
        );
        assert!(pruned.contains_key("Strong"));
        assert!(!pruned.contains_key("Weak"));
    }

    #[test]
    fn test_no_qualifying_games_yields_empty_profile() {
        let stats = stats_with_idf(&[]);
        let profile = build_profile(&[], &stats, &HashSet::new()).unwrap();
        assert!(profile.tags.is_empty());
    }

    #[test]
    fn test_accumulation_across_games() {
        // Puzzle appears in both games at full weight, Horror in one
        let played = vec![
            (game(1, &[("Puzzle", 500.0)]), 300),
            (game(2, &[("Puzzle", 80.0), ("Horror", 40.0)]), 300),
        ];
        let stats = stats_with_idf(&[("Puzzle", 1.0), ("Horror", 1.0)]);

        let profile = build_profile(&played, &stats, &HashSet::new()).unwrap();
        // Puzzle total 2.0, Horror total 0.5, normalized by 2.0
        assert_eq!(profile.tags["Puzzle"], 1.0);
        assert_eq!(profile.tags["Horror"], 0.25);
    }
}
