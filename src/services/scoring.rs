use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Game, Profile, ScoredCandidate, TagVector};

/// Prepares a game's raw tag votes for weighting
///
/// Drops blacklisted tags, then rescales the remaining weights by the game's
/// own maximum so a single game contributes at most 1.0 per tag. Both the
/// profile builder and the scorer go through this one function, applied once
/// per game per request.
pub fn prepare_tags(tags: &TagVector, blacklist: &HashSet<&str>) -> TagVector {
    let mut prepared: TagVector = tags
        .iter()
        .filter(|(tag, _)| !blacklist.contains(tag.as_str()))
        .map(|(tag, weight)| (tag.clone(), *weight))
        .collect();

    let max_weight = prepared.values().copied().fold(0.0_f64, f64::max);
    if max_weight > 0.0 {
        for weight in prepared.values_mut() {
            *weight /= max_weight;
        }
    }

    prepared
}

/// Similarity rating of one prepared game against one profile
///
/// Dot product of the two tag vectors, dampened by the cube root of the
/// game's tag count. The dampening counters the mechanical advantage of
/// games with many tags without normalizing it away entirely.
pub fn score(profile: &Profile, prepared_tags: &TagVector) -> f64 {
    let dot: f64 = prepared_tags
        .iter()
        .map(|(tag, weight)| weight * profile.weight(tag))
        .sum();
    dot / (prepared_tags.len() as f64).cbrt()
}

/// Scores the whole catalog against every profile
///
/// `games` must be in catalog enumeration order; rating ties keep that
/// order. Games with no tags left after blacklist filtering never become
/// candidates. Returns one ranked list per profile, each strictly
/// descending by rating.
pub fn rank_catalog(
    profiles: &[Profile],
    games: &[Game],
    blacklist: &HashSet<&str>,
) -> Vec<Vec<ScoredCandidate>> {
    let mut ranked: Vec<Vec<ScoredCandidate>> = vec![Vec::new(); profiles.len()];

    for game in games {
        let prepared = prepare_tags(&game.tags, blacklist);
        if prepared.is_empty() {
            continue;
        }

        for (i, profile) in profiles.iter().enumerate() {
            ranked[i].push(ScoredCandidate {
                app_id: game.app_id,
                tags: prepared.clone(),
                rating: score(profile, &prepared),
                cluster_id: None,
            });
        }
    }

    for list in &mut ranked {
        // Stable sort: equal ratings stay in enumeration order
        list.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagVector;
    use serde_json::Value;

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

    fn profile(tags: &[(&str, f64)]) -> Profile {
        Profile {
            tags: vector(tags),
        }
    }

    #[test]
    fn test_prepare_drops_blacklisted_tags() {
        let blacklist: HashSet<&str> = ["Multiplayer"].into_iter().collect();
        let prepared = prepare_tags(&vector(&[("Multiplayer", 500.0), ("Puzzle", 100.0)]), &blacklist);
        assert_eq!(prepared, vector(&[("Puzzle", 1.0)]));
    }

    #[test]
    fn test_prepare_normalizes_by_own_max() {
        let prepared = prepare_tags(
            &vector(&[("Puzzle", 400.0), ("Indie", 100.0)]),
            &HashSet::new(),
        );
        assert_eq!(prepared["Puzzle"], 1.0);
        assert_eq!(prepared["Indie"], 0.25);
    }

    #[test]
    fn test_prepare_all_blacklisted_yields_empty() {
        let blacklist: HashSet<&str> = ["Multiplayer"].into_iter().collect();
        let prepared = prepare_tags(&vector(&[("Multiplayer", 500.0)]), &blacklist);
        assert!(prepared.is_empty());
    }

    #[test]
    fn test_score_empty_profile_is_zero() {
        let prepared = vector(&[("Puzzle", 1.0)]);
        assert_eq!(score(&profile(&[]), &prepared), 0.0);
    }

    #[test]
    fn test_score_cube_root_dampening() {
        let p = profile(&[("x", 1.0)]);

        // One tag: dot = 1, denominator = 1
        assert_eq!(score(&p, &vector(&[("x", 1.0)])), 1.0);

        // Two tags, one matching: dot = 1, denominator = 2^(1/3)
        let two = score(&p, &vector(&[("x", 1.0), ("y", 1.0)]));
        assert!((two - 2.0_f64.powf(-1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rank_catalog_fixed_example() {
        // Catalog { A: {x}, B: {x, y}, C: {y} } against profile { x: 1 }
        let games = vec![
            game(1, &[("x", 1.0)]),
            game(2, &[("x", 1.0), ("y", 1.0)]),
            game(3, &[("y", 1.0)]),
        ];
        let ranked = rank_catalog(&[profile(&[("x", 1.0)])], &games, &HashSet::new());

        assert_eq!(ranked.len(), 1);
        let list = &ranked[0];
        assert_eq!(list.len(), 3);

        assert_eq!(list[0].app_id, 1);
        assert_eq!(list[0].rating, 1.0);

        assert_eq!(list[1].app_id, 2);
        assert!((list[1].rating - 2.0_f64.powf(-1.0 / 3.0)).abs() < 1e-12);

        assert_eq!(list[2].app_id, 3);
        assert_eq!(list[2].rating, 0.0);

        // A and B both rate strictly above C
        assert!(list[0].rating > list[2].rating);
        assert!(list[1].rating > list[2].rating);
    }

    #[test]
    fn test_rank_catalog_excludes_tagless_games() {
        let blacklist: HashSet<&str> = ["Multiplayer"].into_iter().collect();
        let games = vec![game(1, &[("Multiplayer", 10.0)]), game(2, &[("Puzzle", 10.0)])];
        let ranked = rank_catalog(&[profile(&[("Puzzle", 1.0)])], &games, &blacklist);

        assert_eq!(ranked[0].len(), 1);
        assert_eq!(ranked[0][0].app_id, 2);
    }

    #[test]
    fn test_rank_catalog_ties_keep_enumeration_order() {
        // Both games score 0 against an empty profile
        let games = vec![game(7, &[("a", 1.0)]), game(3, &[("b", 1.0)])];
        let ranked = rank_catalog(&[profile(&[])], &games, &HashSet::new());

        let ids: Vec<u32> = ranked[0].iter().map(|c| c.app_id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_rank_catalog_one_list_per_profile() {
        let games = vec![game(1, &[("x", 1.0)])];
        let profiles = vec![profile(&[("x", 1.0)]), profile(&[("y", 1.0)])];
        let ranked = rank_catalog(&profiles, &games, &HashSet::new());

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0][0].rating, 1.0);
        assert_eq!(ranked[1][0].rating, 0.0);
    }
}
