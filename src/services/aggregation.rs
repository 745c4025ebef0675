use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{AppId, ScoredCandidate};

/// How per-profile rankings are combined into one group ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AggregationMethod {
    /// Rank-based points: the item at rank i earns (max list length - i)
    /// from each profile that ranked it
    #[serde(rename = "BC")]
    BordaCount,
    /// Consensus-based: an item's group rating is the minimum rating any
    /// profile gave it, and 0 unless every profile ranked it
    #[serde(rename = "LM")]
    LeastMisery,
}

/// Combines per-profile ranked lists with the chosen strategy
pub fn aggregate(
    method: AggregationMethod,
    per_profile: &[Vec<ScoredCandidate>],
) -> Vec<ScoredCandidate> {
    match method {
        AggregationMethod::BordaCount => borda_count(per_profile),
        AggregationMethod::LeastMisery => least_misery(per_profile),
    }
}

/// Intermediate merge entry, keyed by app id in encounter order
struct Merged {
    candidate: ScoredCandidate,
    min_rating: f64,
    ranked_by: usize,
}

/// Folds all lists into one entry per item, preserving encounter order
///
/// `tags` comes from the first profile's list that contains the item; since
/// items are prepared once per request the vectors are identical anyway.
fn merge_lists(per_profile: &[Vec<ScoredCandidate>]) -> Vec<Merged> {
    let mut order: Vec<Merged> = Vec::new();
    let mut index: HashMap<AppId, usize> = HashMap::new();

    for list in per_profile {
        for candidate in list {
            match index.get(&candidate.app_id) {
                Some(&i) => {
                    let entry = &mut order[i];
                    entry.min_rating = entry.min_rating.min(candidate.rating);
                    entry.ranked_by += 1;
                }
                None => {
                    index.insert(candidate.app_id, order.len());
                    order.push(Merged {
                        candidate: ScoredCandidate {
                            rating: 0.0,
                            ..candidate.clone()
                        },
                        min_rating: candidate.rating,
                        ranked_by: 1,
                    });
                }
            }
        }
    }

    order
}

fn sort_descending(mut combined: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    // Stable sort: rating ties keep encounter order
    combined.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    combined
}

/// Borda Count aggregation
///
/// With n = the longest list's length, rank i (0-based) contributes n - i
/// points; points for the same item sum across lists. An item a profile
/// never ranked simply earns nothing from that profile.
pub fn borda_count(per_profile: &[Vec<ScoredCandidate>]) -> Vec<ScoredCandidate> {
    let n = per_profile.iter().map(Vec::len).max().unwrap_or(0);

    let mut points: HashMap<AppId, f64> = HashMap::new();
    for list in per_profile {
        for (rank, candidate) in list.iter().enumerate() {
            *points.entry(candidate.app_id).or_insert(0.0) += (n - rank) as f64;
        }
    }

    let combined = merge_lists(per_profile)
        .into_iter()
        .map(|mut entry| {
            entry.candidate.rating = points[&entry.candidate.app_id];
            entry.candidate
        })
        .collect();

    sort_descending(combined)
}

/// Least Misery aggregation
///
/// An item's group rating is the minimum rating across the profiles that
/// ranked it, forced to 0 when any profile's list omitted it: the group
/// rejects items that aren't universally relevant.
pub fn least_misery(per_profile: &[Vec<ScoredCandidate>]) -> Vec<ScoredCandidate> {
    let profile_count = per_profile.len();

    let combined = merge_lists(per_profile)
        .into_iter()
        .map(|mut entry| {
            entry.candidate.rating = if entry.ranked_by < profile_count {
                0.0
            } else {
                entry.min_rating
            };
            entry.candidate
        })
        .collect();

    sort_descending(combined)
}
