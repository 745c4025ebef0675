use serde::{Deserialize, Serialize};

use super::game::AppId;
use super::tags::TagVector;

/// A user's inferred taste: normalized tag weights in [0, 1],
/// pruned to at most [`Profile::MAX_TAGS`] entries. Never mutated
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    pub tags: TagVector,
}

impl Profile {
    /// Upper bound on the number of tags a profile may carry
    pub const MAX_TAGS: usize = 30;

    /// Weight for a tag, 0 when absent
    pub fn weight(&self, tag: &str) -> f64 {
        self.tags.get(tag).copied().unwrap_or(0.0)
    }
}

/// One catalog game scored against a profile (or a group, after aggregation)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub app_id: AppId,
    /// Blacklist-filtered, max-normalized tag weights; retained to seed clustering
    pub tags: TagVector,
    pub rating: f64,
    pub cluster_id: Option<usize>,
}

/// One taste neighborhood produced by the clusterer
///
/// Centers are recomputed every refinement round; points are cleared and
/// reassigned each round. Lives only for the duration of one clustering call.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub id: usize,
    pub center: TagVector,
    pub points: Vec<ScoredCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_weight_absent_tag_is_zero() {
        let profile = Profile {
            tags: [("Puzzle".to_string(), 0.8)].into_iter().collect(),
        };
        assert_eq!(profile.weight("Puzzle"), 0.8);
        assert_eq!(profile.weight("Horror"), 0.0);
    }

    #[test]
    fn test_profile_serde_round_trip() {
        let profile = Profile {
            tags: [("Roguelike".to_string(), 1.0)].into_iter().collect(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
