use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::tags::TagVector;

/// Steam application identifier
pub type AppId = u32;

/// A catalog game as stored on disk
///
/// `tags` carries community vote counts per tag. `attributes` is an opaque
/// record (name, imagery, categories, user score, ...) owned by the
/// presentation layer; the recommendation core never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub app_id: AppId,
    pub tags: TagVector,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// Catalog-wide tag statistics, loaded once per process start
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TagStats {
    #[serde(rename = "tagFrequency")]
    pub tag_frequency: HashMap<String, u64>,
    #[serde(rename = "tagIDF")]
    pub tag_idf: HashMap<String, f64>,
}

impl TagStats {
    /// All known tags ordered by descending catalog frequency
    pub fn tags_by_frequency(&self) -> Vec<String> {
        let mut tags: Vec<&String> = self.tag_frequency.keys().collect();
        tags.sort_by(|a, b| {
            let fa = self.tag_frequency[*a];
            let fb = self.tag_frequency[*b];
            fb.cmp(&fa).then_with(|| a.cmp(b))
        });
        tags.into_iter().cloned().collect()
    }
}
