use serde::Deserialize;

use crate::{
    catalog::{tag_blacklist, CatalogStore},
    error::AppResult,
    models::{AppId, Profile},
    services::{
        aggregation::{aggregate, AggregationMethod},
        clustering::cluster,
        diversify::diversify,
        scoring::rank_catalog,
    },
};

/// Aggregated candidates kept for the clustering stage
pub const CANDIDATE_CUTOFF: usize = 500;

/// Cluster count when diversification is requested
pub const GROUP_CLUSTERS: usize = 5;

/// Refinement-round cap for one clustering call
pub const MAX_CLUSTER_ITERATIONS: usize = 50;

/// Caller-facing knobs for one group recommendation request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecommendationOptions {
    pub clustering: bool,
    pub aggregation: AggregationMethod,
}

/// Generates the ordered recommendation list for a group of profiles
///
/// The pipeline: fetch the complete catalog, rank it per profile, aggregate
/// the rankings with the requested strategy, keep the top
/// [`CANDIDATE_CUTOFF`] candidates, cluster them ([`GROUP_CLUSTERS`] ways
/// when diversification is on, otherwise a single cluster), and interleave
/// the clusters round-robin.
///
/// No profiles means no preferences to serve: the result is empty, not an
/// error. Any catalog failure aborts the whole computation; a partial
/// candidate set would make aggregation and clustering meaningless.
pub async fn recommend_for_group(
    catalog: &dyn CatalogStore,
    profiles: &[Profile],
    options: RecommendationOptions,
) -> AppResult<Vec<AppId>> {
    if profiles.is_empty() {
        return Ok(Vec::new());
    }

    let app_ids = catalog.list_app_ids().await?;
    let mut games = Vec::with_capacity(app_ids.len());
    for app_id in app_ids {
        games.push(catalog.get_game(app_id).await?);
    }

    let per_profile = rank_catalog(profiles, &games, tag_blacklist());
    let combined = aggregate(options.aggregation, &per_profile);

    let top: Vec<_> = combined.into_iter().take(CANDIDATE_CUTOFF).collect();
    let k = if options.clustering { GROUP_CLUSTERS } else { 1 };
    let clusters = cluster(k, top, MAX_CLUSTER_ITERATIONS)?;

    let recommended = diversify(clusters);

    tracing::info!(
        profiles = profiles.len(),
        catalog_size = games.len(),
        clustering = options.clustering,
        recommended = recommended.len(),
        "Generated group recommendations"
    );

    Ok(recommended)
}
