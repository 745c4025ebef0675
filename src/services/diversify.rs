use std::cmp::Ordering;

use crate::models::{AppId, Cluster};

/// Flattens clusters into the final recommendation order
///
/// Each cluster's points are sorted by descending rating, then the output
/// takes one item per cluster per round, visiting clusters in their given
/// order, until every cluster is exhausted. No taste neighborhood can
/// dominate a contiguous run of the list; the price is leaving strict
/// rating order.
pub fn diversify(mut clusters: Vec<Cluster>) -> Vec<AppId> {
    for cluster in &mut clusters {
        // Stable sort: rating ties keep their existing order
        cluster
            .points
            .sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    }

    let mut recommended = Vec::new();
    let mut round = 0;
    let mut found = true;

    while found {
        found = false;
        for cluster in &clusters {
            if let Some(point) = cluster.points.get(round) {
                found = true;
                recommended.push(point.app_id);
            }
        }
        round += 1;
    }

    recommended
}
