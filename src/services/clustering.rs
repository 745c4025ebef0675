use crate::{
    error::{AppError, AppResult},
    models::{manhattan_distance, Cluster, ScoredCandidate, TagVector},
};

/// Only the highest-rated candidates are considered when picking seeds, so
/// centers spread across the dense top of the ranking rather than the tail.
const SEEDING_WINDOW: usize = 100;

/// Partitions candidates into `k` clusters by tag-vector similarity
///
/// A k-means variant: deterministic farthest-point seeding, Manhattan
/// distance, Lloyd refinement. Refinement stops when an assignment round
/// changes nothing or after `max_iterations` rounds; the last assignment is
/// returned either way, converged or not. Always returns exactly `k`
/// clusters; some may be empty when `k` exceeds the distinct tag patterns.
///
/// `candidates` must be ordered by descending rating (cluster 0 is seeded
/// from the top candidate). An empty candidate list cannot seed anything
/// and fails with `InsufficientData`.
pub fn cluster(
    k: usize,
    mut candidates: Vec<ScoredCandidate>,
    max_iterations: usize,
) -> AppResult<Vec<Cluster>> {
    if candidates.is_empty() {
        return Err(AppError::InsufficientData(
            "clustering requires at least one candidate".to_string(),
        ));
    }
    if k == 0 {
        return Err(AppError::InvalidInput(
            "cluster count must be at least 1".to_string(),
        ));
    }

    let mut clusters = vec![Cluster {
        id: 0,
        center: candidates[0].tags.clone(),
        points: Vec::new(),
    }];

    // Each further seed is the candidate (from the seeding window) whose
    // distance to its nearest existing center is largest.
    for id in 1..k {
        let mut farthest = 0;
        let mut farthest_distance = -1.0_f64;

        for (i, candidate) in candidates.iter().take(SEEDING_WINDOW).enumerate() {
            let nearest = clusters
                .iter()
                .map(|c| manhattan_distance(&candidate.tags, &c.center))
                .fold(f64::INFINITY, f64::min);
            if nearest > farthest_distance {
                farthest_distance = nearest;
                farthest = i;
            }
        }

        clusters.push(Cluster {
            id,
            center: candidates[farthest].tags.clone(),
            points: Vec::new(),
        });
    }

    assign_points(&mut clusters, &mut candidates);

    let mut reassigned = true;
    let mut iterations = 0;
    while reassigned && iterations < max_iterations {
        for cluster in &mut clusters {
            cluster.center = mean_center(&cluster.points);
            cluster.points.clear();
        }
        reassigned = assign_points(&mut clusters, &mut candidates);
        iterations += 1;
    }

    tracing::debug!(
        k = k,
        candidates = candidates.len(),
        iterations = iterations,
        converged = !reassigned,
        "Clustering finished"
    );

    Ok(clusters)
}

/// Assigns every candidate to its Manhattan-nearest center
///
/// Returns whether any candidate changed cluster since the previous round.
/// Distance ties go to the lowest cluster id.
fn assign_points(clusters: &mut [Cluster], candidates: &mut [ScoredCandidate]) -> bool {
    let mut reassigned = false;

    for candidate in candidates.iter_mut() {
        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for cluster in clusters.iter() {
            let distance = manhattan_distance(&candidate.tags, &cluster.center);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = cluster.id;
            }
        }

        if candidate.cluster_id != Some(nearest) {
            reassigned = true;
        }
        candidate.cluster_id = Some(nearest);
        clusters[nearest].points.push(candidate.clone());
    }

    reassigned
}

/// Per-tag arithmetic mean of the members' tag vectors
///
/// A tag absent from a member contributes 0 to that member's share. An
/// empty cluster collapses to the empty vector; it can still re-acquire
/// points in a later round.
fn mean_center(points: &[ScoredCandidate]) -> TagVector {
    let mut center = TagVector::new();
    if points.is_empty() {
        return center;
    }

    for point in points {
        for (tag, weight) in &point.tags {
            *center.entry(tag.clone()).or_insert(0.0) += weight;
        }
    }

    let count = points.len() as f64;
    for weight in center.values_mut() {
        *weight /= count;
    }

    center
}
