use std::collections::{HashMap, HashSet};

/// Sparse tag-weight vector: an absent tag is equivalent to weight 0.
pub type TagVector = HashMap<String, f64>;

/// Manhattan distance between two tag vectors
///
/// Sums the absolute per-tag differences over the union of both key sets,
/// treating absent tags as 0.
pub fn manhattan_distance(a: &TagVector, b: &TagVector) -> f64 {
    let keys: HashSet<&String> = a.keys().chain(b.keys()).collect();
    keys.into_iter()
        .map(|key| {
            let left = a.get(key).copied().unwrap_or(0.0);
            let right = b.get(key).copied().unwrap_or(0.0);
            (left - right).abs()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> TagVector {
        entries
            .iter()
            .map(|(tag, weight)| (tag.to_string(), *weight))
            .collect()
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let v = vector(&[("Puzzle", 1.0), ("Indie", 0.5)]);
        assert_eq!(manhattan_distance(&v, &v), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = vector(&[("Puzzle", 1.0), ("Indie", 0.25)]);
        let b = vector(&[("Puzzle", 0.5), ("Horror", 0.75)]);
        assert_eq!(manhattan_distance(&a, &b), manhattan_distance(&b, &a));
    }

    #[test]
    fn test_distance_is_non_negative() {
        let a = vector(&[("Puzzle", 0.1)]);
        let b = vector(&[("Horror", 0.9), ("Puzzle", 1.0)]);
        assert!(manhattan_distance(&a, &b) >= 0.0);
    }

    #[test]
    fn test_absent_tags_count_as_zero() {
        let a = vector(&[("Puzzle", 1.0)]);
        let b = vector(&[("Horror", 0.5)]);
        assert_eq!(manhattan_distance(&a, &b), 1.5);
    }

    #[test]
    fn test_distance_over_key_union() {
        let a = vector(&[("Puzzle", 1.0), ("Indie", 0.5)]);
        let b = vector(&[("Puzzle", 0.25), ("Horror", 1.0)]);
        // |1.0 - 0.25| + |0.5 - 0| + |0 - 1.0|
        assert!((manhattan_distance(&a, &b) - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_vectors() {
        let empty = TagVector::new();
        assert_eq!(manhattan_distance(&empty, &empty), 0.0);
    }
}
