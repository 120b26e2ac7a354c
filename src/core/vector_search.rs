//! Vector distance helpers for local ranking
//!
//! The hosted store ranks with pgvector's cosine distance operator; the
//! in-memory store ranks with the functions here so both agree on ordering.

use std::cmp::Ordering;

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Cosine distance as pgvector's `<=>` defines it: `1 - cosine_similarity`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// An item paired with its distance to the query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub distance: f32,
}

/// Orders `candidates` by ascending cosine distance to `query` and keeps the
/// first `k`. Equal distances keep their input order.
pub fn nearest<'a, T, I>(query: &[f32], candidates: I, k: usize) -> Vec<Ranked<T>>
where
    I: IntoIterator<Item = (T, &'a [f32])>,
{
    let mut ranked: Vec<Ranked<T>> = candidates
        .into_iter()
        .map(|(item, vector)| Ranked {
            item,
            distance: cosine_distance(query, vector),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_distance_of_opposites() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_distance(&a, &b) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_nearest_orders_and_truncates() {
        let query = [1.0, 0.0];
        let far = [0.0, 1.0];
        let near = [0.9, 0.1];
        let exact = [2.0, 0.0];

        let ranked = nearest(
            &query,
            vec![("far", &far[..]), ("near", &near[..]), ("exact", &exact[..])],
            2,
        );

        let names: Vec<_> = ranked.iter().map(|r| r.item).collect();
        assert_eq!(names, vec!["exact", "near"]);
        assert!(ranked[0].distance <= ranked[1].distance);
    }

    #[test]
    fn test_nearest_ties_keep_input_order() {
        let query = [1.0, 0.0];
        let same = [1.0, 0.0];
        let ranked = nearest(&query, vec![("a", &same[..]), ("b", &same[..])], 2);
        assert_eq!(ranked[0].item, "a");
        assert_eq!(ranked[1].item, "b");
    }
}
