//! Repeated single-source Dijkstra.

use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::utils::MinItem;

/// Shortest-path distances from `source` to every position, given the
/// out-edges of every position.
pub fn single_source(lists: &[Vec<(usize, f64)>], source: usize) -> Vec<f64> {
    let mut distances = vec![f64::INFINITY; lists.len()];
    distances[source] = 0.0;

    let mut frontier = BinaryHeap::new();
    frontier.push(MinItem(source, 0.0));

    while let Some(MinItem(u, d)) = frontier.pop() {
        // Stale entry; `u` was already settled through a shorter path.
        if d > distances[u] {
            continue;
        }
        for &(v, w) in &lists[u] {
            let candidate = d + w;
            if candidate < distances[v] {
                distances[v] = candidate;
                frontier.push(MinItem(v, candidate));
            }
        }
    }

    distances
}

/// One `single_source` pass per position.
pub fn all_pairs(lists: &[Vec<(usize, f64)>]) -> Vec<Vec<f64>> {
    (0..lists.len()).map(|s| single_source(lists, s)).collect()
}

/// Parallel version of `all_pairs`.
pub fn par_all_pairs(lists: &[Vec<(usize, f64)>]) -> Vec<Vec<f64>> {
    (0..lists.len())
        .into_par_iter()
        .map(|s| single_source(lists, s))
        .collect()
}
