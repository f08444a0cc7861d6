//! Floyd-Warshall all-pairs shortest paths.

use rayon::prelude::*;

/// The dense matrix of direct edge weights, with a zero diagonal and
/// `f64::INFINITY` for missing edges.
fn initial(lists: &[Vec<(usize, f64)>]) -> Vec<Vec<f64>> {
    let n = lists.len();
    lists
        .iter()
        .enumerate()
        .map(|(u, out)| {
            let mut row = vec![f64::INFINITY; n];
            row[u] = 0.0;
            for &(v, w) in out {
                row[v] = row[v].min(w);
            }
            row
        })
        .collect()
}

/// Relaxes one row through the intermediate position `k`, whose own row is
/// `via`.
fn relax(row: &mut [f64], k: usize, via: &[f64]) {
    let to_k = row[k];
    if to_k.is_infinite() {
        return;
    }
    for (d, &from_k) in row.iter_mut().zip(via) {
        let candidate = to_k + from_k;
        if candidate < *d {
            *d = candidate;
        }
    }
}

/// Shortest-path distances between every pair of positions, given the
/// out-edges of every position.
pub fn all_pairs(lists: &[Vec<(usize, f64)>]) -> Vec<Vec<f64>> {
    let mut distances = initial(lists);
    for k in 0..distances.len() {
        // Row `k` does not change while relaxing through `k`.
        let via = distances[k].clone();
        for row in &mut distances {
            relax(row, k, &via);
        }
    }
    distances
}

/// Parallel version of `all_pairs`.
pub fn par_all_pairs(lists: &[Vec<(usize, f64)>]) -> Vec<Vec<f64>> {
    let mut distances = initial(lists);
    for k in 0..distances.len() {
        let via = distances[k].clone();
        distances.par_iter_mut().for_each(|row| relax(row, k, &via));
    }
    distances
}
