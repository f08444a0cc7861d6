#![allow(dead_code)]

//! Utility functions for tests.

use distances::Number;
use float_cmp::approx_eq;
use geodesic_mbed::{datasets, DistanceMatrix, Result};
use rand::prelude::*;

/// Builds a matrix from `(row, [(column, distance)])` pairs.
pub fn matrix(rows: &[(usize, &[(usize, f64)])]) -> Result<DistanceMatrix> {
    DistanceMatrix::from_triples(
        rows.iter()
            .flat_map(|&(i, row)| row.iter().map(move |&(j, d)| (i, j, d))),
    )
}

/// The upper triangle of a 4-point matrix whose direct `0 - 1` edge is much
/// longer than the path through `2` and `3`.
pub fn sparse_square() -> Result<DistanceMatrix> {
    matrix(&[
        (0, &[(1, 50.0), (2, 10.0), (3, 20.0)]),
        (1, &[(2, 4.0), (3, 2.0)]),
        (2, &[(3, 2.0)]),
    ])
}

/// The geodesic distances of `sparse_square`.
pub fn sparse_square_geodesics() -> Result<DistanceMatrix> {
    matrix(&[
        (0, &[(0, 0.0), (1, 14.0), (2, 10.0), (3, 12.0)]),
        (1, &[(0, 14.0), (1, 0.0), (2, 4.0), (3, 2.0)]),
        (2, &[(0, 10.0), (1, 4.0), (2, 0.0), (3, 2.0)]),
        (3, &[(0, 12.0), (1, 2.0), (2, 2.0), (3, 0.0)]),
    ])
}

/// The upper triangle of a 4-point matrix in which every point is close to
/// point 3 and far from every other point.
pub fn star() -> Result<DistanceMatrix> {
    matrix(&[
        (0, &[(1, 5.0), (2, 40.0), (3, 4.0)]),
        (1, &[(2, 41.0), (3, 1.0)]),
        (2, &[(3, 2.0)]),
    ])
}

/// Wickelmaier's proximity matrix of four points.
pub fn wickelmaier() -> Result<DistanceMatrix> {
    matrix(&[
        (0, &[(0, 0.0), (1, 93.0), (2, 82.0), (3, 133.0)]),
        (1, &[(0, 93.0), (1, 0.0), (2, 52.0), (3, 60.0)]),
        (2, &[(0, 82.0), (1, 52.0), (2, 0.0), (3, 111.0)]),
        (3, &[(0, 133.0), (1, 60.0), (2, 111.0), (3, 0.0)]),
    ])
}

/// The classical MDS coordinates of `wickelmaier` in 2 dimensions, up to the
/// sign of each axis.
pub const WICKELMAIER_2D: [[f64; 2]; 4] = [
    [-62.831, 32.97448],
    [18.403, -12.02697],
    [-24.960, -39.71091],
    [69.388, 18.76340],
];

/// A seeded swiss roll without noise.
pub fn swiss_roll(cardinality: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    datasets::swiss_roll(cardinality, 0.0, &mut rng).0
}

/// A regular sheet on the swiss roll with `turns` points along the roll and
/// `layers` points across it. Consecutive points along the roll are at most
/// about 3.4 apart, points across the roll are 3 apart, and successive wraps
/// of the roll are more than 6 apart.
pub fn rolled_sheet(turns: usize, layers: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let start = 1.5 * std::f64::consts::PI;
    let step = 2.0 * start / (turns - 1).as_f64();
    (0..turns)
        .flat_map(|i| {
            let t = step.mul_add(i.as_f64(), start);
            (0..layers).map(move |l| (vec![t * t.cos(), 3.0 * l.as_f64(), t * t.sin()], t))
        })
        .unzip()
}

/// Whether two matrices have the same entries within a relative tolerance.
/// Infinite entries must match exactly.
pub fn same_distances(a: &DistanceMatrix, b: &DistanceMatrix, tolerance: f64) -> bool {
    a.num_entries() == b.num_entries()
        && a.iter().all(|(i, j, x)| {
            b.get(i, j).is_some_and(|y| {
                if x.is_infinite() || y.is_infinite() {
                    x == y
                } else {
                    approx_eq!(f64, x, y, epsilon = tolerance * x.abs().max(1.0))
                }
            })
        })
}

/// The arc length of the roll from its center to the position `t`.
pub fn roll_length(t: f64) -> f64 {
    0.5 * t.mul_add(t.hypot(1.0), t.asinh())
}

/// Pearson correlation of two equally long series.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().as_f64();
    let (mx, my) = (x.iter().sum::<f64>() / n, y.iter().sum::<f64>() / n);
    let cov = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum::<f64>();
    let vx = x.iter().map(|a| (a - mx).powi(2)).sum::<f64>();
    let vy = y.iter().map(|b| (b - my).powi(2)).sum::<f64>();
    cov / (vx * vy).sqrt()
}
