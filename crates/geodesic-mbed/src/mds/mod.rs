//! Classical (Torgerson) multidimensional scaling.

mod embedding;

use distances::Number;
use nalgebra::{DMatrix, SymmetricEigen};

pub use embedding::Embedding;

use crate::{utils, DistanceMatrix, IsomapError, Result};

/// Eigenvalues no larger than this fraction of the largest one are treated as
/// zero, which absorbs the round-off of the eigensolver.
const DEGENERATE_TOLERANCE: f64 = 1e-10;

/// Embeds the nodes of a `DistanceMatrix` into `dimension`-dimensional
/// Euclidean space with classical MDS.
///
/// Each pair of distinct nodes must have an entry in at least one direction.
/// The squared distances are double-centered and the coordinates are read
/// from the top `dimension` eigenpairs of the result. Axes whose eigenvalue is
/// not positive are all zero and are listed in
/// [`Embedding::degenerate_axes`]. Each axis is flipped so that its
/// largest-magnitude coordinate is positive.
///
/// # Errors
///
/// - If `dimension` is not in `1..=n-1` for `n` nodes.
/// - If any entry is infinite, i.e. the matrix came from a disconnected graph.
/// - If a pair is missing or its two directions disagree.
pub fn embed(distance_matrix: &DistanceMatrix, dimension: usize) -> Result<Embedding> {
    let ids = distance_matrix.nodes().into_iter().collect::<Vec<_>>();
    let n = ids.len();

    let max = n.saturating_sub(1);
    if dimension < 1 || dimension > max {
        return Err(IsomapError::dimension(dimension, max));
    }

    let unreachable = distance_matrix.unreachable_pairs();
    if unreachable > 0 {
        return Err(IsomapError::graph(format!(
            "Cannot embed a matrix with {unreachable} unreachable pairs. The neighborhood graph is disconnected."
        )));
    }

    let squared = squared_distances(distance_matrix, &ids)?;
    let centered = double_center(&squared);
    ftlog::debug!("Double-centered the squared distances of {n} points.");

    let SymmetricEigen {
        eigenvalues,
        eigenvectors,
    } = SymmetricEigen::new(centered);

    // Stable sort, so equal eigenvalues keep their eigenvector order.
    let mut order = (0..n).collect::<Vec<_>>();
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));
    order.truncate(dimension);

    let largest = order.first().map_or(0.0, |&a| eigenvalues[a].abs());
    let threshold = DEGENERATE_TOLERANCE * largest;

    let mut points = vec![vec![0.0; dimension]; n];
    let mut selected = Vec::with_capacity(dimension);
    let mut degenerate_axes = Vec::new();
    for (axis, &a) in order.iter().enumerate() {
        let lambda = eigenvalues[a];
        selected.push(lambda);
        if lambda <= threshold {
            degenerate_axes.push(axis);
            continue;
        }

        let scale = lambda.sqrt();
        let mut column = eigenvectors.column(a).iter().map(|&v| v * scale).collect::<Vec<_>>();
        if let Some((_, x)) = utils::arg_max_magnitude(&column) {
            if x < 0.0 {
                column.iter_mut().for_each(|v| *v = -*v);
            }
        }
        for (point, v) in points.iter_mut().zip(column) {
            point[axis] = v;
        }
    }

    if !degenerate_axes.is_empty() {
        ftlog::warn!(
            "Axes {degenerate_axes:?} of the {dimension}-dimensional embedding have non-positive eigenvalues and are set to zero."
        );
    }
    ftlog::debug!("Embedded {n} points in {dimension} dimensions with eigenvalues {selected:?}.");

    Ok(Embedding::new(ids, points, selected, degenerate_axes))
}

/// Embeds raw points with classical MDS on their Euclidean distances.
///
/// # Errors
///
/// - See [`DistanceMatrix::from_points`].
/// - See [`embed`].
pub fn embed_points<I: AsRef<[T]>, T: Number>(points: &[I], dimension: usize) -> Result<Embedding> {
    let distance_matrix = DistanceMatrix::from_points(points)?;
    embed(&distance_matrix, dimension)
}

/// The dense matrix of squared distances over `ids`.
fn squared_distances(distance_matrix: &DistanceMatrix, ids: &[usize]) -> Result<DMatrix<f64>> {
    let n = ids.len();
    let mut squared = DMatrix::zeros(n, n);
    for (a, &i) in ids.iter().enumerate() {
        for (b, &j) in ids.iter().enumerate().skip(a + 1) {
            let d = distance_matrix.resolve_pair(i, j)?;
            squared[(a, b)] = d * d;
            squared[(b, a)] = d * d;
        }
    }
    Ok(squared)
}

/// `-1/2 J S J` for the centering matrix `J = I - 11'/n`.
fn double_center(squared: &DMatrix<f64>) -> DMatrix<f64> {
    let n = squared.nrows();
    let row_means = (0..n).map(|i| squared.row(i).mean()).collect::<Vec<_>>();
    let grand_mean = squared.mean();
    DMatrix::from_fn(n, n, |i, j| -0.5 * (squared[(i, j)] - row_means[i] - row_means[j] + grand_mean))
}
