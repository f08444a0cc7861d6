//! The coordinates produced by classical MDS.

use serde::{Deserialize, Serialize};

use crate::DistanceMatrix;

/// Points in a low-dimensional Euclidean space, one per node of the embedded
/// `DistanceMatrix`, in ascending node order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The node index of each point.
    ids: Vec<usize>,
    /// The coordinates of each point.
    points: Vec<Vec<f64>>,
    /// The number of coordinates of each point.
    dimension: usize,
    /// The selected eigenvalues of the double-centered matrix, descending.
    eigenvalues: Vec<f64>,
    /// The axes whose eigenvalue was not positive. These are all zero.
    degenerate_axes: Vec<usize>,
}

impl Embedding {
    /// Creates a new `Embedding`. The `points` are aligned with `ids` and
    /// each has `eigenvalues.len()` coordinates.
    pub(crate) fn new(ids: Vec<usize>, points: Vec<Vec<f64>>, eigenvalues: Vec<f64>, degenerate_axes: Vec<usize>) -> Self {
        Self {
            ids,
            points,
            dimension: eigenvalues.len(),
            eigenvalues,
            degenerate_axes,
        }
    }

    /// Returns the node indices in ascending order.
    #[must_use]
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Returns the coordinates, aligned with `ids`.
    #[must_use]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Returns the coordinates of the given node, if it was embedded.
    #[must_use]
    pub fn point(&self, id: usize) -> Option<&[f64]> {
        self.ids
            .binary_search(&id)
            .ok()
            .map(|i| self.points[i].as_slice())
    }

    /// Returns the number of points.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.ids.len()
    }

    /// Returns the target dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the eigenvalues of the selected axes, in descending order.
    #[must_use]
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Returns the axes that were set to zero because their eigenvalue was
    /// not positive.
    #[must_use]
    pub fn degenerate_axes(&self) -> &[usize] {
        &self.degenerate_axes
    }

    /// Consumes the embedding and returns the coordinates.
    #[must_use]
    pub fn into_points(self) -> Vec<Vec<f64>> {
        self.points
    }

    /// The dense matrix of Euclidean distances between the embedded points,
    /// labeled by node index.
    #[must_use]
    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_labeled_points(&self.ids, &self.points)
    }

    /// Parallel version of [`Embedding::distance_matrix`].
    #[must_use]
    pub fn par_distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::par_from_labeled_points(&self.ids, &self.points)
    }
}
