//! The `DistanceMatrix` is the common input and output of every stage.

use std::collections::{BTreeMap, BTreeSet};

use distances::Number;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{utils, IsomapError, Result};

/// A row of a `DistanceMatrix`, i.e. a map from a point-index to the distance
/// to that point.
pub type Row = BTreeMap<usize, f64>;

/// The tolerance used when comparing the two directions of a pair.
pub(crate) const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A mapping from point-index to a mapping from point-index to a distance.
///
/// The distances are non-negative and never NaN. Diagonal entries, when
/// present, are zero. The matrix may be dense, with every pair present, or
/// sparse, e.g. only the upper triangle. A missing entry means that there is
/// no entry for that pair. It never means zero or infinity. `f64::INFINITY`
/// is the explicit marker for an unreachable pair.
///
/// The node set of a matrix is the union of its row keys and every column key
/// mentioned in any row. Rows and columns iterate in ascending index order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<usize, Row>", into = "BTreeMap<usize, Row>")]
pub struct DistanceMatrix {
    /// The rows of the matrix.
    rows: BTreeMap<usize, Row>,
}

impl TryFrom<BTreeMap<usize, Row>> for DistanceMatrix {
    type Error = IsomapError;

    fn try_from(rows: BTreeMap<usize, Row>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<DistanceMatrix> for BTreeMap<usize, Row> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows
    }
}

impl DistanceMatrix {
    /// Creates a new `DistanceMatrix` from its rows.
    ///
    /// # Errors
    ///
    /// - If any distance is NaN or negative.
    /// - If any diagonal entry is not zero.
    pub fn new(rows: BTreeMap<usize, Row>) -> Result<Self> {
        for (&i, row) in &rows {
            for (&j, &d) in row {
                if d.is_nan() {
                    return Err(IsomapError::input(format!("The distance from {i} to {j} is NaN.")));
                }
                if d < 0.0 {
                    return Err(IsomapError::input(format!(
                        "Distances must be non-negative, but the distance from {i} to {j} is {d}."
                    )));
                }
                if i == j && d != 0.0 {
                    return Err(IsomapError::input(format!(
                        "Diagonal entries must be zero, but the entry for {i} is {d}."
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Creates a new `DistanceMatrix` from `(i, j, distance)` triples.
    ///
    /// # Errors
    ///
    /// - If the same ordered pair appears more than once.
    /// - See [`DistanceMatrix::new`].
    pub fn from_triples<I: IntoIterator<Item = (usize, usize, f64)>>(triples: I) -> Result<Self> {
        let mut rows = BTreeMap::<usize, Row>::new();
        for (i, j, d) in triples {
            if rows.entry(i).or_default().insert(j, d).is_some() {
                return Err(IsomapError::input(format!("The pair ({i}, {j}) was given more than once.")));
            }
        }
        Self::new(rows)
    }

    /// Builds the dense matrix of Euclidean distances between the given points.
    ///
    /// The points are indexed by their position in the slice.
    ///
    /// # Errors
    ///
    /// - If the points do not all have the same dimensionality.
    /// - If any coordinate is not finite.
    pub fn from_points<I: AsRef<[T]>, T: Number>(points: &[I]) -> Result<Self> {
        check_points(points)?;
        let rows = (0..points.len())
            .map(|i| (i, pairwise_row(points, i, |j| j)))
            .collect();
        Self::new(rows)
    }

    /// Parallel version of [`DistanceMatrix::from_points`].
    ///
    /// # Errors
    ///
    /// See [`DistanceMatrix::from_points`].
    pub fn par_from_points<I: AsRef<[T]> + Send + Sync, T: Number>(points: &[I]) -> Result<Self> {
        check_points(points)?;
        let rows = (0..points.len())
            .into_par_iter()
            .map(|i| (i, pairwise_row(points, i, |j| j)))
            .collect();
        Self::new(rows)
    }

    /// Builds the dense matrix of Euclidean distances between points labeled
    /// by the given node indices. Used for the distances realized by an
    /// embedding.
    pub(crate) fn from_labeled_points(ids: &[usize], points: &[Vec<f64>]) -> Self {
        let rows = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, pairwise_row(points, i, |j| ids[j])))
            .collect();
        Self { rows }
    }

    /// Parallel version of [`DistanceMatrix::from_labeled_points`].
    pub(crate) fn par_from_labeled_points(ids: &[usize], points: &[Vec<f64>]) -> Self {
        let rows = ids
            .par_iter()
            .enumerate()
            .map(|(i, &id)| (id, pairwise_row(points, i, |j| ids[j])))
            .collect();
        Self { rows }
    }

    /// Assembles a complete matrix from dense rows whose positions are mapped
    /// to node indices by `ids`.
    pub(crate) fn from_dense(ids: &[usize], dense: Vec<Vec<f64>>) -> Self {
        let rows = ids
            .iter()
            .zip(dense)
            .map(|(&i, row)| (i, ids.iter().copied().zip(row).collect()))
            .collect();
        Self { rows }
    }

    /// Returns the rows of the matrix.
    #[must_use]
    pub const fn rows(&self) -> &BTreeMap<usize, Row> {
        &self.rows
    }

    /// Consumes the matrix and returns its rows.
    #[must_use]
    pub fn into_rows(self) -> BTreeMap<usize, Row> {
        self.rows
    }

    /// Returns the row of the given node, if there is one.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&Row> {
        self.rows.get(&i)
    }

    /// Returns the entry for the ordered pair `(i, j)`, if there is one.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(&i).and_then(|row| row.get(&j)).copied()
    }

    /// Returns the distance between `i` and `j`, looking up the entry in
    /// either direction. The distance from a node to itself is zero.
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> Option<f64> {
        if i == j && self.contains(i) {
            return Some(0.0);
        }
        self.get(i, j).or_else(|| self.get(j, i))
    }

    /// Whether the given node is in the matrix.
    #[must_use]
    pub fn contains(&self, i: usize) -> bool {
        self.rows.contains_key(&i) || self.rows.values().any(|row| row.contains_key(&i))
    }

    /// Returns the node set of the matrix in ascending order.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<usize> {
        self.rows
            .iter()
            .flat_map(|(&i, row)| core::iter::once(i).chain(row.keys().copied()))
            .collect()
    }

    /// Returns the number of nodes in the matrix.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the number of entries stored in the matrix.
    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Whether the matrix has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_entries() == 0
    }

    /// Iterates over the `(i, j, distance)` entries in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&i, row)| row.iter().map(move |(&j, &d)| (i, j, d)))
    }

    /// Whether every entry has a mirrored entry that agrees within the given
    /// tolerance.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.iter().all(|(i, j, d)| {
            self.get(j, i)
                .is_some_and(|e| utils::nearly_equal(d, e, tolerance))
        })
    }

    /// Whether every ordered pair of distinct nodes has an entry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let nodes = self.nodes();
        nodes.iter().all(|&i| {
            self.rows
                .get(&i)
                .is_some_and(|row| nodes.iter().all(|&j| i == j || row.contains_key(&j)))
        })
    }

    /// Returns the number of entries marked as unreachable.
    #[must_use]
    pub fn unreachable_pairs(&self) -> usize {
        self.iter().filter(|&(_, _, d)| d.is_infinite()).count()
    }

    /// Resolves the distance between two distinct nodes from either direction.
    ///
    /// # Errors
    ///
    /// - If neither direction has an entry.
    /// - If both directions have entries that disagree.
    pub(crate) fn resolve_pair(&self, i: usize, j: usize) -> Result<f64> {
        match (self.get(i, j), self.get(j, i)) {
            (Some(a), Some(b)) => {
                if utils::nearly_equal(a, b, SYMMETRY_TOLERANCE) {
                    Ok(a)
                } else {
                    Err(IsomapError::input(format!(
                        "The distances between {i} and {j} are not symmetric: {a} and {b}."
                    )))
                }
            }
            (Some(d), None) | (None, Some(d)) => Ok(d),
            (None, None) => Err(IsomapError::input(format!(
                "There is no distance between {i} and {j}."
            ))),
        }
    }
}

/// Checks that the points share a dimensionality and have finite coordinates.
fn check_points<I: AsRef<[T]>, T: Number>(points: &[I]) -> Result<()> {
    let Some(first) = points.first() else {
        return Ok(());
    };
    let dim = first.as_ref().len();
    for (i, p) in points.iter().enumerate() {
        let p = p.as_ref();
        if p.len() != dim {
            return Err(IsomapError::input(format!(
                "Every point must have {dim} coordinates, but point {i} has {}.",
                p.len()
            )));
        }
        if p.iter().any(|x| !x.as_f64().is_finite()) {
            return Err(IsomapError::input(format!("Point {i} has a coordinate that is not finite.")));
        }
    }
    Ok(())
}

/// The Euclidean distances from the `i`-th point to every point, keyed by
/// `label(j)` for the `j`-th point.
fn pairwise_row<I: AsRef<[T]>, T: Number, L: Fn(usize) -> usize>(points: &[I], i: usize, label: L) -> Row {
    let a = points[i].as_ref();
    points
        .iter()
        .enumerate()
        .map(|(j, b)| {
            let d = if i == j {
                0.0
            } else {
                distances::vectors::euclidean::<T, f64>(a, b.as_ref())
            };
            (label(j), d)
        })
        .collect()
}
