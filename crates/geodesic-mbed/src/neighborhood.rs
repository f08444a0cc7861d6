//! Reduce a dense `DistanceMatrix` to a sparse neighborhood `Graph`.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{DistanceMatrix, EdgeDirection, Graph, IsomapError, Result, Row};

/// The rule for selecting the neighbors of each point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodRule {
    /// Keep the `k` nearest entries of each row. Ties at the `k`-th distance
    /// are broken by ascending point index.
    KNearest {
        /// The number of neighbors to keep.
        k: usize,
    },
    /// Keep every entry of each row that is no farther than `radius`.
    Epsilon {
        /// The largest distance to a kept neighbor.
        radius: f64,
    },
}

impl NeighborhoodRule {
    /// Checks the rule against a matrix of `cardinality` points.
    ///
    /// # Errors
    ///
    /// - If `k` is zero or not smaller than `cardinality`.
    /// - If `radius` is not positive.
    pub fn validate(&self, cardinality: usize) -> Result<()> {
        match *self {
            Self::KNearest { k } => {
                if k < 1 || k >= cardinality {
                    return Err(IsomapError::parameter(format!(
                        "k must be in [1, {cardinality}) for {cardinality} points, but got {k}."
                    )));
                }
            }
            Self::Epsilon { radius } => {
                // `!(radius > 0.0)` also rejects NaN.
                if !(radius > 0.0) {
                    return Err(IsomapError::parameter(format!(
                        "The radius must be positive, but got {radius}."
                    )));
                }
            }
        }
        Ok(())
    }

    /// Selects the neighbors of point `i` from its row.
    ///
    /// Returns `None` when the row cannot supply the neighbors the rule asks
    /// for, i.e. a `KNearest` row with fewer than `k` candidates. Such rows
    /// are left out of the graph.
    fn select(&self, i: usize, row: &Row) -> Option<Row> {
        let candidates = row.iter().filter(|&(&j, _)| j != i).map(|(&j, &d)| (j, d));
        match *self {
            Self::KNearest { k } => {
                let mut candidates = candidates.collect::<Vec<_>>();
                if candidates.len() < k {
                    return None;
                }
                // Rows iterate in ascending index order and the sort is stable.
                candidates.sort_by(|(_, a), (_, b)| a.total_cmp(b));
                Some(candidates.into_iter().take(k).collect())
            }
            Self::Epsilon { radius } => Some(candidates.filter(|&(_, d)| d <= radius).collect()),
        }
    }
}

/// Builds the undirected neighborhood `Graph` of a `DistanceMatrix`.
///
/// # Errors
///
/// See [`NeighborhoodRule::validate`].
pub fn build_graph(distance_matrix: &DistanceMatrix, rule: NeighborhoodRule) -> Result<Graph> {
    build_graph_with(distance_matrix, rule, EdgeDirection::default())
}

/// Builds the neighborhood `Graph` of a `DistanceMatrix` with the given edge
/// direction.
///
/// Each row is reduced on its own, so the neighbor relation is not
/// symmetrized here. `EdgeDirection::Undirected` lets the shortest-path
/// solvers traverse every kept edge both ways.
///
/// # Errors
///
/// See [`NeighborhoodRule::validate`].
pub fn build_graph_with(
    distance_matrix: &DistanceMatrix,
    rule: NeighborhoodRule,
    direction: EdgeDirection,
) -> Result<Graph> {
    rule.validate(distance_matrix.cardinality())?;

    let adjacency = distance_matrix
        .rows()
        .iter()
        .filter_map(|(&i, row)| rule.select(i, row).map(|neighbors| (i, neighbors)))
        .collect::<BTreeMap<_, _>>();

    log_graph(distance_matrix, &adjacency, rule);
    Ok(Graph::new(adjacency).with_direction(direction))
}

/// Parallel version of [`build_graph`].
///
/// # Errors
///
/// See [`NeighborhoodRule::validate`].
pub fn par_build_graph(distance_matrix: &DistanceMatrix, rule: NeighborhoodRule) -> Result<Graph> {
    par_build_graph_with(distance_matrix, rule, EdgeDirection::default())
}

/// Parallel version of [`build_graph_with`].
///
/// # Errors
///
/// See [`NeighborhoodRule::validate`].
pub fn par_build_graph_with(
    distance_matrix: &DistanceMatrix,
    rule: NeighborhoodRule,
    direction: EdgeDirection,
) -> Result<Graph> {
    rule.validate(distance_matrix.cardinality())?;

    let adjacency = distance_matrix
        .rows()
        .par_iter()
        .filter_map(|(&i, row)| rule.select(i, row).map(|neighbors| (i, neighbors)))
        .collect::<BTreeMap<_, _>>();

    log_graph(distance_matrix, &adjacency, rule);
    Ok(Graph::new(adjacency).with_direction(direction))
}

/// Logs the size of a freshly built neighborhood graph.
fn log_graph(distance_matrix: &DistanceMatrix, adjacency: &BTreeMap<usize, Row>, rule: NeighborhoodRule) {
    let dropped = distance_matrix.rows().len() - adjacency.len();
    let isolated = adjacency.values().filter(|row| row.is_empty()).count();
    let edges = adjacency.values().map(BTreeMap::len).sum::<usize>();
    ftlog::debug!("Built a neighborhood graph with {rule:?}: {edges} edges, {dropped} short rows dropped, {isolated} empty rows.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_nearest_breaks_ties_by_index() {
        let row = [(1, 2.0), (2, 1.0), (3, 2.0), (4, 2.0), (0, 0.0)].into_iter().collect::<Row>();
        let rule = NeighborhoodRule::KNearest { k: 3 };
        let kept = rule.select(0, &row).map(|r| r.into_iter().collect::<Vec<_>>());
        assert_eq!(kept, Some(vec![(1, 2.0), (2, 1.0), (3, 2.0)]));

        let rule = NeighborhoodRule::KNearest { k: 5 };
        assert_eq!(rule.select(0, &row), None);
    }

    #[test]
    fn epsilon_keeps_empty_rows() {
        let row = [(1, 5.0), (2, 7.0)].into_iter().collect::<Row>();
        let rule = NeighborhoodRule::Epsilon { radius: 1.0 };
        assert_eq!(rule.select(0, &row), Some(Row::new()));
    }

    #[test]
    fn validation() {
        assert!(NeighborhoodRule::KNearest { k: 1 }.validate(2).is_ok());
        assert!(matches!(
            NeighborhoodRule::KNearest { k: 0 }.validate(2),
            Err(IsomapError::InvalidParameter(_))
        ));
        assert!(matches!(
            NeighborhoodRule::KNearest { k: 2 }.validate(2),
            Err(IsomapError::InvalidParameter(_))
        ));
        assert!(NeighborhoodRule::Epsilon { radius: 0.5 }.validate(2).is_ok());
        for radius in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                NeighborhoodRule::Epsilon { radius }.validate(2),
                Err(IsomapError::InvalidParameter(_))
            ));
        }
    }
}
