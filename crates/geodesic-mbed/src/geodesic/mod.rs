//! All-pairs shortest paths over a neighborhood `Graph`, i.e. the geodesic
//! distances along the manifold.

mod dijkstra;
mod floyd_warshall;

use serde::{Deserialize, Serialize};

use crate::{DistanceMatrix, Graph, Result};

/// The algorithm used to compute all-pairs shortest paths.
///
/// Both algorithms produce the same distances, up to floating-point
/// round-off, on any graph with non-negative weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortestPathAlgorithm {
    /// One single-source Dijkstra pass per node, with a binary-heap frontier.
    /// `O(V (E log V))`, the better choice for sparse graphs.
    #[default]
    Dijkstra,
    /// Floyd-Warshall relaxation over every intermediate node. `O(V^3)`, for
    /// dense or small graphs.
    FloydWarshall,
}

/// Computes the shortest-path distance between every ordered pair of nodes in
/// the `Graph`.
///
/// The returned matrix is complete over the node set of the graph. Pairs with
/// no path are marked with `f64::INFINITY` and the diagonal is zero, including
/// for isolated nodes.
///
/// # Errors
///
/// If any edge weight is negative or NaN.
pub fn shortest_paths(graph: &Graph, algorithm: ShortestPathAlgorithm) -> Result<DistanceMatrix> {
    graph.validate_weights()?;
    let (ids, lists) = graph.dense_lists();
    ftlog::debug!(
        "Computing shortest paths with {algorithm:?} over {} nodes and {} edges.",
        ids.len(),
        graph.num_edges()
    );

    let dense = match algorithm {
        ShortestPathAlgorithm::Dijkstra => dijkstra::all_pairs(&lists),
        ShortestPathAlgorithm::FloydWarshall => floyd_warshall::all_pairs(&lists),
    };
    Ok(DistanceMatrix::from_dense(&ids, dense))
}

/// Parallel version of [`shortest_paths`].
///
/// The Dijkstra passes are independent and each fills its own row. The
/// Floyd-Warshall rows are relaxed in parallel for each intermediate node.
///
/// # Errors
///
/// See [`shortest_paths`].
pub fn par_shortest_paths(graph: &Graph, algorithm: ShortestPathAlgorithm) -> Result<DistanceMatrix> {
    graph.validate_weights()?;
    let (ids, lists) = graph.dense_lists();
    ftlog::debug!(
        "Computing shortest paths in parallel with {algorithm:?} over {} nodes and {} edges.",
        ids.len(),
        graph.num_edges()
    );

    let dense = match algorithm {
        ShortestPathAlgorithm::Dijkstra => dijkstra::par_all_pairs(&lists),
        ShortestPathAlgorithm::FloydWarshall => floyd_warshall::par_all_pairs(&lists),
    };
    Ok(DistanceMatrix::from_dense(&ids, dense))
}
