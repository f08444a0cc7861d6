//! A `Graph` is a map from each node to a map from each neighbor to the
//! weight of the edge between them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{DistanceMatrix, IsomapError, Result, Row};

/// Whether the edges of a `Graph` may be traversed in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// Every listed edge `i -> j` also connects `j -> i`. When both
    /// directions are listed, the smaller weight is used for both.
    #[default]
    Undirected,
    /// An edge `i -> j` may only be traversed from `i` to `j`.
    Directed,
}

/// A weighted graph, e.g. the neighborhood graph of a `DistanceMatrix`.
///
/// The `Graph` is not mutated after construction. Its node set is the union
/// of the row keys and every neighbor mentioned in any row.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    /// The neighbors of each node and the weights of the edges to them.
    adjacency: BTreeMap<usize, Row>,
    /// How the edges may be traversed.
    direction: EdgeDirection,
}

impl From<&DistanceMatrix> for Graph {
    fn from(matrix: &DistanceMatrix) -> Self {
        Self::new(matrix.rows().clone())
    }
}

impl Graph {
    /// Creates a new undirected `Graph` from its adjacency map.
    ///
    /// Edge weights are only checked by the shortest-path solvers.
    #[must_use]
    pub const fn new(adjacency: BTreeMap<usize, Row>) -> Self {
        Self {
            adjacency,
            direction: EdgeDirection::Undirected,
        }
    }

    /// Sets how the edges may be traversed.
    #[must_use]
    pub const fn with_direction(mut self, direction: EdgeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns how the edges may be traversed.
    #[must_use]
    pub const fn direction(&self) -> EdgeDirection {
        self.direction
    }

    /// Returns the adjacency map.
    #[must_use]
    pub const fn adjacency(&self) -> &BTreeMap<usize, Row> {
        &self.adjacency
    }

    /// Returns the listed neighbors of a node.
    #[must_use]
    pub fn neighbors(&self, i: usize) -> Option<&Row> {
        self.adjacency.get(&i)
    }

    /// Returns the node set in ascending order.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<usize> {
        self.adjacency
            .iter()
            .flat_map(|(&i, row)| core::iter::once(i).chain(row.keys().copied()))
            .collect()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the number of listed edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Iterates over the listed `(i, j, weight)` edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&i, row)| row.iter().map(move |(&j, &w)| (i, j, w)))
    }

    /// Returns the number of connected components, ignoring the direction of
    /// the edges.
    #[must_use]
    pub fn num_components(&self) -> usize {
        let (ids, lists) = self.dense_lists_as(EdgeDirection::Undirected);

        let mut visited = vec![false; ids.len()];
        let mut components = 0;
        for start in 0..ids.len() {
            if visited[start] {
                continue;
            }
            components += 1;

            let mut stack = vec![start];
            while let Some(u) = stack.pop() {
                if visited[u] {
                    continue;
                }
                visited[u] = true;
                stack.extend(lists[u].iter().map(|&(v, _)| v).filter(|&v| !visited[v]));
            }
        }
        components
    }

    /// Checks that every edge weight is non-negative and not NaN.
    ///
    /// # Errors
    ///
    /// If any weight is negative or NaN.
    pub(crate) fn validate_weights(&self) -> Result<()> {
        match self.edges().find(|&(_, _, w)| w.is_nan() || w < 0.0) {
            Some((i, j, w)) => Err(IsomapError::graph(format!(
                "Edge weights must be non-negative, but the edge from {i} to {j} has weight {w}."
            ))),
            None => Ok(()),
        }
    }

    /// Maps the nodes to dense positions in ascending order and returns the
    /// node indices along with the traversable out-edges of every position.
    ///
    /// Self-loops are dropped. Parallel edges keep the smaller weight.
    pub(crate) fn dense_lists(&self) -> (Vec<usize>, Vec<Vec<(usize, f64)>>) {
        self.dense_lists_as(self.direction)
    }

    /// Helper for `dense_lists` that traverses the edges as `direction`.
    fn dense_lists_as(&self, direction: EdgeDirection) -> (Vec<usize>, Vec<Vec<(usize, f64)>>) {
        let ids = self.nodes().into_iter().collect::<Vec<_>>();
        let position = ids.iter().enumerate().map(|(p, &i)| (i, p)).collect::<BTreeMap<_, _>>();

        let mut out = vec![BTreeMap::<usize, f64>::new(); ids.len()];
        let mut add = |u: usize, v: usize, w: f64| {
            out[u].entry(v).and_modify(|x| *x = x.min(w)).or_insert(w);
        };
        for (i, j, w) in self.edges().filter(|&(i, j, _)| i != j) {
            let (u, v) = (position[&i], position[&j]);
            add(u, v, w);
            if direction == EdgeDirection::Undirected {
                add(v, u, w);
            }
        }

        let lists = out.into_iter().map(|row| row.into_iter().collect()).collect();
        (ids, lists)
    }
}
