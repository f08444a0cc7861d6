#![doc = include_str!("../README.md")]

mod core;
pub mod datasets;
pub mod geodesic;
pub mod isomap;
pub mod mds;
pub mod neighborhood;
pub mod stress;
mod utils;

pub use self::core::{DistanceMatrix, EdgeDirection, Graph, IsomapError, Result, Row};
pub use geodesic::{par_shortest_paths, shortest_paths, ShortestPathAlgorithm};
pub use isomap::{Isomap, IsomapConfig, Stage};
pub use mds::{embed, Embedding};
pub use neighborhood::{build_graph, par_build_graph, NeighborhoodRule};
pub use stress::{kruskal, stress};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
