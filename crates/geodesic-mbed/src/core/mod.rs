//! The data model shared by every stage: distance matrices, graphs and
//! errors.

mod error;
mod graph;
mod matrix;

pub use error::{IsomapError, Result};
pub use graph::{EdgeDirection, Graph};
pub use matrix::{DistanceMatrix, Row};
