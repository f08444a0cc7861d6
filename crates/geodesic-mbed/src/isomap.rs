//! Isomap: neighborhood graph, geodesic distances, classical MDS and stress.

use std::borrow::Cow;

use distances::Number;
use serde::{Deserialize, Serialize};

use crate::{
    geodesic, mds, neighborhood, stress, DistanceMatrix, EdgeDirection, Embedding, NeighborhoodRule, Result,
    ShortestPathAlgorithm,
};

/// The last completed stage of an `Isomap` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing has been computed yet.
    Built,
    /// The neighborhood graph was built.
    NeighborsComputed,
    /// The geodesic distances were computed.
    GeodesicComputed,
    /// The geodesic distances were embedded.
    Embedded,
}

/// The parameters of an `Isomap` run.
///
/// Missing fields take their default values when deserializing, e.g.
/// `{"dimension": 2}` keeps the default neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsomapConfig {
    /// How the neighbors of each point are selected.
    pub neighborhood: NeighborhoodRule,
    /// The target dimension of the embedding.
    pub dimension: usize,
    /// The all-pairs shortest-path algorithm.
    pub algorithm: ShortestPathAlgorithm,
    /// Whether the neighborhood edges may be traversed both ways.
    pub direction: EdgeDirection,
    /// Whether to use the `par_*` variants of each stage.
    pub parallel: bool,
}

impl Default for IsomapConfig {
    fn default() -> Self {
        Self {
            neighborhood: NeighborhoodRule::KNearest { k: 4 },
            dimension: 3,
            algorithm: ShortestPathAlgorithm::default(),
            direction: EdgeDirection::default(),
            parallel: false,
        }
    }
}

impl IsomapConfig {
    /// Sets the neighborhood rule.
    #[must_use]
    pub const fn with_neighborhood(mut self, neighborhood: NeighborhoodRule) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Sets the target dimension.
    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the shortest-path algorithm.
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: ShortestPathAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the edge direction of the neighborhood graph.
    #[must_use]
    pub const fn with_direction(mut self, direction: EdgeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets whether the stages run in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Runs the Isomap pipeline over a `DistanceMatrix`.
///
/// The input matrix is never modified. Each call to [`Isomap::run`] starts
/// over from [`Stage::Built`] and nothing computed by a previous run is
/// reused.
#[derive(Debug, Clone)]
pub struct Isomap<'a> {
    /// The input distances.
    distances: Cow<'a, DistanceMatrix>,
    /// The parameters of every run.
    config: IsomapConfig,
    /// The last completed stage.
    stage: Stage,
    /// The geodesic distances of the last run that computed them.
    geodesic: Option<DistanceMatrix>,
}

impl<'a> Isomap<'a> {
    /// Creates a new `Isomap` over borrowed distances.
    #[must_use]
    pub const fn new(distances: &'a DistanceMatrix, config: IsomapConfig) -> Self {
        Self {
            distances: Cow::Borrowed(distances),
            config,
            stage: Stage::Built,
            geodesic: None,
        }
    }

    /// Creates a new `Isomap` over the Euclidean distances between the given
    /// points.
    ///
    /// # Errors
    ///
    /// See [`DistanceMatrix::from_points`].
    pub fn from_points<I: AsRef<[T]> + Send + Sync, T: Number>(
        points: &[I],
        config: IsomapConfig,
    ) -> Result<Isomap<'static>> {
        let distances = if config.parallel {
            DistanceMatrix::par_from_points(points)?
        } else {
            DistanceMatrix::from_points(points)?
        };
        Ok(Isomap {
            distances: Cow::Owned(distances),
            config,
            stage: Stage::Built,
            geodesic: None,
        })
    }

    /// Returns the last completed stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn config(&self) -> &IsomapConfig {
        &self.config
    }

    /// Returns the input distances.
    #[must_use]
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns the geodesic distances of the last run, if it got that far.
    #[must_use]
    pub const fn geodesic_distances(&self) -> Option<&DistanceMatrix> {
        self.geodesic.as_ref()
    }

    /// Runs every stage in order and returns the embedding along with its
    /// Kruskal stress against the geodesic distances.
    ///
    /// On failure, `stage` is left at the last completed stage and the error
    /// of the failing stage is returned.
    ///
    /// # Errors
    ///
    /// - See [`neighborhood::build_graph_with`].
    /// - See [`geodesic::shortest_paths`].
    /// - See [`mds::embed`].
    /// - See [`stress::kruskal`].
    pub fn run(&mut self) -> Result<(Embedding, f64)> {
        self.stage = Stage::Built;
        self.geodesic = None;
        let IsomapConfig {
            neighborhood,
            dimension,
            algorithm,
            direction,
            parallel,
        } = self.config;
        ftlog::info!("Starting Isomap on {} points with {:?}.", self.distances.cardinality(), self.config);

        let graph = if parallel {
            neighborhood::par_build_graph_with(&self.distances, neighborhood, direction)?
        } else {
            neighborhood::build_graph_with(&self.distances, neighborhood, direction)?
        };
        self.stage = Stage::NeighborsComputed;
        ftlog::info!("Built the neighborhood graph with {} edges.", graph.num_edges());
        ftlog::debug!("The neighborhood graph has {} components.", graph.num_components());

        let geodesic = if parallel {
            geodesic::par_shortest_paths(&graph, algorithm)?
        } else {
            geodesic::shortest_paths(&graph, algorithm)?
        };
        let geodesic = self.geodesic.insert(geodesic);
        self.stage = Stage::GeodesicComputed;
        ftlog::info!("Computed geodesic distances with {algorithm:?}.");

        let embedding = mds::embed(geodesic, dimension)?;
        self.stage = Stage::Embedded;
        ftlog::info!("Embedded {} points in {dimension} dimensions.", embedding.cardinality());

        let realized = if parallel {
            embedding.par_distance_matrix()
        } else {
            embedding.distance_matrix()
        };
        let value = stress::kruskal(geodesic, &realized)?;
        ftlog::info!("Finished Isomap with stress {value:.6e}.");

        Ok((embedding, value))
    }
}
