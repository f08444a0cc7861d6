//! Tests for building neighborhood graphs.

use geodesic_mbed::{
    neighborhood::{build_graph_with, par_build_graph},
    build_graph, DistanceMatrix, EdgeDirection, IsomapError, NeighborhoodRule, Result,
};
use test_case::test_case;

mod common;

#[test]
fn epsilon_star() -> Result<()> {
    let graph = build_graph(&common::star()?, NeighborhoodRule::Epsilon { radius: 4.0 })?;
    let expected = common::matrix(&[(0, &[(3, 4.0)]), (1, &[(3, 1.0)]), (2, &[(3, 2.0)])])?;
    assert_eq!(graph.adjacency(), expected.rows());
    assert_eq!(graph.direction(), EdgeDirection::Undirected);
    assert_eq!(graph.cardinality(), 4);
    assert_eq!(graph.num_components(), 1);
    Ok(())
}

#[test]
fn k_nearest_drops_short_rows() -> Result<()> {
    let graph = build_graph(&common::sparse_square()?, NeighborhoodRule::KNearest { k: 2 })?;
    let expected = common::matrix(&[(0, &[(2, 10.0), (3, 20.0)]), (1, &[(2, 4.0), (3, 2.0)])])?;
    assert_eq!(graph.adjacency(), expected.rows());
    assert!(graph.neighbors(2).is_none());
    Ok(())
}

#[test]
fn epsilon_keeps_isolated_points() -> Result<()> {
    let points = vec![vec![0.0], vec![1.0], vec![10.0]];
    let dm = DistanceMatrix::from_points(&points)?;
    let graph = build_graph(&dm, NeighborhoodRule::Epsilon { radius: 1.0 })?;
    assert_eq!(graph.neighbors(2).map(|row| row.len()), Some(0));
    assert_eq!(graph.cardinality(), 3);
    assert_eq!(graph.num_components(), 2);
    Ok(())
}

#[test_case(1; "one")]
#[test_case(3; "three")]
#[test_case(10; "ten")]
#[test_case(29; "all")]
fn k_nearest_on_dense_matrix(k: usize) -> Result<()> {
    let points = common::swiss_roll(30, 42);
    let dm = DistanceMatrix::from_points(&points)?;
    let graph = build_graph(&dm, NeighborhoodRule::KNearest { k })?;

    assert_eq!(graph.adjacency().len(), 30);
    for (&i, row) in graph.adjacency() {
        assert_eq!(row.len(), k.min(29));
        assert!(!row.contains_key(&i));

        // Every kept neighbor is at least as close as every dropped one.
        let farthest_kept = row.values().copied().fold(0.0, f64::max);
        let dm_row = dm.row(i).into_iter().flatten();
        for (j, &d) in dm_row.filter(|(j, _)| **j != i && !row.contains_key(*j)) {
            assert!(d >= farthest_kept, "{j} at {d} was dropped before a neighbor at {farthest_kept}");
        }
    }

    assert_eq!(graph, par_build_graph(&dm, NeighborhoodRule::KNearest { k })?);
    Ok(())
}

#[test]
fn direction_is_recorded() -> Result<()> {
    let dm = common::star()?;
    let graph = build_graph_with(&dm, NeighborhoodRule::Epsilon { radius: 4.0 }, EdgeDirection::Directed)?;
    assert_eq!(graph.direction(), EdgeDirection::Directed);
    assert_eq!(graph.num_edges(), 3);
    Ok(())
}

#[test_case(NeighborhoodRule::KNearest { k: 0 }; "k zero")]
#[test_case(NeighborhoodRule::KNearest { k: 4 }; "k too large")]
#[test_case(NeighborhoodRule::Epsilon { radius: 0.0 }; "zero radius")]
#[test_case(NeighborhoodRule::Epsilon { radius: -2.0 }; "negative radius")]
fn invalid_parameters(rule: NeighborhoodRule) -> Result<()> {
    let dm = common::sparse_square()?;
    assert!(matches!(build_graph(&dm, rule), Err(IsomapError::InvalidParameter(_))));
    assert!(matches!(par_build_graph(&dm, rule), Err(IsomapError::InvalidParameter(_))));
    Ok(())
}
