//! Kruskal stress, the quality measure of an embedding.

use crate::{DistanceMatrix, Embedding, IsomapError, Result};

/// Computes Kruskal's stress between an original and a realized distance
/// matrix over the same node set:
///
/// `sqrt( sum_{i<j} (d_ij - r_ij)^2 / sum_{i<j} d_ij^2 )`
///
/// Each pair may be given in either direction. The stress is `0` for a
/// perfect realization and grows with the distortion.
///
/// # Errors
///
/// - If the two matrices have different node sets.
/// - If a pair is missing or its two directions disagree in either matrix.
/// - If a distance is infinite.
/// - If every original distance is zero.
pub fn kruskal(original: &DistanceMatrix, realized: &DistanceMatrix) -> Result<f64> {
    let nodes = original.nodes();
    if nodes != realized.nodes() {
        return Err(IsomapError::input(format!(
            "Cannot compare distances over different node sets of sizes {} and {}.",
            nodes.len(),
            realized.cardinality()
        )));
    }
    let ids = nodes.into_iter().collect::<Vec<_>>();

    let (mut residual, mut total) = (0.0, 0.0);
    for (a, &i) in ids.iter().enumerate() {
        for &j in &ids[(a + 1)..] {
            let d = original.resolve_pair(i, j)?;
            let r = realized.resolve_pair(i, j)?;
            if d.is_infinite() || r.is_infinite() {
                return Err(IsomapError::input(format!(
                    "The distance between {i} and {j} is infinite."
                )));
            }
            residual += (d - r).powi(2);
            total += d * d;
        }
    }

    if total <= 0.0 {
        return Err(IsomapError::input(
            "The stress is undefined when every original distance is zero.".to_string(),
        ));
    }

    let value = (residual / total).sqrt();
    ftlog::debug!("Kruskal stress over {} points: {value:.6e}", ids.len());
    Ok(value)
}

/// Computes Kruskal's stress of an `Embedding` against the distances it was
/// built from.
///
/// # Errors
///
/// See [`kruskal`].
pub fn stress(original: &DistanceMatrix, embedding: &Embedding) -> Result<f64> {
    kruskal(original, &embedding.distance_matrix())
}
