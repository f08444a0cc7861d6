//! Synthetic manifolds for use in benchmarks and tests.

use core::f64::consts::PI;

use distances::Number;
use rand::prelude::*;

/// Samples points from the swiss roll, a rolled-up rectangle in 3-D.
///
/// Each point is `(t cos t, h, t sin t)` with `t` uniform in
/// `[1.5 pi, 4.5 pi]` and `h` uniform in `[0, 21]`. Each coordinate is then
/// offset by uniform noise in `[-noise, noise]`.
///
/// # Arguments:
///
/// * `cardinality`: number of points to generate.
/// * `noise`: the largest offset of each coordinate.
/// * `rng`: random number generator.
///
/// # Returns
///
/// The points and the position `t` of each point along the roll.
#[must_use]
pub fn swiss_roll<R: Rng>(cardinality: usize, noise: f64, rng: &mut R) -> (Vec<Vec<f64>>, Vec<f64>) {
    (0..cardinality)
        .map(|_| {
            let t = 1.5 * PI * 2.0_f64.mul_add(rng.random::<f64>(), 1.0);
            let h = 21.0 * rng.random::<f64>();
            let point = [t * t.cos(), h, t * t.sin()]
                .into_iter()
                .map(|x| noise.mul_add(2.0_f64.mul_add(rng.random::<f64>(), -1.0), x))
                .collect::<Vec<_>>();
            (point, t)
        })
        .unzip()
}

/// A `side` by `side` square grid of points with unit spacing in the plane.
#[must_use]
pub fn grid(side: usize) -> Vec<Vec<f64>> {
    (0..side)
        .flat_map(|r| (0..side).map(move |c| vec![r.as_f64(), c.as_f64()]))
        .collect()
}

/// Points evenly spaced along a circular arc of the given `radius` that
/// sweeps `sweep` radians, starting at `(radius, 0)`.
#[must_use]
pub fn arc(cardinality: usize, radius: f64, sweep: f64) -> Vec<Vec<f64>> {
    let steps = cardinality.saturating_sub(1).max(1).as_f64();
    (0..cardinality)
        .map(|i| {
            let angle = sweep * i.as_f64() / steps;
            vec![radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn swiss_roll_is_seeded() {
        let (a, ts) = swiss_roll(50, 0.0, &mut StdRng::seed_from_u64(42));
        let (b, _) = swiss_roll(50, 0.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(ts.len(), 50);

        for (p, &t) in a.iter().zip(&ts) {
            assert!((1.5 * PI..=4.5 * PI).contains(&t));
            assert!(approx_eq!(f64, p[0].hypot(p[2]), t, epsilon = 1e-9));
            assert!((0.0..=21.0).contains(&p[1]));
        }
    }

    #[test]
    fn grid_and_arc() {
        let g = grid(3);
        assert_eq!(g.len(), 9);
        assert_eq!(g[5], vec![1.0, 2.0]);

        let a = arc(3, 2.0, PI);
        assert!(approx_eq!(f64, a[1][0], 0.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, a[1][1], 2.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, a[2][0], -2.0, epsilon = 1e-12));
    }
}
