//! Utility functions for the crate.

use core::cmp::Ordering;

/// A wrapper struct for implementing `Ord` on a `PartialOrd` so that a
/// `BinaryHeap` of `MinItem`s pops the smallest item first. Incomparable items
/// are treated as greater than any other item. The additional type parameter
/// `A` is used to store auxiliary data alongside the item and is ignored for
/// ordering purposes.
pub struct MinItem<A, T: PartialOrd>(pub A, pub T);

impl<A, T: PartialOrd> PartialEq for MinItem<A, T> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<A, T: PartialOrd> Eq for MinItem<A, T> {}

impl<A, T: PartialOrd> PartialOrd for MinItem<A, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A, T: PartialOrd> Ord for MinItem<A, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.1.partial_cmp(&self.1).unwrap_or(Ordering::Less)
    }
}

/// Return the index and value of the entry with the largest magnitude.
///
/// NAN values are ordered as smaller than all other values.
///
/// This will return `None` if the given slice is empty.
pub fn arg_max_magnitude(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .max_by(|&(_, l), &(_, r)| l.abs().partial_cmp(&r.abs()).unwrap_or(Ordering::Less))
        .map(|(i, v)| (i, *v))
}

/// Whether two values agree within a tolerance that is absolute near zero and
/// relative for large magnitudes.
#[allow(clippy::float_cmp)]
pub fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}
