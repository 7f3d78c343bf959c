//! Rigid-body kinematics on coefficient tensors
//!
//! With `R = skew(δ)` for the translation `δ = to − c0`, a 6×6 block split in
//! 3×3 partitions transforms as
//!
//! ```text
//! Q11' = Q11
//! Q12' = Q12 + Q11·R_j
//! Q21' = Q21 − R_i·Q11
//! Q22' = Q22 − R_i·Q12 + Q21·R_j − R_i·Q11·R_j
//! ```
//!
//! where `R_i` belongs to the row body and `R_j` to the column body.

pub mod symmetrize;
pub mod translate;

use crate::types::{NDOF, Point3D};
use ndarray::{Array2, s};
use std::ops::{Add, Mul, Sub};

/// Values in a 6×6 block
pub(crate) const BLOCK_VALUES: usize = NDOF * NDOF;

/// Presence of a group of values that must be transformed together
#[derive(Debug, PartialEq)]
pub(crate) enum Block<T> {
    /// Nothing present
    Missing,
    /// Everything present (or forced), row-major
    Full(Vec<T>),
    /// Only this many values present
    Partial(usize),
}

/// Classify a group; with `force` missing values become `T::default()`
pub(crate) fn classify<T: Copy + Default>(
    values: impl Iterator<Item = Option<T>>,
    force: bool,
) -> Block<T> {
    let values: Vec<Option<T>> = values.collect();
    let present = values.iter().filter(|v| v.is_some()).count();
    if present == 0 {
        Block::Missing
    } else if present == values.len() || force {
        Block::Full(values.into_iter().map(Option::unwrap_or_default).collect())
    } else {
        Block::Partial(present)
    }
}

/// Rigid block transform of a 6×6 matrix
///
/// `ri` is the skew matrix of the row body's shift and `rj` that of the column
/// body. For a cross-body block each side moves with its own body, so the
/// block differs from applying the row body's shift on both sides.
pub fn transform_block(q: &Array2<f64>, ri: &Array2<f64>, rj: &Array2<f64>) -> Array2<f64> {
    let q11 = q.slice(s![..3, ..3]);
    let q12 = q.slice(s![..3, 3..]);
    let q21 = q.slice(s![3.., ..3]);
    let q22 = q.slice(s![3.., 3..]);

    let ri_q11 = ri.dot(&q11);
    let q12n = &q12 + &q11.dot(rj);
    let q21n = &q21 - &ri_q11;
    let q22n = &q22 - &ri.dot(&q12) + &q21.dot(rj) - &ri_q11.dot(rj);

    let mut out = q.to_owned();
    out.slice_mut(s![..3, 3..]).assign(&q12n);
    out.slice_mut(s![3.., ..3]).assign(&q21n);
    out.slice_mut(s![3.., 3..]).assign(&q22n);
    out
}

/// `M' = M − δ×F` on a `[F, M]` 6-vector
pub(crate) fn shift_moment<T>(v: &mut [T], d: Point3D)
where
    T: Copy + Mul<f64, Output = T> + Sub<Output = T> + Add<Output = T>,
{
    let (fx, fy, fz) = (v[0], v[1], v[2]);
    v[3] = v[3] - (fz * d.y - fy * d.z);
    v[4] = v[4] - (fx * d.z - fz * d.x);
    v[5] = v[5] - (fy * d.x - fx * d.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify() {
        let full = [Some(1.0), Some(2.0)];
        assert_eq!(classify(full.into_iter(), false), Block::Full(vec![1.0, 2.0]));
        let partial = [Some(1.0), None];
        assert_eq!(classify(partial.into_iter(), false), Block::Partial(1));
        assert_eq!(classify(partial.into_iter(), true), Block::Full(vec![1.0, 0.0]));
        let none: [Option<f64>; 2] = [None, None];
        assert_eq!(classify(none.into_iter(), true), Block::Missing);
    }

    #[test]
    fn test_transform_block_round_trip() {
        let q = Array2::from_shape_fn((6, 6), |(i, j)| (i * 6 + j) as f64 * 0.1 + if i == j { 5.0 } else { 0.0 });
        let d = Point3D::new(1.0, -2.0, 0.5);
        let r = d.skew();
        let back = transform_block(&transform_block(&q, &r, &r), &(-r.clone()), &(-r));
        for (x, y) in back.iter().zip(q.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shift_moment() {
        let mut v = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        shift_moment(&mut v, Point3D::new(3.0, 0.0, 0.0));
        // δ×F = (3,0,0)×(0,1,0) = (0,0,3)
        assert_eq!(v[5], -3.0);
        assert_eq!(v[3], 0.0);
    }
}
