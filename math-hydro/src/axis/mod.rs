//! Axis editing: deletion, gap filling, sorting and DOF/body swaps
//!
//! Every operation applies the same index plan to every loaded tensor that
//! shares the edited axis, so that tensors stay index-aligned.
//! Out-of-range indices are a caller error and panic.

pub mod delete;
pub mod fill;
pub mod swap;

use crate::types::NDOF;
use ndarray::{Array, Axis, RemoveAxis, Zip};
use num_traits::Zero;
use std::ops::{Add, Mul};

/// One sample of an edited axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Existing sample at this index
    Keep(usize),
    /// New sample at fraction `t` between two existing ones
    Between {
        /// Lower neighbour
        lo: usize,
        /// Upper neighbour
        hi: usize,
        /// Position in `(0, 1)`
        t: f64,
    },
}

/// Indices surviving the removal of `remove` from `0..n`
pub(crate) fn keep_indices(n: usize, remove: &[usize], what: &str) -> Vec<usize> {
    for &i in remove {
        assert!(i < n, "{what} index {i} out of range (len {n})");
    }
    (0..n).filter(|i| !remove.contains(i)).collect()
}

/// Flattened `6Nb` indices of the kept bodies
pub(crate) fn dof_indices(bodies: &[usize]) -> Vec<usize> {
    bodies
        .iter()
        .flat_map(|&ib| (ib * NDOF)..((ib + 1) * NDOF))
        .collect()
}

/// Re-index `t` along `axis`
pub(crate) fn select_in_place<A: Clone, D: RemoveAxis>(
    t: &mut Option<Array<A, D>>,
    axis: Axis,
    indices: &[usize],
) {
    if let Some(arr) = t {
        *arr = arr.select(axis, indices);
    }
}

/// Re-index both of the first two axes (the `6Nb×6Nb` blocks) of `t`
pub(crate) fn select_square<A: Clone, D: RemoveAxis>(t: &mut Option<Array<A, D>>, indices: &[usize]) {
    if let Some(arr) = t {
        *arr = arr.select(Axis(0), indices).select(Axis(1), indices);
    }
}

/// Insertion plan filling gaps wider than `max_step` on an ascending axis
///
/// A gap `g > max_step` receives `ceil(g / max_step) − 1` evenly spaced samples.
pub fn gap_plan(sorted: &[f64], max_step: f64) -> Vec<Sample> {
    let mut plan = Vec::with_capacity(sorted.len());
    if sorted.is_empty() {
        return plan;
    }
    plan.push(Sample::Keep(0));
    for i in 1..sorted.len() {
        let gap = sorted[i] - sorted[i - 1];
        if max_step > 0.0 && gap > max_step * (1.0 + 1e-9) {
            let parts = (gap / max_step - 1e-6).ceil() as usize;
            for p in 1..parts {
                plan.push(Sample::Between {
                    lo: i - 1,
                    hi: i,
                    t: p as f64 / parts as f64,
                });
            }
        }
        plan.push(Sample::Keep(i));
    }
    plan
}

/// Axis values after applying `plan`
pub fn apply_plan_to_axis(axis: &[f64], plan: &[Sample]) -> Vec<f64> {
    plan.iter()
        .map(|s| match *s {
            Sample::Keep(i) => axis[i],
            Sample::Between { lo, hi, t } => axis[lo] + (axis[hi] - axis[lo]) * t,
        })
        .collect()
}

/// Smallest positive spacing of an ascending axis
pub fn min_positive_step(sorted: &[f64]) -> Option<f64> {
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&d| d > 0.0)
        .min_by(f64::total_cmp)
}

fn blend<T>(a: Option<T>, b: Option<T>, t: f64, zero: bool) -> Option<T>
where
    T: Copy + Zero + Add<Output = T> + Mul<f64, Output = T>,
{
    match (a, b) {
        (None, None) => None,
        _ if zero => Some(T::zero()),
        (Some(x), Some(y)) => Some(x * (1.0 - t) + y * t),
        _ => None,
    }
}

/// Rebuild `arr` along `axis` following `plan`
///
/// New samples are linear blends of their neighbours, or zero when `zero` is set.
/// A new sample between two missing values stays missing.
pub(crate) fn resample<T, D>(
    arr: &Array<Option<T>, D>,
    axis: Axis,
    plan: &[Sample],
    zero: bool,
) -> Array<Option<T>, D>
where
    T: Copy + Zero + Add<Output = T> + Mul<f64, Output = T>,
    D: RemoveAxis,
{
    let mut dim = arr.raw_dim();
    dim[axis.index()] = plan.len();
    let mut out = Array::from_elem(dim, None);
    for (k, s) in plan.iter().enumerate() {
        let dst = out.index_axis_mut(axis, k);
        match *s {
            Sample::Keep(i) => {
                let mut dst = dst;
                dst.assign(&arr.index_axis(axis, i));
            }
            Sample::Between { lo, hi, t } => {
                Zip::from(dst)
                    .and(arr.index_axis(axis, lo))
                    .and(arr.index_axis(axis, hi))
                    .for_each(|o, &a, &b| *o = blend(a, b, t, zero));
            }
        }
    }
    out
}

pub(crate) fn resample_in_place<T, D>(
    t: &mut Option<Array<Option<T>, D>>,
    axis: Axis,
    plan: &[Sample],
    zero: bool,
) where
    T: Copy + Zero + Add<Output = T> + Mul<f64, Output = T>,
    D: RemoveAxis,
{
    if let Some(arr) = t {
        *arr = resample(arr, axis, plan, zero);
    }
}
