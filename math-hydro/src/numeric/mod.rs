//! Quadrature, interpolation and missing-value helpers
//!
//! - `quadrature`: Simpson's rule on irregular grids
//! - `interp`: linear interpolation and dense uniform resampling
//!
//! Missing values are `Option`s. The helpers here never turn `None` into zero;
//! call sites that want zero write `unwrap_or(0.0)` explicitly.

pub mod interp;
pub mod quadrature;

pub use interp::{interp_linear, lerp, linspace, resample_uniform};
pub use quadrature::simpson;

use std::ops::{Add, Mul};

/// Mean of two optional values, ignoring a missing one
///
/// Both present gives the average, one present gives that value, none gives `None`.
pub fn avg_safe<T>(a: Option<T>, b: Option<T>) -> Option<T>
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    match (a, b) {
        (Some(x), Some(y)) => Some((x + y) * 0.5),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Mean of the present values, `None` when all are missing or non-finite
pub fn mean_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean of the positive spacings of a sorted axis
pub fn mean_positive_step(sorted: &[f64]) -> Option<f64> {
    let steps: Vec<f64> = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&d| d > 0.0)
        .collect();
    (!steps.is_empty()).then(|| steps.iter().sum::<f64>() / steps.len() as f64)
}

/// Permutation that sorts `values` ascending (stable)
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    idx
}
