//! Regularized least squares

use crate::error::{LinalgError, Result};
use crate::lu::lu_factorize;
use ndarray::{Array1, Array2};

/// Ridge regression `C = F·Xᵗ·(X·Xᵗ + λI)⁻¹`
///
/// `f` holds one response column per sample (r×N) and `x` one regressor column
/// per sample (k×N). The result maps regressors to responses (r×k).
pub fn ridge_regression(f: &Array2<f64>, x: &Array2<f64>, lambda: f64) -> Result<Array2<f64>> {
    if f.ncols() != x.ncols() {
        return Err(LinalgError::DimensionMismatch {
            expected: x.ncols(),
            got: f.ncols(),
        });
    }
    let k = x.nrows();
    let mut gram = x.dot(&x.t());
    for i in 0..k {
        gram[[i, i]] += lambda;
    }
    let rhs = f.dot(&x.t());

    // gram is symmetric, so each row of C solves gram·cᵗ = rhs_rowᵗ
    let lu = lu_factorize(&gram)?;
    let mut c = Array2::zeros((f.nrows(), k));
    for (i, row) in rhs.outer_iter().enumerate() {
        let sol: Array1<f64> = lu.solve(&row.to_owned())?;
        c.row_mut(i).assign(&sol);
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_recovers_linear_map_with_small_lambda() {
        let c_true = array![[10.0, 1.0], [0.0, 5.0]];
        let x = array![[1.0, 0.0, 2.0, -1.0], [0.0, 1.0, 1.0, 3.0]];
        let f = c_true.dot(&x);
        let c = ridge_regression(&f, &x, 1e-9).expect("regression should succeed");
        for (a, b) in c.iter().zip(c_true.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_lambda_regularizes_rank_deficient_samples() {
        let x = array![[1.0, 2.0], [0.0, 0.0]];
        let f = array![[3.0, 6.0]];
        let c = ridge_regression(&f, &x, 0.1).expect("regularized system is invertible");
        assert_relative_eq!(c[[0, 0]], 15.0 / 5.1, epsilon = 1e-12);
        assert_relative_eq!(c[[0, 1]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let x = Array2::<f64>::zeros((2, 3));
        let f = Array2::<f64>::zeros((2, 4));
        assert!(ridge_regression(&f, &x, 0.1).is_err());
    }
}
