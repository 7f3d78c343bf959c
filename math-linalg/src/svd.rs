//! Singular value decomposition of small real matrices
//!
//! One-sided Jacobi rotations applied to the columns of the input. Accurate
//! for the 6×6 mass and stiffness matrices this is used for, where the
//! number of sweeps stays small.

use crate::error::{LinalgError, Result};
use ndarray::{Array1, Array2, Axis};

const MAX_SWEEPS: usize = 60;
const ORTHOGONALITY_TOL: f64 = 1e-15;

/// Thin SVD `A = U·diag(s)·Vᵗ`
#[derive(Debug, Clone)]
pub struct Svd {
    /// Left singular vectors (m×n), zero columns for null singular values
    pub u: Array2<f64>,
    /// Singular values, non-negative, in column order of `v`
    pub s: Array1<f64>,
    /// Right singular vectors (n×n)
    pub v: Array2<f64>,
}

impl Svd {
    /// Rebuild `U·diag(f(s))·Vᵗ`
    pub fn recompose_with<F: Fn(f64) -> f64>(&self, f: F) -> Array2<f64> {
        let mut us = self.u.clone();
        for (mut col, &s) in us.axis_iter_mut(Axis(1)).zip(self.s.iter()) {
            col *= f(s);
        }
        us.dot(&self.v.t())
    }
}

/// Compute the SVD of `a` (m×n)
pub fn svd(a: &Array2<f64>) -> Result<Svd> {
    let (m, n) = a.dim();
    let mut u = a.clone();
    let mut v = Array2::<f64>::eye(n);

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let mut alpha = 0.0;
                let mut beta = 0.0;
                let mut gamma = 0.0;
                for i in 0..m {
                    alpha += u[[i, p]] * u[[i, p]];
                    beta += u[[i, q]] * u[[i, q]];
                    gamma += u[[i, p]] * u[[i, q]];
                }
                if gamma.abs() <= ORTHOGONALITY_TOL * (alpha * beta).sqrt() || gamma == 0.0 {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                for i in 0..m {
                    let up = u[[i, p]];
                    let uq = u[[i, q]];
                    u[[i, p]] = c * up - s * uq;
                    u[[i, q]] = s * up + c * uq;
                }
                for i in 0..n {
                    let vp = v[[i, p]];
                    let vq = v[[i, q]];
                    v[[i, p]] = c * vp - s * vq;
                    v[[i, q]] = s * vp + c * vq;
                }
            }
        }
        if !rotated {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(LinalgError::NoConvergence {
            method: "Jacobi SVD",
            sweeps: MAX_SWEEPS,
        });
    }

    let mut s = Array1::zeros(n);
    for j in 0..n {
        let norm = u.column(j).dot(&u.column(j)).sqrt();
        s[j] = norm;
        if norm > 0.0 {
            u.column_mut(j).mapv_inplace(|x| x / norm);
        }
    }

    Ok(Svd { u, s, v })
}

/// Matrix square root `U·diag(√s)·Vᵗ`
///
/// For symmetric positive semi-definite input this is the principal square root.
pub fn sqrt_matrix(a: &Array2<f64>) -> Result<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.nrows(),
            got: a.ncols(),
        });
    }
    Ok(svd(a)?.recompose_with(f64::sqrt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn assert_matrix_eq(a: &Array2<f64>, b: &Array2<f64>, eps: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = eps);
        }
    }

    #[test]
    fn test_svd_reconstructs_input() {
        let a = array![[2.0, -1.0, 0.5], [0.3, 4.0, 1.0], [1.0, 0.0, 3.0]];
        let dec = svd(&a).expect("svd should converge");
        let back = dec.recompose_with(|s| s);
        assert_matrix_eq(&back, &a, 1e-12);
        assert!(dec.s.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_sqrt_of_diagonal() {
        let a = array![[4.0, 0.0], [0.0, 9.0]];
        let r = sqrt_matrix(&a).expect("sqrt should succeed");
        assert_matrix_eq(&r, &array![[2.0, 0.0], [0.0, 3.0]], 1e-14);
    }

    #[test]
    fn test_sqrt_squares_back_for_spd() {
        let a = array![[5.0, 1.0, 0.0], [1.0, 4.0, 0.5], [0.0, 0.5, 3.0]];
        let r = sqrt_matrix(&a).expect("sqrt should succeed");
        assert_matrix_eq(&r.dot(&r), &a, 1e-11);
    }

    #[test]
    fn test_sqrt_of_singular_matrix() {
        let a = array![[1.0, 0.0], [0.0, 0.0]];
        let r = sqrt_matrix(&a).expect("sqrt should succeed");
        assert_matrix_eq(&r, &a, 1e-14);
    }

    #[test]
    fn test_sqrt_rejects_rectangular() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(sqrt_matrix(&a).unwrap_err().is_dimension_error());
    }
}
