//! LU decomposition with partial pivoting
//!
//! The systems solved here are small (6×6 per body, `6Nb×6Nb` at most), so a
//! straightforward pure-Rust factorization is used. Singularity is judged
//! relative to the largest entry of the input matrix.
//!
//! With the `ndarray-linalg` feature, [`lu_solve`] goes through LAPACK
//! instead and only an exactly singular matrix is rejected.

use crate::error::LinalgError;
use crate::traits::ComplexField;
use ndarray::{Array1, Array2};

/// Pivots smaller than this fraction of the largest matrix entry are treated as zero.
pub const SINGULAR_RELATIVE_TOLERANCE: f64 = 1e-13;

/// LU factorization result
///
/// Stores L and U factors along with pivot information
#[derive(Debug, Clone)]
pub struct LuFactorization<T: ComplexField> {
    /// Combined L and U matrices (L is unit lower triangular, stored below diagonal)
    pub lu: Array2<T>,
    /// Row permutation applied during pivoting
    pub pivots: Vec<usize>,
    /// Matrix dimension
    pub n: usize,
}

impl<T: ComplexField> LuFactorization<T> {
    /// Solve Ax = b using the pre-computed factorization
    pub fn solve(&self, b: &Array1<T>) -> Result<Array1<T>, LinalgError> {
        if b.len() != self.n {
            return Err(LinalgError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }

        let mut x = Array1::from_iter(self.pivots.iter().map(|&p| b[p]));

        // Ly = Pb
        for i in 0..self.n {
            for j in 0..i {
                let l_ij = self.lu[[i, j]];
                let x_j = x[j];
                x[i] -= l_ij * x_j;
            }
        }

        // Ux = y
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                let u_ij = self.lu[[i, j]];
                let x_j = x[j];
                x[i] -= u_ij * x_j;
            }
            x[i] *= self.lu[[i, i]].inv();
        }

        Ok(x)
    }

    /// Inverse of the factorized matrix, column by column
    pub fn inverse(&self) -> Result<Array2<T>, LinalgError> {
        let mut inv = Array2::zeros((self.n, self.n));
        let mut e = Array1::zeros(self.n);
        for col in 0..self.n {
            e.fill(T::zero());
            e[col] = T::one();
            let x = self.solve(&e)?;
            inv.column_mut(col).assign(&x);
        }
        Ok(inv)
    }

    /// Determinant from the diagonal of U and the permutation parity
    pub fn determinant(&self) -> T {
        let mut det = T::one();
        for i in 0..self.n {
            det *= self.lu[[i, i]];
        }
        if permutation_is_odd(&self.pivots) {
            -det
        } else {
            det
        }
    }
}

fn permutation_is_odd(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    let mut transpositions = 0;
    for start in 0..perm.len() {
        if seen[start] {
            continue;
        }
        let mut len = 0;
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            i = perm[i];
            len += 1;
        }
        transpositions += len - 1;
    }
    transpositions % 2 == 1
}

/// Compute the LU factorization with partial pivoting
pub fn lu_factorize<T: ComplexField>(a: &Array2<T>) -> Result<LuFactorization<T>, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.norm()));
    let tol = if scale > 0.0 {
        scale * SINGULAR_RELATIVE_TOLERANCE
    } else {
        f64::MIN_POSITIVE
    };

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let mut max_val = lu[[k, k]].norm();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = lu[[i, k]].norm();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < tol || !max_val.is_finite() {
            return Err(LinalgError::SingularMatrix {
                column: k,
                pivot: max_val,
            });
        }

        if max_row != k {
            for j in 0..n {
                lu.swap([k, j], [max_row, j]);
            }
            pivots.swap(k, max_row);
        }

        let pivot_inv = lu[[k, k]].inv();
        for i in (k + 1)..n {
            let mult = lu[[i, k]] * pivot_inv;
            lu[[i, k]] = mult;
            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, pivots, n })
}

/// Solve Ax = b using LU decomposition
pub fn lu_solve<T: ComplexField>(a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>, LinalgError> {
    #[cfg(feature = "ndarray-linalg")]
    {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: a.ncols(),
            });
        }
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }
        // LAPACK does not report the failing pivot
        T::lapack_solve(a, b).ok_or(LinalgError::SingularMatrix {
            column: 0,
            pivot: 0.0,
        })
    }

    #[cfg(not(feature = "ndarray-linalg"))]
    {
        lu_factorize(a)?.solve(b)
    }
}

/// Invert a square matrix
pub fn lu_inverse<T: ComplexField>(a: &Array2<T>) -> Result<Array2<T>, LinalgError> {
    lu_factorize(a)?.inverse()
}
