//! Scalar abstraction shared by the dense kernels
//!
//! [`ComplexField`] lets the LU routines run unchanged on real stiffness/mass
//! matrices and on complex impedance matrices.

#[cfg(feature = "ndarray-linalg")]
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use num_traits::{NumAssign, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Scalar type usable by the dense solvers.
///
/// Provided for `f64` (hydrostatics, regression) and `Complex64` (impedance).
pub trait ComplexField:
    NumAssign + Clone + Copy + Send + Sync + Debug + Zero + One + Neg<Output = Self> + 'static
{
    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> f64;

    /// Magnitude |z|
    fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Create from a real value
    fn from_real(r: f64) -> Self;

    /// Real part
    fn re(&self) -> f64;

    /// Imaginary part
    fn im(&self) -> f64;

    /// Multiplicative inverse (1/z)
    fn inv(&self) -> Self;

    /// Dense solve through LAPACK, `None` when the factorization fails
    #[cfg(feature = "ndarray-linalg")]
    fn lapack_solve(a: &Array2<Self>, b: &Array1<Self>) -> Option<Array1<Self>>;
}

impl ComplexField for Complex64 {
    #[inline]
    fn conj(&self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }

    #[inline]
    fn re(&self) -> f64 {
        self.re
    }

    #[inline]
    fn im(&self) -> f64 {
        self.im
    }

    #[inline]
    fn inv(&self) -> Self {
        let denom = self.norm_sqr();
        Complex64::new(self.re / denom, -self.im / denom)
    }

    #[cfg(feature = "ndarray-linalg")]
    fn lapack_solve(a: &Array2<Self>, b: &Array1<Self>) -> Option<Array1<Self>> {
        use ndarray_linalg::Solve;
        a.solve(b).ok()
    }
}

impl ComplexField for f64 {
    #[inline]
    fn conj(&self) -> Self {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self * self
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn re(&self) -> f64 {
        *self
    }

    #[inline]
    fn im(&self) -> f64 {
        0.0
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / self
    }

    #[cfg(feature = "ndarray-linalg")]
    fn lapack_solve(a: &Array2<Self>, b: &Array1<Self>) -> Option<Array1<Self>> {
        use ndarray_linalg::Solve;
        a.solve(b).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_complex_inv() {
        let z = Complex64::new(3.0, 4.0);
        let p = z * ComplexField::inv(&z);
        assert_relative_eq!(p.re, 1.0, epsilon = 1e-14);
        assert_relative_eq!(p.im, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_real_norm() {
        assert_relative_eq!(ComplexField::norm(&-2.5_f64), 2.5);
        assert_relative_eq!(ComplexField::norm(&Complex64::new(3.0, 4.0)), 5.0);
    }
}
