//! State-space realization of one radiation kernel
//!
//! A single-input single-output system `ẋ = A·x + B·u`, `y = C·x` whose
//! impulse response approximates `K_ij(t)`.

use crate::error::{HydroError, Result};
use linalg::{LinalgError, lu_solve};
use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Taylor terms used after scaling in [`StateSpace::impulse_response`]
const EXPM_TERMS: usize = 14;

/// Fitted realization of one DOF pair
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    /// State matrix, `n×n`
    pub a: Array2<f64>,
    /// Input vector, `n`
    pub b: Array1<f64>,
    /// Output vector, `n`
    pub c: Array1<f64>,
    /// Mean absolute error of the fit
    pub mae: f64,
    /// Frequencies the fit was made on (rad/s)
    pub frequencies: Vec<f64>,
    /// Frequency range of the fit (rad/s)
    pub range: (f64, f64),
}

impl StateSpace {
    /// Order of the realization
    pub fn order(&self) -> usize {
        self.b.len()
    }

    /// Fail when `a`, `b` and `c` disagree in size
    pub fn validate(&self, operation: &'static str) -> Result<()> {
        let n = self.order();
        for (what, got) in [
            ("A rows", self.a.nrows()),
            ("A columns", self.a.ncols()),
            ("C", self.c.len()),
        ] {
            if got != n {
                return Err(HydroError::DimensionMismatch {
                    operation,
                    what: format!("state space {what}"),
                    expected: n,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Transfer function `C·(iwI − A)⁻¹·B`
    pub fn frequency_response(&self, w: f64) -> std::result::Result<Complex64, LinalgError> {
        let n = self.order();
        let mut z = Array2::from_shape_fn((n, n), |(i, j)| Complex64::new(-self.a[[i, j]], 0.0));
        for i in 0..n {
            z[[i, i]] += Complex64::new(0.0, w);
        }
        let rhs = self.b.mapv(|v| Complex64::new(v, 0.0));
        let x = lu_solve(&z, &rhs)?;
        Ok(x.iter().zip(self.c.iter()).map(|(&xi, &ci)| xi * ci).sum())
    }

    /// Impulse response `C·exp(A·t)·B`
    pub fn impulse_response(&self, t: f64) -> f64 {
        let e = expm(&(&self.a * t));
        self.c.dot(&e.dot(&self.b))
    }
}

/// Matrix exponential by scaling and squaring of a truncated Taylor series
fn expm(m: &Array2<f64>) -> Array2<f64> {
    let n = m.nrows();
    let norm = m
        .rows()
        .into_iter()
        .map(|r| r.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max);
    let squarings = if norm > 0.5 {
        (norm / 0.5).log2().ceil() as i32
    } else {
        0
    };
    let scaled = m / 2f64.powi(squarings);

    let mut result = Array2::<f64>::eye(n);
    let mut term = Array2::<f64>::eye(n);
    for k in 1..=EXPM_TERMS {
        term = term.dot(&scaled) / k as f64;
        result += &term;
    }
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn first_order(alpha: f64, gain: f64) -> StateSpace {
        StateSpace {
            a: array![[-alpha]],
            b: array![1.0],
            c: array![gain],
            mae: 0.0,
            frequencies: vec![0.5, 1.0],
            range: (0.5, 1.0),
        }
    }

    #[test]
    fn test_first_order_responses() {
        let ss = first_order(2.0, 3.0);
        assert_relative_eq!(ss.impulse_response(0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(ss.impulse_response(1.5), 3.0 * (-3.0f64).exp(), max_relative = 1e-10);

        let h = ss.frequency_response(1.0).unwrap();
        let expected = Complex64::new(3.0, 0.0) / Complex64::new(2.0, 1.0);
        assert_relative_eq!(h.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(h.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn test_oscillator_impulse_response() {
        // x'' + x = u, y = x: impulse response sin(t)
        let ss = StateSpace {
            a: array![[0.0, 1.0], [-1.0, 0.0]],
            b: array![0.0, 1.0],
            c: array![1.0, 0.0],
            mae: 0.0,
            frequencies: Vec::new(),
            range: (0.0, 0.0),
        };
        for t in [0.3, 2.0, 7.5] {
            assert_relative_eq!(ss.impulse_response(t), t.sin(), epsilon = 1e-9);
        }
        assert!(ss.frequency_response(1.0).unwrap_err().is_singular());
    }

    #[test]
    fn test_validate_sizes() {
        let mut ss = first_order(1.0, 1.0);
        assert!(ss.validate("test").is_ok());
        ss.c = array![1.0, 2.0];
        assert!(ss.validate("test").unwrap_err().is_dimension_mismatch());
    }
}
