//! Error type for the dense kernels.

use thiserror::Error;

/// Errors that can occur during dense factorizations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// A pivot fell below the relative singularity tolerance.
    #[error("matrix is singular or nearly singular (pivot {pivot:e} at column {column})")]
    SingularMatrix {
        /// Elimination column where the pivot vanished
        column: usize,
        /// Magnitude of the best available pivot
        pivot: f64,
    },

    /// Operand shapes are incompatible.
    #[error("matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        got: usize,
    },

    /// An iterative decomposition did not converge.
    #[error("{method} did not converge after {sweeps} sweeps")]
    NoConvergence {
        /// Name of the decomposition
        method: &'static str,
        /// Number of sweeps performed
        sweeps: usize,
    },
}

/// A specialized `Result` type for dense kernels.
pub type Result<T> = std::result::Result<T, LinalgError>;

impl LinalgError {
    /// Returns `true` if the failure is a singular pivot.
    pub fn is_singular(&self) -> bool {
        matches!(self, LinalgError::SingularMatrix { .. })
    }

    /// Returns `true` if operand shapes disagree.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, LinalgError::DimensionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LinalgError::DimensionMismatch {
            expected: 6,
            got: 5,
        };
        assert_eq!(err.to_string(), "matrix dimensions mismatch: expected 6, got 5");
        assert!(err.is_dimension_error());
        assert!(!err.is_singular());
    }
}
