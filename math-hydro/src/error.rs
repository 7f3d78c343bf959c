//! Error types for hydrodynamic coefficient processing.
//!
//! Expected domain conditions are reported through [`HydroError`]; index
//! misuse in the axis editor is a contract violation and panics instead.

use linalg::LinalgError;
use thiserror::Error;

/// Errors that can occur while transforming or solving on a coefficient store.
#[derive(Debug, Error)]
pub enum HydroError {
    /// A tensor family required by the operation is not loaded.
    #[error("{operation}: insufficient data, {missing}")]
    InsufficientData {
        /// Operation that was requested
        operation: &'static str,
        /// What is absent
        missing: String,
    },

    /// Axis sizes of related tensors disagree.
    #[error("{operation}: dimension mismatch in {what}, expected {expected}, got {got}")]
    DimensionMismatch {
        /// Operation that detected the mismatch
        operation: &'static str,
        /// Tensor and axis involved
        what: String,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// The impedance matrix could not be inverted.
    #[error("{operation}: singular system for body {body} at frequency #{ifr} heading #{ih} ({source})")]
    SingularSystem {
        /// Operation that failed
        operation: &'static str,
        /// Body index
        body: usize,
        /// Frequency index
        ifr: usize,
        /// Heading index
        ih: usize,
        /// Underlying factorization failure
        #[source]
        source: LinalgError,
    },

    /// A rigid transform would act on partially populated DOF data.
    #[error("{operation}: invalid geometry for body {body}, {detail}")]
    InvalidGeometry {
        /// Operation that was refused
        operation: &'static str,
        /// Body index
        body: usize,
        /// Description of the incomplete block
        detail: String,
    },

    /// The progress callback asked to stop.
    #[error("{operation}: cancelled by user at '{stage}'")]
    UserCancelled {
        /// Operation that was interrupted
        operation: &'static str,
        /// Last stage label reported
        stage: String,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No loader handles the given file.
    #[error("no loader registered for '{path}'")]
    UnsupportedFormat {
        /// Path that was offered
        path: String,
    },

    /// File system failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for coefficient store operations.
pub type Result<T> = std::result::Result<T, HydroError>;

impl HydroError {
    /// Shorthand for [`HydroError::InsufficientData`].
    pub fn insufficient(operation: &'static str, missing: impl Into<String>) -> Self {
        HydroError::InsufficientData {
            operation,
            missing: missing.into(),
        }
    }

    /// Returns `true` if a required tensor family was absent.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, HydroError::InsufficientData { .. })
    }

    /// Returns `true` if tensor axes disagree.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, HydroError::DimensionMismatch { .. })
    }

    /// Returns `true` if a linear system was singular.
    pub fn is_singular(&self) -> bool {
        matches!(self, HydroError::SingularSystem { .. })
    }

    /// Returns `true` if a rigid transform was refused on incomplete data.
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, HydroError::InvalidGeometry { .. })
    }

    /// Returns `true` if the user aborted the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HydroError::UserCancelled { .. })
    }

    /// Returns `true` for configuration and file errors.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HydroError::Config(_)
                | HydroError::UnsupportedFormat { .. }
                | HydroError::Io(_)
                | HydroError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HydroError::insufficient("rao", "added mass is not loaded");
        assert_eq!(
            err.to_string(),
            "rao: insufficient data, added mass is not loaded"
        );
    }

    #[test]
    fn test_singular_carries_context() {
        let err = HydroError::SingularSystem {
            operation: "rao",
            body: 1,
            ifr: 4,
            ih: 2,
            source: LinalgError::SingularMatrix {
                column: 3,
                pivot: 0.0,
            },
        };
        let text = err.to_string();
        assert!(text.contains("body 1"));
        assert!(text.contains("#4"));
        assert!(text.contains("#2"));
        assert!(err.is_singular());
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_categories() {
        let cancelled = HydroError::UserCancelled {
            operation: "translate",
            stage: "forces".into(),
        };
        let geometry = HydroError::InvalidGeometry {
            operation: "translate",
            body: 0,
            detail: "added mass block is partial".into(),
        };
        assert!(cancelled.is_cancelled());
        assert!(geometry.is_invalid_geometry());
        assert!(!geometry.is_cancelled());
        assert!(HydroError::Config("rho".into()).is_config_error());
    }
}
