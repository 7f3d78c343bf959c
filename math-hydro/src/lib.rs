//! Post-processing of frequency-domain hydrodynamic coefficients
//!
//! This crate holds the coefficients a boundary element solver produces for
//! one or more floating bodies and keeps them consistent while they are
//! edited, transformed and solved on.
//!
//! # Features
//!
//! - **Coefficient store**: added mass, damping, forces, mean drift, QTFs and
//!   kernels with explicit missing values and dimensional bookkeeping
//! - **Axis editing**: delete, sort, gap-fill and swap frequencies, headings,
//!   DOFs and bodies across every dependent tensor
//! - **Radiation kernel**: impulse response from damping, infinite-frequency
//!   added mass and consistency healing
//! - **Rigid transforms**: reference point translation and symmetrization
//! - **Response**: RAO solve, stiffness back-estimation and Haskind damping
//!
//! # Example
//!
//! ```ignore
//! use math_hydro::{HydroConfig, HydroStore, Point3D, Progress};
//!
//! let config = HydroConfig::default();
//! let mut store = registry.load(path, &config)?;
//! store.compute_kernel(&config, &mut Progress::none())?;
//! store.translate(&[Point3D::new(0.0, 0.0, -2.0)], false, &mut Progress::none())?;
//! store.compute_rao(0.05)?;
//! ```

#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]

pub mod axis;
pub mod config;
pub mod error;
pub mod loader;
pub mod numeric;
pub mod parallel;
pub mod progress;
pub mod radiation;
pub mod response;
pub mod rigid;
pub mod store;
pub mod types;

pub use config::{HealConfig, HydroConfig};
pub use error::{HydroError, Result};
pub use loader::{Loader, LoaderRegistry};
pub use progress::{Progress, StatusFn};
pub use radiation::StateSpace;
pub use store::{Derived, Family, ForceKind, HydroStore, QtfPart};
pub use types::{Body, DOF_NAMES, HeadingPair, NDOF, Point3D, WaterDepth};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
