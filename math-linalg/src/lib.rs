//! Dense linear algebra for hydrodynamic post-processing
//!
//! Small, dependency-light kernels used on per-body 6×6 systems:
//!
//! - [`lu_solve`], [`lu_inverse`]: LU decomposition with partial pivoting, real or complex
//! - [`svd`], [`sqrt_matrix`]: one-sided Jacobi SVD and the SVD matrix square root
//! - [`ridge_regression`]: Tikhonov-regularized least squares

pub mod error;
pub mod lstsq;
pub mod lu;
pub mod svd;
pub mod traits;

pub use error::{LinalgError, Result};
pub use lstsq::ridge_regression;
pub use lu::{LuFactorization, lu_factorize, lu_inverse, lu_solve};
pub use svd::{Svd, sqrt_matrix, svd};
pub use traits::ComplexField;
