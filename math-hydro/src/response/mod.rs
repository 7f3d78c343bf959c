//! Frequency-domain response of the bodies
//!
//! - `rao`: impedance assembly and RAO solve per body, frequency and heading
//! - `stiffness`: ridge least-squares stiffness from observed responses
//! - `haskind`: diagonal damping from excitation forces
//! - `waves`: dispersion relation, group velocity and wave phase reference

pub mod haskind;
pub mod rao;
pub mod stiffness;
pub mod waves;

pub use haskind::HeadingGrid;
pub use rao::{critical_damping, impedance, solve_response};
pub use stiffness::RIDGE_LAMBDA;
pub use waves::{group_velocity, wave_number};
