//! JSON configuration for coefficient post-processing
//!
//! A [`HydroConfig`] value is passed explicitly to every engine entry point.

use crate::error::{HydroError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Processing parameters shared by the engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydroConfig {
    /// Fluid density used when a loader does not provide one (kg/m³)
    #[serde(default = "default_rho")]
    pub rho: f64,
    /// Gravitational acceleration (m/s²)
    #[serde(default = "default_g")]
    pub g: f64,
    /// Length scale for non-dimensional data (m)
    #[serde(default = "default_len")]
    pub len: f64,
    /// Upper limit for the impulse response duration (s)
    #[serde(default = "default_max_time_irf")]
    pub max_time_irf: f64,
    /// Number of kernel time samples
    #[serde(default = "default_num_t_irf")]
    pub num_t_irf: usize,
    /// Kernel healing options
    #[serde(default)]
    pub heal: HealConfig,
}

fn default_rho() -> f64 {
    1025.0
}

fn default_g() -> f64 {
    9.81
}

fn default_len() -> f64 {
    1.0
}

fn default_max_time_irf() -> f64 {
    120.0
}

fn default_num_t_irf() -> usize {
    1000
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            rho: default_rho(),
            g: default_g(),
            len: default_len(),
            max_time_irf: default_max_time_irf(),
            num_t_irf: default_num_t_irf(),
            heal: HealConfig::default(),
        }
    }
}

/// Options of the Ogilvie consistency healing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealConfig {
    /// Drop negative diagonal damping samples
    #[serde(default = "default_true")]
    pub z_removal: bool,
    /// Trim the negligible high-frequency damping tail
    #[serde(default = "default_true")]
    pub thin_removal: bool,
    /// Extend damping past the last sample with a decaying power law
    #[serde(default = "default_true")]
    pub decaying_tail: bool,
    /// Negative damping below `-negative_tolerance·max|B|` is removed, smaller is clipped to 0
    #[serde(default = "default_negative_tolerance")]
    pub negative_tolerance: f64,
    /// Tail samples below `thin_tolerance·max|B|` are trimmed
    #[serde(default = "default_thin_tolerance")]
    pub thin_tolerance: f64,
    /// The decaying tail reaches `tail_extension·w_last`
    #[serde(default = "default_tail_extension")]
    pub tail_extension: f64,
}

fn default_true() -> bool {
    true
}

fn default_negative_tolerance() -> f64 {
    0.01
}

fn default_thin_tolerance() -> f64 {
    1e-3
}

fn default_tail_extension() -> f64 {
    2.0
}

impl Default for HealConfig {
    fn default() -> Self {
        Self {
            z_removal: true,
            thin_removal: true,
            decaying_tail: true,
            negative_tolerance: default_negative_tolerance(),
            thin_tolerance: default_thin_tolerance(),
            tail_extension: default_tail_extension(),
        }
    }
}

impl HydroConfig {
    /// Check ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.rho > 0.0) {
            return Err(HydroError::Config(format!("rho must be > 0, got {}", self.rho)));
        }
        if !(self.g > 0.0) {
            return Err(HydroError::Config(format!("g must be > 0, got {}", self.g)));
        }
        if !(self.len > 0.0) {
            return Err(HydroError::Config(format!("len must be > 0, got {}", self.len)));
        }
        if !(self.max_time_irf > 0.0) {
            return Err(HydroError::Config(format!(
                "max_time_irf must be > 0, got {}",
                self.max_time_irf
            )));
        }
        if self.num_t_irf < 2 {
            return Err(HydroError::Config(format!(
                "num_t_irf must be >= 2, got {}",
                self.num_t_irf
            )));
        }
        if self.heal.negative_tolerance < 0.0 || self.heal.thin_tolerance < 0.0 {
            return Err(HydroError::Config("heal tolerances must be >= 0".into()));
        }
        if !(self.heal.tail_extension >= 1.0) {
            return Err(HydroError::Config(format!(
                "tail_extension must be >= 1, got {}",
                self.heal.tail_extension
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: HydroConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
