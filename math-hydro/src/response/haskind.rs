//! Radiation damping from excitation forces through the Haskind relation
//!
//! ```text
//! B_ii(w) = k / (8π·ρ·g·Cg) · ∫₀^{2π} |F_i(w, θ)|² dθ
//! ```

use super::waves::{group_velocity, wave_number};
use crate::error::{HydroError, Result};
use crate::numeric::simpson;
use crate::store::{Family, HydroStore};
use crate::types::NDOF;
use std::f64::consts::PI;

const OP: &str = "haskind";
const GRID_TOLERANCE: f64 = 1e-6;

/// Uniform heading grid covering 360°
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingGrid {
    /// First heading in `[0, 360)` (deg)
    pub start: f64,
    /// Spacing (deg), divides 360
    pub step: f64,
    /// Grid slot of every store heading
    pub slots: Vec<usize>,
}

impl HeadingGrid {
    /// Number of distinct grid headings
    pub fn len(&self) -> usize {
        (360.0 / self.step).round() as usize
    }

    /// `true` for a grid without headings
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fit a grid to `head`, failing unless the spacing divides 360° and
    /// every heading lies on the grid
    pub fn from_headings(head: &[f64]) -> Result<Self> {
        let wrapped: Vec<f64> = head.iter().map(|h| h.rem_euclid(360.0)).collect();
        let mut sorted = wrapped.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup_by(|a, b| (*a - *b).abs() < GRID_TOLERANCE);
        if sorted.len() < 2 {
            return Err(HydroError::insufficient(OP, "at least two distinct headings are needed"));
        }
        let start = sorted[0];
        let step = sorted
            .windows(2)
            .map(|w| w[1] - w[0])
            .chain(std::iter::once(start + 360.0 - sorted[sorted.len() - 1]))
            .fold(f64::INFINITY, f64::min);
        let count = 360.0 / step;
        if (count - count.round()).abs() > GRID_TOLERANCE * count {
            return Err(HydroError::insufficient(
                OP,
                format!("heading spacing {step}° does not divide 360°"),
            ));
        }
        let n = count.round() as usize;
        let mut slots = Vec::with_capacity(wrapped.len());
        for &h in &wrapped {
            let pos = (h - start) / step;
            if (pos - pos.round()).abs() > GRID_TOLERANCE {
                return Err(HydroError::insufficient(
                    OP,
                    format!("heading {h}° is off the {step}° grid"),
                ));
            }
            slots.push(pos.round() as usize % n);
        }
        Ok(Self { start, step, slots })
    }

    /// Complete a periodic sample set; missing slots are interpolated with wrap-around
    pub fn fill(&self, known: &[Option<f64>]) -> Option<Vec<f64>> {
        let n = known.len();
        let present: Vec<usize> = (0..n).filter(|&i| known[i].is_some()).collect();
        if present.is_empty() {
            return None;
        }
        let mut out = vec![0.0; n];
        for i in 0..n {
            if let Some(v) = known[i] {
                out[i] = v;
                continue;
            }
            let prev = present.iter().rev().find(|&&p| p < i).or(present.last()).copied()?;
            let next = present.iter().find(|&&p| p > i).or(present.first()).copied()?;
            let span = (next + n - prev) % n;
            let (yp, yn) = (known[prev]?, known[next]?);
            if span == 0 {
                out[i] = yp;
            } else {
                let t = ((i + n - prev) % n) as f64 / span as f64;
                out[i] = yp + (yn - yp) * t;
            }
        }
        Some(out)
    }
}

impl HydroStore {
    /// Diagonal damping from excitation forces into `b_haskind`
    ///
    /// Requires excitation forces, a known water depth and headings on a grid
    /// whose spacing divides 360°. Off-diagonal entries stay missing.
    pub fn haskind(&mut self) -> Result<()> {
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::Ex])?;
        if !self.h.is_known() {
            return Err(HydroError::insufficient(OP, "water depth is unknown"));
        }
        let grid = HeadingGrid::from_headings(&self.head)?;
        let n = grid.len();
        let theta: Vec<f64> = (0..=n).map(|k| (k as f64 * grid.step).to_radians()).collect();

        self.dimensional_transaction(|work| {
            let (rho, g, depth) = (work.rho, work.g, work.h);
            let mut bh = work.empty_coef();
            let Some(ex) = &work.ex else {
                return Err(HydroError::insufficient(OP, "excitation"));
            };
            for ib in 0..work.nb() {
                for ifr in 0..work.nf() {
                    let w = work.w[ifr];
                    if w <= 0.0 {
                        continue;
                    }
                    let k = wave_number(w, depth, g);
                    let cg = group_velocity(w, k, depth, g);
                    let factor = k / (8.0 * PI * rho * g * cg);
                    for d in 0..NDOF {
                        let mut known = vec![None; n];
                        for (ih, &slot) in grid.slots.iter().enumerate() {
                            if known[slot].is_none() {
                                known[slot] = ex[[ib, ih, ifr, d]].map(|f| f.norm_sqr());
                            }
                        }
                        let Some(mut values) = grid.fill(&known) else { continue };
                        values.push(values[0]);
                        let i = NDOF * ib + d;
                        bh[[i, i, ifr]] = Some(factor * simpson(&theta, &values));
                    }
                }
            }
            work.b_haskind = Some(bh);
            log::info!("{}: Haskind damping on a {n} heading grid", work.name);
            Ok(())
        })
    }
}
