//! Dimensional bookkeeping
//!
//! Non-dimensional values relate to dimensional ones through `rho`, `g` and
//! the length scale `len` with a DOF dependent power of length:
//!
//! | quantity | dimensional = non-dimensional × |
//! |----------|------|
//! | A, A0, Ainf, Ainf_w | `ρ·L^k` |
//! | B, B_H | `ρ·L^k·w` |
//! | C, Kirf | `ρ·g·L^(k−1)` |
//! | ex, sc, fk | `ρ·g·L^m` |
//! | md, QTF | `ρ·g·L^(m−1)` |
//! | RAO | `L^(2−m)` |
//!
//! with `k = 3 + [i rotational] + [j rotational]` and `m = 2` for translations, `3` for rotations.
//! Mass, external matrices and potentials are always dimensional.

use super::HydroStore;
use crate::error::Result;
use crate::types::is_translation;
use ndarray::{Array2, Axis};
use num_complex::Complex64;

/// Length exponent of a DOF pair coefficient
pub fn k_ab(i: usize, j: usize) -> i32 {
    3 + i32::from(!is_translation(i)) + i32::from(!is_translation(j))
}

/// Length exponent of a force component
pub fn m_f(idof: usize) -> i32 {
    if is_translation(idof) { 2 } else { 3 }
}

#[inline]
fn rescale(v: &mut Option<f64>, s: f64, to_dim: bool) {
    if let Some(x) = v {
        if s != 0.0 && s.is_finite() {
            if to_dim {
                *x *= s;
            } else {
                *x /= s;
            }
        }
    }
}

#[inline]
fn rescale_c(v: &mut Option<Complex64>, s: f64, to_dim: bool) {
    if let Some(x) = v {
        if s != 0.0 && s.is_finite() {
            if to_dim {
                *x *= s;
            } else {
                *x /= s;
            }
        }
    }
}

impl HydroStore {
    /// Scale of added mass entries
    pub fn scale_a(&self, i: usize, j: usize) -> f64 {
        self.rho * self.len.powi(k_ab(i, j))
    }

    /// Scale of damping entries at frequency `w`
    pub fn scale_b(&self, i: usize, j: usize, w: f64) -> f64 {
        self.rho * self.len.powi(k_ab(i, j)) * w
    }

    /// Scale of stiffness and kernel entries
    pub fn scale_c(&self, i: usize, j: usize) -> f64 {
        self.rho * self.g * self.len.powi(k_ab(i, j) - 1)
    }

    /// Scale of first order force components
    pub fn scale_f(&self, idof: usize) -> f64 {
        self.rho * self.g * self.len.powi(m_f(idof))
    }

    /// Scale of mean drift and QTF components
    pub fn scale_md(&self, idof: usize) -> f64 {
        self.rho * self.g * self.len.powi(m_f(idof) - 1)
    }

    /// Scale of RAO components
    pub fn scale_rao(&self, idof: usize) -> f64 {
        self.len.powi(2 - m_f(idof))
    }

    /// Dimensional added mass
    pub fn a_dim(&self, i: usize, j: usize, ifr: usize) -> Option<f64> {
        let v = self.a.as_ref()?[[i, j, ifr]]?;
        Some(if self.dimen { v } else { v * self.scale_a(i, j) })
    }

    /// Dimensional damping
    pub fn b_dim(&self, i: usize, j: usize, ifr: usize) -> Option<f64> {
        let v = self.b.as_ref()?[[i, j, ifr]]?;
        Some(if self.dimen {
            v
        } else {
            v * self.scale_b(i, j, self.w[ifr])
        })
    }

    /// Dimensional excitation force
    pub fn ex_dim(&self, ib: usize, ih: usize, ifr: usize, idof: usize) -> Option<Complex64> {
        let v = self.ex.as_ref()?[[ib, ih, ifr, idof]]?;
        Some(if self.dimen {
            v
        } else {
            v * self.scale_f(idof)
        })
    }

    /// Dimensional response amplitude
    pub fn rao_dim(&self, ib: usize, ih: usize, ifr: usize, idof: usize) -> Option<Complex64> {
        let v = self.rao.as_ref()?[[ib, ih, ifr, idof]]?;
        Some(if self.dimen { v } else { v * self.scale_rao(idof) })
    }

    /// Convert every non-dimensionalizable family in place
    pub fn set_dimensional(&mut self, dimen: bool) {
        if self.dimen == dimen {
            return;
        }
        let to_dim = dimen;
        log::debug!(
            "converting store to {} form",
            if to_dim { "dimensional" } else { "non-dimensional" }
        );

        let sa = self.pair_scales(|s, i, j| s.scale_a(i, j));
        let sc = self.pair_scales(|s, i, j| s.scale_c(i, j));
        let w = self.w.clone();

        for t in [&mut self.a, &mut self.ainf_w].into_iter().flatten() {
            for ((i, j, _), v) in t.indexed_iter_mut() {
                rescale(v, sa[[i, j]], to_dim);
            }
        }
        for m in [&mut self.a0, &mut self.ainf].into_iter().flatten() {
            for ((i, j), v) in m.indexed_iter_mut() {
                rescale(v, sa[[i, j]], to_dim);
            }
        }
        for t in [&mut self.b, &mut self.b_haskind].into_iter().flatten() {
            for ((i, j, k), v) in t.indexed_iter_mut() {
                rescale(v, sa[[i, j]] * w[k], to_dim);
            }
        }
        if let Some(t) = &mut self.kirf {
            for ((i, j, _), v) in t.indexed_iter_mut() {
                rescale(v, sc[[i, j]], to_dim);
            }
        }
        for b in &mut self.bodies {
            if let Some(c) = &mut b.c {
                for ((i, j), v) in c.indexed_iter_mut() {
                    let s = sc[[i, j]];
                    if to_dim {
                        *v *= s;
                    } else {
                        *v /= s;
                    }
                }
            }
        }

        let sf: Vec<f64> = (0..6).map(|d| self.scale_f(d)).collect();
        let smd: Vec<f64> = (0..6).map(|d| self.scale_md(d)).collect();
        let srao: Vec<f64> = (0..6).map(|d| self.scale_rao(d)).collect();

        for t in [&mut self.ex, &mut self.sc, &mut self.fk].into_iter().flatten() {
            for ((_, _, _, d), v) in t.indexed_iter_mut() {
                rescale_c(v, sf[d], to_dim);
            }
        }
        if let Some(t) = &mut self.rao {
            for ((_, _, _, d), v) in t.indexed_iter_mut() {
                rescale_c(v, srao[d], to_dim);
            }
        }
        if let Some(t) = &mut self.md {
            for ((_, _, _, d), v) in t.indexed_iter_mut() {
                rescale(v, smd[d], to_dim);
            }
        }
        for t in [&mut self.qtfsum, &mut self.qtfdif].into_iter().flatten() {
            for (d, mut sub) in t.axis_iter_mut(Axis(2)).enumerate() {
                sub.map_inplace(|v| rescale_c(v, smd[d], to_dim));
            }
        }

        self.dimen = dimen;
    }

    fn pair_scales<F: Fn(&Self, usize, usize) -> f64>(&self, f: F) -> Array2<f64> {
        let n6 = self.n6();
        Array2::from_shape_fn((n6, n6), |(i, j)| f(self, i, j))
    }

    /// Run `f` on a dimensional working copy and commit it only on success
    ///
    /// The copy is converted back to the original form before it replaces the
    /// store, so the `dimen` flag is unchanged. On error the store is untouched.
    pub fn dimensional_transaction<T>(
        &mut self,
        f: impl FnOnce(&mut HydroStore) -> Result<T>,
    ) -> Result<T> {
        let was = self.dimen;
        let mut work = self.clone();
        work.set_dimensional(true);
        let out = f(&mut work)?;
        work.set_dimensional(was);
        *self = work;
        Ok(out)
    }
}
