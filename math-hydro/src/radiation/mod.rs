//! Radiation impulse response and added mass asymptotes
//!
//! The kernel of a DOF pair is the cosine transform of its damping,
//!
//! ```text
//! K(t) = (2/π) ∫ B(w)·cos(w·t) dw
//! ```
//!
//! and the infinite-frequency added mass follows from the companion relation
//!
//! ```text
//! Ainf(w) = A(w) + (1/w) ∫ K(t)·sin(w·t) dt
//! ```
//!
//! evaluated at every sampled frequency. The spread of `Ainf(w)` across
//! frequencies is a convergence diagnostic; `Ainf` is its mean.
//!
//! All quadratures run on dimensional values. Damping is resampled linearly
//! onto a dense uniform grid first so that the transform is band limited and
//! decays at the cutoff time.

pub mod heal;
pub mod state_space;

pub use state_space::StateSpace;

use crate::config::HydroConfig;
use crate::error::Result;
use crate::numeric::{
    linspace, mean_positive_step, mean_present, resample_uniform, simpson,
};
use crate::parallel::parallel_map_indexed;
use crate::progress::Progress;
use crate::store::{CoefTensor, Family, HydroStore};
use ndarray::{Array2, Array3, ArrayView1};
use std::f64::consts::PI;

/// Present damping samples of one DOF pair, sorted by frequency
///
/// Repeated frequencies keep their first sample. `None` with fewer than two
/// distinct frequencies.
pub fn pair_samples(w: &[f64], values: ArrayView1<'_, Option<f64>>) -> Option<(Vec<f64>, Vec<f64>)> {
    let mut pts: Vec<(f64, f64)> = w
        .iter()
        .zip(values.iter())
        .filter_map(|(&w, v)| v.filter(|v| v.is_finite()).map(|v| (w, v)))
        .filter(|(w, _)| w.is_finite())
        .collect();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0));
    pts.dedup_by(|a, b| a.0 == b.0);
    if pts.len() < 2 {
        return None;
    }
    Some(pts.into_iter().unzip())
}

/// Impulse response of damping samples `b(w)` at the times `t`
///
/// `w` must be ascending with at least two distinct values.
pub fn radiation_kernel(w: &[f64], b: &[f64], t: &[f64]) -> Vec<f64> {
    let mean_dw = mean_positive_step(w).unwrap_or(0.0);
    let t_max = t.iter().copied().fold(0.0, f64::max);
    let mut step = mean_dw / 10.0;
    if t_max > 0.0 {
        step = step.min(PI / (10.0 * t_max));
    }
    let (wf, bf) = resample_uniform(w, b, step);

    let mut integrand = vec![0.0; wf.len()];
    t.iter()
        .map(|&ti| {
            for ((v, &wk), &bk) in integrand.iter_mut().zip(&wf).zip(&bf) {
                *v = bk * (wk * ti).cos();
            }
            2.0 / PI * simpson(&wf, &integrand)
        })
        .collect()
}

/// `∫ K(t)·sin(w·t) dt`
pub fn sine_transform(t: &[f64], k: &[f64], w: f64) -> f64 {
    let y: Vec<f64> = t.iter().zip(k).map(|(&t, &k)| k * (w * t).sin()).collect();
    simpson(t, &y)
}

/// `∫ K(t)·cos(w·t) dt`
pub fn cosine_transform(t: &[f64], k: &[f64], w: f64) -> f64 {
    let y: Vec<f64> = t.iter().zip(k).map(|(&t, &k)| k * (w * t).cos()).collect();
    simpson(t, &y)
}

/// Infinite-frequency added mass implied by `A(w)` and the kernel, `None` at `w = 0`
pub fn ainf_estimate(w: f64, a: f64, t: &[f64], k: &[f64]) -> Option<f64> {
    (w != 0.0).then(|| a + sine_transform(t, k, w) / w)
}

impl HydroStore {
    /// Default kernel cutoff `π / mean(Δw)`, `None` with fewer than two distinct frequencies
    pub fn kirf_max_t(&self) -> Option<f64> {
        let mut w: Vec<f64> = self.w.iter().copied().filter(|w| w.is_finite()).collect();
        w.sort_by(f64::total_cmp);
        mean_positive_step(&w).map(|dw| PI / dw)
    }

    /// Compute the kernel with the configured cutoff and resolution
    ///
    /// When added mass is loaded, `Ainf_w` and `Ainf` are recomputed too.
    /// Returns the number of DOF pairs with a kernel; with fewer than two
    /// distinct frequencies the kernel is cleared and `0` is returned.
    pub fn compute_kernel(&mut self, config: &HydroConfig, progress: &mut Progress<'_>) -> Result<usize> {
        const OP: &str = "compute_kernel";
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::B])?;

        let Some(max_t) = self.kirf_max_t() else {
            log::warn!("{}: fewer than two distinct frequencies, no kernel", self.name);
            self.invalidate(&[crate::store::Derived::Kernel]);
            return Ok(0);
        };
        let max_t = max_t.min(config.max_time_irf);
        self.compute_kernel_at(max_t, config.num_t_irf, progress)
    }

    /// Compute the kernel on `num_t` samples of `[0, max_t]`
    pub fn compute_kernel_at(
        &mut self,
        max_t: f64,
        num_t: usize,
        progress: &mut Progress<'_>,
    ) -> Result<usize> {
        const OP: &str = "compute_kernel";
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::B])?;
        let progress = progress.for_operation(OP);

        self.dimensional_transaction(|s| {
            progress.step("Kernel", 0)?;
            let count = s.recompute_kernel(max_t, num_t);
            progress.step("Kernel", 50)?;
            if s.is_loaded(Family::A) {
                s.update_ainf();
                progress.step("Ainf", 100)?;
            }
            Ok(count)
        })
    }

    /// Recompute `Ainf_w` and `Ainf` from `A` and the current kernel
    pub fn compute_ainf(&mut self) -> Result<()> {
        const OP: &str = "compute_ainf";
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::A, Family::Kirf])?;
        self.dimensional_transaction(|s| {
            s.update_ainf();
            Ok(())
        })
    }

    /// Zero-frequency added mass `A0 = Ainf − ∫ K(t)·t dt`
    pub fn compute_a0(&mut self) -> Result<()> {
        const OP: &str = "compute_a0";
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::Ainf, Family::Kirf])?;
        self.dimensional_transaction(|s| {
            let (Some(kirf), Some(ainf)) = (&s.kirf, &s.ainf) else {
                return Ok(());
            };
            let n6 = s.n6();
            let mut a0 = Array2::from_elem((n6, n6), None);
            for i in 0..n6 {
                for j in 0..n6 {
                    let Some(ainf) = ainf[[i, j]] else { continue };
                    let k: Option<Vec<f64>> = kirf.slice(ndarray::s![i, j, ..]).iter().copied().collect();
                    if let Some(k) = k {
                        let y: Vec<f64> = k.iter().zip(&s.tirf).map(|(k, t)| k * t).collect();
                        a0[[i, j]] = Some(ainf - simpson(&s.tirf, &y));
                    }
                }
            }
            s.a0 = Some(a0);
            Ok(())
        })
    }

    /// Replace `kirf`/`tirf` from the current damping; the store must be dimensional
    pub(crate) fn recompute_kernel(&mut self, max_t: f64, num_t: usize) -> usize {
        debug_assert!(self.dimen);
        let Some(b) = &self.b else {
            return 0;
        };
        let tirf = linspace(0.0, max_t, num_t);
        let n6 = self.n6();
        let w = &self.w;
        let kernels = parallel_map_indexed(n6 * n6, |idx| {
            let (i, j) = (idx / n6, idx % n6);
            let (wk, bk) = pair_samples(w, b.slice(ndarray::s![i, j, ..]))?;
            Some(radiation_kernel(&wk, &bk, &tirf))
        });

        let mut kirf: CoefTensor = Array3::from_elem((n6, n6, num_t), None);
        let mut count = 0;
        for (idx, k) in kernels.into_iter().enumerate() {
            if let Some(k) = k {
                let (i, j) = (idx / n6, idx % n6);
                for (it, v) in k.into_iter().enumerate() {
                    kirf[[i, j, it]] = Some(v);
                }
                count += 1;
            }
        }
        log::info!(
            "{}: kernel for {count} of {} DOF pairs, {num_t} samples up to {max_t:.3} s",
            self.name,
            n6 * n6
        );
        self.kirf = Some(kirf);
        self.tirf = tirf;
        count
    }

    /// Rebuild `Ainf_w` and `Ainf` from `A` and `kirf`; the store must be dimensional
    fn update_ainf(&mut self) {
        let (Some(a), Some(kirf)) = (&self.a, &self.kirf) else {
            return;
        };
        let n6 = self.n6();
        let nf = self.nf();
        let mut ainf_w = self.empty_coef();
        let mut ainf = self.empty_matrix();
        for i in 0..n6 {
            for j in 0..n6 {
                let k: Option<Vec<f64>> = kirf.slice(ndarray::s![i, j, ..]).iter().copied().collect();
                let Some(k) = k else { continue };
                for ifr in 0..nf {
                    ainf_w[[i, j, ifr]] = a[[i, j, ifr]]
                        .and_then(|a| ainf_estimate(self.w[ifr], a, &self.tirf, &k));
                }
                ainf[[i, j]] = mean_present((0..nf).map(|ifr| ainf_w[[i, j, ifr]]));
            }
        }
        if log::log_enabled!(log::Level::Debug) {
            for i in 0..n6 {
                let spread = (0..nf)
                    .filter_map(|ifr| ainf_w[[i, i, ifr]].zip(ainf[[i, i]]))
                    .map(|(x, m)| (x - m).abs())
                    .fold(0.0, f64::max);
                log::debug!("Ainf[{i}][{i}] spread across frequencies: {spread:.4e}");
            }
        }
        self.ainf_w = Some(ainf_w);
        self.ainf = Some(ainf);
    }
}
