//! Consistency healing between added mass, damping and the kernel
//!
//! Each DOF pair is cleaned up independently:
//!
//! 1. negative diagonal damping beyond `negative_tolerance·max|B|` is dropped,
//!    smaller negative values are clipped to zero
//! 2. the tail after the last sample above `thin_tolerance·max|B|` is trimmed
//! 3. damping is extended past the last sample with `B_N·(w_N/w)^p`
//!
//! The kernel of the cleaned damping then yields `Ainf_w` (from the input
//! added mass), `Ainf`, and re-derived added mass and damping
//!
//! ```text
//! A(w) = Ainf − (1/w) ∫ K(t)·sin(w·t) dt
//! B(w) = ∫ K(t)·cos(w·t) dt
//! ```
//!
//! so that all five quantities agree.

use super::{ainf_estimate, cosine_transform, pair_samples, radiation_kernel, sine_transform};
use crate::config::{HealConfig, HydroConfig};
use crate::error::Result;
use crate::numeric::{linspace, mean_present, simpson};
use crate::parallel::parallel_map_indexed;
use crate::progress::Progress;
use crate::store::{Derived, Family, HydroStore};
use ndarray::{ArrayView1, s};

/// Samples appended by the decaying tail
const TAIL_POINTS: usize = 20;
/// Decay exponent when the tail slope cannot be measured
const DEFAULT_TAIL_POWER: f64 = 3.0;
const MIN_TAIL_POWER: f64 = 2.0;
const MAX_TAIL_POWER: f64 = 8.0;

/// Consistent values of one healed pair
#[derive(Debug)]
struct HealedPair {
    kernel: Vec<f64>,
    ainf_w: Vec<Option<f64>>,
    ainf: f64,
    a0: f64,
    a: Vec<Option<f64>>,
    b: Vec<Option<f64>>,
}

#[derive(Debug)]
enum PairOutcome {
    /// No damping at all, nothing to do
    Empty,
    Healed(Box<HealedPair>),
    Failed(&'static str),
}

/// Drop or clip negative damping
fn remove_negative(w: &mut Vec<f64>, b: &mut Vec<f64>, tolerance: f64) {
    let max = b.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let limit = -tolerance * max;
    let keep: Vec<bool> = b.iter().map(|&v| v >= limit).collect();
    let mut k = keep.iter();
    w.retain(|_| *k.next().unwrap_or(&false));
    let mut k = keep.iter();
    b.retain(|_| *k.next().unwrap_or(&false));
    for v in b.iter_mut() {
        *v = v.max(0.0);
    }
}

/// Trim samples after the last significant one
fn remove_thin_tail(w: &mut Vec<f64>, b: &mut Vec<f64>, tolerance: f64) {
    let max = b.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if let Some(last) = b.iter().rposition(|v| v.abs() >= tolerance * max) {
        w.truncate(last + 1);
        b.truncate(last + 1);
    }
}

/// Power of the decay `B ∝ w^(−p)` measured on the last two samples
fn tail_power(w: &[f64], b: &[f64]) -> f64 {
    let n = w.len();
    if n < 2 || b[n - 1] <= 0.0 || b[n - 2] <= 0.0 || w[n - 2] <= 0.0 {
        return DEFAULT_TAIL_POWER;
    }
    let p = -(b[n - 1] / b[n - 2]).ln() / (w[n - 1] / w[n - 2]).ln();
    if p.is_finite() {
        p.clamp(MIN_TAIL_POWER, MAX_TAIL_POWER)
    } else {
        DEFAULT_TAIL_POWER
    }
}

/// Extend damping to `extension·w_N` with a power-law decay
fn extend_tail(w: &mut Vec<f64>, b: &mut Vec<f64>, extension: f64) {
    let (Some(&wn), Some(&bn)) = (w.last(), b.last()) else {
        return;
    };
    if wn <= 0.0 || extension <= 1.0 {
        return;
    }
    let p = tail_power(w, b);
    for k in 1..=TAIL_POINTS {
        let wk = wn * (1.0 + (extension - 1.0) * k as f64 / TAIL_POINTS as f64);
        w.push(wk);
        b.push(bn * (wn / wk).powf(p));
    }
}

fn heal_pair(
    w: &[f64],
    a: ArrayView1<'_, Option<f64>>,
    b: ArrayView1<'_, Option<f64>>,
    diagonal: bool,
    t: &[f64],
    cfg: &HealConfig,
) -> PairOutcome {
    if b.iter().all(Option::is_none) {
        return PairOutcome::Empty;
    }
    let Some((mut wk, mut bk)) = pair_samples(w, b) else {
        return PairOutcome::Failed("fewer than two damping samples");
    };
    if cfg.z_removal && diagonal {
        remove_negative(&mut wk, &mut bk, cfg.negative_tolerance);
    }
    if cfg.thin_removal {
        remove_thin_tail(&mut wk, &mut bk, cfg.thin_tolerance);
    }
    if wk.len() < 2 {
        return PairOutcome::Failed("fewer than two damping samples after cleanup");
    }
    if cfg.decaying_tail {
        extend_tail(&mut wk, &mut bk, cfg.tail_extension);
    }

    let kernel = radiation_kernel(&wk, &bk, t);
    if kernel.iter().any(|v| !v.is_finite()) {
        return PairOutcome::Failed("non-finite kernel");
    }
    let ainf_w: Vec<Option<f64>> = w
        .iter()
        .zip(a.iter())
        .map(|(&wi, ai)| ai.and_then(|ai| ainf_estimate(wi, ai, t, &kernel)))
        .collect();
    let Some(ainf) = mean_present(ainf_w.iter().copied()) else {
        return PairOutcome::Failed("no added mass to anchor Ainf");
    };
    let moment: Vec<f64> = kernel.iter().zip(t).map(|(k, t)| k * t).collect();
    let a0 = ainf - simpson(t, &moment);

    let a_new = w
        .iter()
        .zip(a.iter())
        .map(|(&wi, ai)| {
            ai.map(|_| {
                if wi != 0.0 {
                    ainf - sine_transform(t, &kernel, wi) / wi
                } else {
                    a0
                }
            })
        })
        .collect();
    let b_new = w
        .iter()
        .zip(b.iter())
        .map(|(&wi, bi)| bi.map(|_| cosine_transform(t, &kernel, wi)))
        .collect();

    PairOutcome::Healed(Box::new(HealedPair {
        kernel,
        ainf_w,
        ainf,
        a0,
        a: a_new,
        b: b_new,
    }))
}

impl HydroStore {
    /// Make `A`, `B`, `Ainf_w`, `Ainf` and the kernel mutually consistent
    ///
    /// Returns the healed `(i, j)` pairs. A pair that cannot be healed keeps
    /// its added mass and damping while its kernel, `Ainf_w`, `Ainf` and `A0`
    /// become missing. RAO and state space are invalidated. The store is only
    /// modified when the whole pass completes.
    pub fn heal_ogilvie(
        &mut self,
        config: &HydroConfig,
        progress: &mut Progress<'_>,
    ) -> Result<Vec<(usize, usize)>> {
        const OP: &str = "heal_ogilvie";
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::A, Family::B])?;
        let Some(max_t) = self.kirf_max_t() else {
            log::warn!("{}: fewer than two distinct frequencies, nothing healed", self.name);
            return Ok(Vec::new());
        };
        let max_t = max_t.min(config.max_time_irf);
        let num_t = config.num_t_irf;
        let heal = &config.heal;
        let progress = progress.for_operation(OP);

        self.dimensional_transaction(|work| {
            progress.step("Healing", 0)?;
            let tirf = linspace(0.0, max_t, num_t);
            let n6 = work.n6();
            let outcomes = {
                let (Some(a), Some(b)) = (&work.a, &work.b) else {
                    return Ok(Vec::new());
                };
                let w = &work.w;
                let tirf = &tirf;
                parallel_map_indexed(n6 * n6, |idx| {
                    let (i, j) = (idx / n6, idx % n6);
                    heal_pair(
                        w,
                        a.slice(s![i, j, ..]),
                        b.slice(s![i, j, ..]),
                        i == j,
                        tirf,
                        heal,
                    )
                })
            };
            progress.step("Healing", 70)?;

            let mut kirf = ndarray::Array3::from_elem((n6, n6, num_t), None);
            let mut ainf_w = work.empty_coef();
            let mut ainf = work.empty_matrix();
            let mut a0 = work.empty_matrix();
            let mut healed = Vec::new();
            for (idx, outcome) in outcomes.into_iter().enumerate() {
                let (i, j) = (idx / n6, idx % n6);
                match outcome {
                    PairOutcome::Empty => {}
                    PairOutcome::Failed(reason) => {
                        log::warn!("{}: pair ({i}, {j}) not healed, {reason}", work.name);
                    }
                    PairOutcome::Healed(p) => {
                        for (it, v) in p.kernel.into_iter().enumerate() {
                            kirf[[i, j, it]] = Some(v);
                        }
                        for (ifr, ((aw, an), bn)) in p.ainf_w.into_iter().zip(p.a).zip(p.b).enumerate() {
                            ainf_w[[i, j, ifr]] = aw;
                            if let Some(a) = work.a.as_mut() {
                                a[[i, j, ifr]] = an;
                            }
                            if let Some(b) = work.b.as_mut() {
                                b[[i, j, ifr]] = bn;
                            }
                        }
                        ainf[[i, j]] = Some(p.ainf);
                        a0[[i, j]] = Some(p.a0);
                        healed.push((i, j));
                    }
                }
            }
            work.kirf = Some(kirf);
            work.tirf = tirf;
            work.ainf_w = Some(ainf_w);
            work.ainf = Some(ainf);
            work.a0 = Some(a0);
            work.invalidate(&[Derived::Rao, Derived::StateSpace]);
            log::info!("{}: healed {} DOF pairs", work.name, healed.len());
            progress.step("Healing", 100)?;
            Ok(healed)
        })
    }
}
