//! Linear wave dispersion and incident wave phase reference

use crate::store::HydroStore;
use crate::types::WaterDepth;
use num_complex::Complex64;

const MAX_NEWTON_ITERATIONS: usize = 100;
const NEWTON_TOLERANCE: f64 = 1e-12;

/// Wave number from `w² = g·k·tanh(k·h)`
///
/// Deep water (or an unknown depth) uses `k = w²/g`.
pub fn wave_number(w: f64, depth: WaterDepth, g: f64) -> f64 {
    let deep = w * w / g;
    let h = match depth {
        WaterDepth::Finite(h) if h > 0.0 => h,
        _ => return deep,
    };
    if w == 0.0 {
        return 0.0;
    }

    let mut k = deep.max(w / (g * h).sqrt());
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let th = (k * h).tanh();
        let f = g * k * th - w * w;
        let df = g * th + g * k * h * (1.0 - th * th);
        let dk = f / df;
        k -= dk;
        if dk.abs() <= NEWTON_TOLERANCE * k.abs() {
            break;
        }
    }
    k
}

/// Group velocity of a wave with frequency `w` and wave number `k`
pub fn group_velocity(w: f64, k: f64, depth: WaterDepth, g: f64) -> f64 {
    match depth {
        WaterDepth::Finite(h) if h > 0.0 && k > 0.0 => {
            let kh2 = 2.0 * k * h;
            let ratio = if kh2 > 700.0 { 0.0 } else { kh2 / kh2.sinh() };
            0.5 * (w / k) * (1.0 + ratio)
        }
        _ => g / (2.0 * w),
    }
}

impl HydroStore {
    /// Move the incident wave phase reference by `(dx, dy)`
    ///
    /// Excitation, scattering, Froude-Krylov forces and RAOs are multiplied by
    /// `exp(i·k·(dx·cosθ + dy·sinθ))`.
    pub fn shift_wave_reference(&mut self, dx: f64, dy: f64) {
        let (depth, g) = (self.h, self.g);
        let k: Vec<f64> = self.w.iter().map(|&w| wave_number(w, depth, g)).collect();
        let head: Vec<f64> = self.head.clone();
        for t in self.first_order_mut().into_iter().flatten() {
            for ((_, ih, ifr, _), v) in t.indexed_iter_mut() {
                if let Some(z) = v {
                    let theta = head[ih].to_radians();
                    let phase = k[ifr] * (dx * theta.cos() + dy * theta.sin());
                    *z *= Complex64::from_polar(1.0, phase);
                }
            }
        }
        log::debug!("{}: wave reference shifted by ({dx}, {dy})", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HydroConfig;
    use crate::store::Family;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispersion_relation() {
        let g = 9.81;
        let k = wave_number(1.0, WaterDepth::Finite(10.0), g);
        assert_relative_eq!(g * k * (k * 10.0).tanh(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(wave_number(1.0, WaterDepth::Infinite, g), 1.0 / g);
        let deep = wave_number(2.0, WaterDepth::Finite(1000.0), g);
        assert_relative_eq!(deep, 4.0 / g, max_relative = 1e-10);
    }

    #[test]
    fn test_group_velocity_limits() {
        let g = 9.81;
        let w = 1.5;
        let deep = group_velocity(w, w * w / g, WaterDepth::Infinite, g);
        assert_relative_eq!(deep, g / (2.0 * w));
        let k = wave_number(w, WaterDepth::Finite(5000.0), g);
        let cg = group_velocity(w, k, WaterDepth::Finite(5000.0), g);
        assert_relative_eq!(cg, deep, max_relative = 1e-8);
        let shallow_k = wave_number(0.05, WaterDepth::Finite(2.0), g);
        let shallow = group_velocity(0.05, shallow_k, WaterDepth::Finite(2.0), g);
        assert_relative_eq!(shallow, (g * 2.0_f64).sqrt(), max_relative = 1e-3);
    }

    #[test]
    fn test_shift_wave_reference_changes_phase_only() {
        let mut s = HydroStore::new(1, vec![1.0], vec![0.0, 90.0], &HydroConfig::default());
        s.h = WaterDepth::Infinite;
        s.init(Family::Ex);
        s.ex.as_mut().unwrap()[[0, 0, 0, 0]] = Some(Complex64::new(2.0, 0.0));
        s.ex.as_mut().unwrap()[[0, 1, 0, 0]] = Some(Complex64::new(2.0, 0.0));
        s.shift_wave_reference(3.0, 0.0);
        let ex = s.ex.as_ref().unwrap();
        let z = ex[[0, 0, 0, 0]].unwrap();
        assert_relative_eq!(z.norm(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(z.arg(), 3.0 / 9.81, epsilon = 1e-12);
        let z90 = ex[[0, 1, 0, 0]].unwrap();
        assert_relative_eq!(z90.im, 0.0, epsilon = 1e-12);
    }
}
