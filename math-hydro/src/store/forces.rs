//! First order force bookkeeping and per-DOF scaling

use super::{Derived, ForceTensor, HydroStore};
use crate::types::NDOF;
use ndarray::Zip;
use num_complex::Complex64;

/// First order wave force component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceKind {
    /// Total excitation
    Excitation,
    /// Diffraction (scattering) part
    Scattering,
    /// Froude-Krylov part
    FroudeKrylov,
}

impl HydroStore {
    /// Force tensor of a given kind
    pub fn forces(&self, kind: ForceKind) -> Option<&ForceTensor> {
        match kind {
            ForceKind::Excitation => self.ex.as_ref(),
            ForceKind::Scattering => self.sc.as_ref(),
            ForceKind::FroudeKrylov => self.fk.as_ref(),
        }
    }

    /// Unload the given force components
    pub fn reset_forces(&mut self, kinds: &[ForceKind]) {
        for kind in kinds {
            match kind {
                ForceKind::Excitation => self.ex = None,
                ForceKind::Scattering => self.sc = None,
                ForceKind::FroudeKrylov => self.fk = None,
            }
        }
        if kinds.contains(&ForceKind::Excitation) {
            self.invalidate(&[Derived::Rao, Derived::Haskind]);
        }
    }

    /// Complete whichever of `ex = sc + fk` is missing from the other two
    ///
    /// Returns the component that was built, if any.
    pub fn complete_forces(&mut self) -> Option<ForceKind> {
        fn combine(
            x: &ForceTensor,
            y: &ForceTensor,
            op: impl Fn(Complex64, Complex64) -> Complex64,
        ) -> ForceTensor {
            let mut out = ForceTensor::from_elem(x.raw_dim(), None);
            Zip::from(&mut out)
                .and(x)
                .and(y)
                .for_each(|o, &a, &b| *o = a.zip(b).map(|(a, b)| op(a, b)));
            out
        }

        let (built, tensor) = match (&self.ex, &self.sc, &self.fk) {
            (None, Some(sc), Some(fk)) => (ForceKind::Excitation, combine(sc, fk, |a, b| a + b)),
            (Some(ex), None, Some(fk)) => (ForceKind::Scattering, combine(ex, fk, |a, b| a - b)),
            (Some(ex), Some(sc), None) => (ForceKind::FroudeKrylov, combine(ex, sc, |a, b| a - b)),
            _ => return None,
        };
        match built {
            ForceKind::Excitation => self.ex = Some(tensor),
            ForceKind::Scattering => self.sc = Some(tensor),
            ForceKind::FroudeKrylov => self.fk = Some(tensor),
        }
        log::info!("completed {built:?} force from the other two components");
        Some(built)
    }

    /// Multiply every coefficient by `factor` once per index in `dofs`
    ///
    /// `dofs` are DOF numbers `0..6` applied to every body. Pair coefficients
    /// with both indices in the set are scaled by `factor²`. The kernel, state
    /// space and RAO are invalidated.
    pub fn multiply_dof(&mut self, factor: f64, dofs: &[usize]) {
        let selected = |i: usize| dofs.contains(&(i % NDOF));
        let pair = |i: usize, j: usize| {
            let mut f = 1.0;
            if selected(i) {
                f *= factor;
            }
            if selected(j) {
                f *= factor;
            }
            f
        };

        for t in self.coef_mut().into_iter().flatten() {
            for ((i, j, _), v) in t.indexed_iter_mut() {
                if let Some(x) = v {
                    *x *= pair(i, j);
                }
            }
        }
        for m in [&mut self.a0, &mut self.ainf].into_iter().flatten() {
            for ((i, j), v) in m.indexed_iter_mut() {
                if let Some(x) = v {
                    *x *= pair(i, j);
                }
            }
        }
        for body in &mut self.bodies {
            for m in [&mut body.m, &mut body.c].into_iter().flatten() {
                for ((i, j), v) in m.indexed_iter_mut() {
                    *v *= pair(i, j);
                }
            }
        }
        for t in [&mut self.ex, &mut self.sc, &mut self.fk]
            .into_iter()
            .flatten()
        {
            for ((_, _, _, d), v) in t.indexed_iter_mut() {
                if let Some(x) = v {
                    if selected(d) {
                        *x *= factor;
                    }
                }
            }
        }
        if let Some(t) = &mut self.md {
            for ((_, _, _, d), v) in t.indexed_iter_mut() {
                if let Some(x) = v {
                    if selected(d) {
                        *x *= factor;
                    }
                }
            }
        }
        for t in self.qtf_mut().into_iter().flatten() {
            for ((_, _, d, _, _), v) in t.indexed_iter_mut() {
                if let Some(x) = v {
                    if selected(d) {
                        *x *= factor;
                    }
                }
            }
        }

        self.invalidate(&[Derived::Kernel, Derived::StateSpace, Derived::Rao]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HydroConfig;
    use crate::store::Family;

    fn store() -> HydroStore {
        let mut s = HydroStore::new(1, vec![1.0, 2.0], vec![0.0], &HydroConfig::default());
        s.init(Family::Sc);
        s.init(Family::Fk);
        s.sc.as_mut().unwrap()[[0, 0, 1, 2]] = Some(Complex64::new(1.0, 2.0));
        s.fk.as_mut().unwrap()[[0, 0, 1, 2]] = Some(Complex64::new(3.0, -1.0));
        s
    }

    #[test]
    fn test_complete_excitation() {
        let mut s = store();
        assert_eq!(s.complete_forces(), Some(ForceKind::Excitation));
        let ex = s.ex.as_ref().unwrap();
        assert_eq!(ex[[0, 0, 1, 2]], Some(Complex64::new(4.0, 1.0)));
        assert_eq!(ex[[0, 0, 0, 0]], None);
        assert_eq!(s.complete_forces(), None);
    }

    #[test]
    fn test_complete_froude_krylov() {
        let mut s = store();
        s.complete_forces();
        s.reset_forces(&[ForceKind::FroudeKrylov]);
        assert_eq!(s.complete_forces(), Some(ForceKind::FroudeKrylov));
        assert_eq!(
            s.fk.as_ref().unwrap()[[0, 0, 1, 2]],
            Some(Complex64::new(3.0, -1.0))
        );
    }

    #[test]
    fn test_multiply_dof_scales_cross_terms_twice() {
        let mut s = store();
        s.init(Family::A);
        {
            let a = s.a.as_mut().unwrap();
            a[[1, 1, 0]] = Some(2.0);
            a[[1, 2, 0]] = Some(3.0);
            a[[0, 2, 0]] = Some(5.0);
        }
        s.multiply_dof(-1.0, &[1]);
        let a = s.a.as_ref().unwrap();
        assert_eq!(a[[1, 1, 0]], Some(2.0));
        assert_eq!(a[[1, 2, 0]], Some(-3.0));
        assert_eq!(a[[0, 2, 0]], Some(5.0));
        assert_eq!(
            s.sc.as_ref().unwrap()[[0, 0, 1, 2]],
            Some(Complex64::new(1.0, 2.0))
        );
    }
}
