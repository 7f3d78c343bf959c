//! Hydrostatic stiffness back-estimation from responses
//!
//! At every frequency and heading the restoring load balancing a response
//! `X = Re(RAO)` is `F = Re(F_ex) + w²·(M + A)·X`. Stacking all samples as
//! columns, `C` is the ridge least-squares fit of `F = C·X`.

use crate::error::{HydroError, Result};
use crate::store::{Family, HydroStore};
use crate::types::NDOF;
use linalg::ridge_regression;
use ndarray::{Array1, Array2};

/// Regularization of the stiffness fit
pub const RIDGE_LAMBDA: f64 = 0.1;

const OP: &str = "estimate_stiffness";

impl HydroStore {
    /// Best-fit dimensional 6×6 stiffness of every body
    ///
    /// Every frequency and heading is a sample. Missing RAO, excitation and
    /// added mass entries read as zero. The store is not modified.
    pub fn estimate_stiffness(&self) -> Result<Vec<Array2<f64>>> {
        self.validate_dimensions(OP)?;
        self.require(OP, &[Family::A, Family::Rao, Family::Ex, Family::Mass])?;
        let (nf, nh) = (self.nf(), self.nh());

        let mut out = Vec::with_capacity(self.nb());
        for (ib, body) in self.bodies.iter().enumerate() {
            let mass = body
                .m
                .as_ref()
                .ok_or_else(|| HydroError::insufficient(OP, format!("mass matrix of body {ib}")))?;
            let mut xs: Vec<Array1<f64>> = Vec::with_capacity(nf * nh);
            let mut fs: Vec<Array1<f64>> = Vec::with_capacity(nf * nh);
            let o = NDOF * ib;
            for ifr in 0..nf {
                let w = self.w[ifr];
                let inertia = Array2::from_shape_fn((NDOF, NDOF), |(i, j)| {
                    mass[[i, j]] + self.a_dim(o + i, o + j, ifr).unwrap_or(0.0)
                });
                for ih in 0..nh {
                    let x = Array1::from_shape_fn(NDOF, |d| self.rao_dim(ib, ih, ifr, d).map_or(0.0, |z| z.re));
                    let f = Array1::from_shape_fn(NDOF, |d| self.ex_dim(ib, ih, ifr, d).map_or(0.0, |z| z.re))
                        + inertia.dot(&x) * (w * w);
                    xs.push(x);
                    fs.push(f);
                }
            }
            if xs.is_empty() {
                return Err(HydroError::insufficient(
                    OP,
                    format!("no response samples for body {ib}"),
                ));
            }
            let n = xs.len();
            let x = Array2::from_shape_fn((NDOF, n), |(d, k)| xs[k][d]);
            let f = Array2::from_shape_fn((NDOF, n), |(d, k)| fs[k][d]);
            let c = ridge_regression(&f, &x, RIDGE_LAMBDA).map_err(|source| HydroError::SingularSystem {
                operation: OP,
                body: ib,
                ifr: 0,
                ih: 0,
                source,
            })?;
            log::debug!("{}: stiffness of body {ib} from {n} samples", self.name);
            out.push(c);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::HydroConfig;
    use crate::store::{Family, HydroStore};

    #[test]
    fn test_requires_rao() {
        let mut s = HydroStore::new(1, vec![1.0], vec![0.0], &HydroConfig::default());
        s.init(Family::Ex);
        s.init(Family::Mass);
        let err = s.estimate_stiffness().unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_requires_added_mass() {
        let mut s = HydroStore::new(1, vec![1.0], vec![0.0], &HydroConfig::default());
        s.init(Family::Ex);
        s.init(Family::Rao);
        s.init(Family::Mass);
        assert!(s.estimate_stiffness().unwrap_err().is_insufficient_data());
        s.init(Family::A);
        assert!(s.estimate_stiffness().is_ok());
    }

    #[test]
    fn test_missing_entries_read_as_zero() {
        let mut s = HydroStore::new(1, vec![1.0], vec![0.0], &HydroConfig::default());
        s.init(Family::A);
        s.init(Family::Ex);
        s.init(Family::Rao);
        s.init(Family::Mass);
        let c = s.estimate_stiffness().unwrap();
        assert_eq!(c.len(), 1);
        assert!(c[0].iter().all(|v| v.abs() < 1e-12));
    }
}
