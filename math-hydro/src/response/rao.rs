//! Response amplitude operators
//!
//! For each body, frequency and heading
//!
//! ```text
//! Z(w) = C − w²·(M + A) + i·w·(B + D + D_extra)
//! RAO  = Fᵗ·Z⁻¹
//! ```
//!
//! with `C = C_hydro + C_moor + C_add`, `D = D_lin` and the critical damping
//! term `D_extra = 2·ζ·√C·√(M + A)`. Missing added mass, damping and force
//! entries are taken as zero.

use crate::error::{HydroError, Result};
use crate::parallel::parallel_map_indexed;
use crate::store::{CoefTensor, Derived, Family, ForceTensor, HydroStore};
use crate::types::{Body, NDOF};
use linalg::{LinalgError, lu_factorize, sqrt_matrix};
use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;

const OP: &str = "compute_rao";

/// Complex impedance of one body at one frequency
pub fn impedance(
    w: f64,
    mass: &Array2<f64>,
    stiffness: &Array2<f64>,
    added_mass: &Array2<f64>,
    damping: &Array2<f64>,
) -> Array2<Complex64> {
    Array2::from_shape_fn(mass.raw_dim(), |(i, j)| {
        Complex64::new(
            stiffness[[i, j]] - w * w * (mass[[i, j]] + added_mass[[i, j]]),
            w * damping[[i, j]],
        )
    })
}

/// Row vector `x` with `x·Z = f`
pub fn solve_response(
    z: &Array2<Complex64>,
    f: &Array1<Complex64>,
) -> std::result::Result<Array1<Complex64>, LinalgError> {
    lu_factorize(&z.t().to_owned())?.solve(f)
}

/// Critical damping term `2·ζ·√C·√(M + A)`
pub fn critical_damping(
    zeta: f64,
    stiffness: &Array2<f64>,
    inertia: &Array2<f64>,
) -> std::result::Result<Array2<f64>, LinalgError> {
    if zeta == 0.0 {
        return Ok(Array2::zeros(stiffness.raw_dim()));
    }
    Ok(sqrt_matrix(stiffness)?.dot(&sqrt_matrix(inertia)?) * (2.0 * zeta))
}

/// Sum of the matrices that are present, zeros otherwise
fn total(mats: &[&Option<Array2<f64>>]) -> Array2<f64> {
    let mut sum = Array2::zeros((NDOF, NDOF));
    for m in mats.iter().copied().flatten() {
        sum += m;
    }
    sum
}

/// Diagonal 6×6 block of body `ib` at frequency `ifr`, missing as zero
fn body_block(t: &Option<CoefTensor>, ib: usize, ifr: usize) -> Array2<f64> {
    let o = NDOF * ib;
    match t {
        Some(t) => Array2::from_shape_fn((NDOF, NDOF), |(i, j)| t[[o + i, o + j, ifr]].unwrap_or(0.0)),
        None => Array2::zeros((NDOF, NDOF)),
    }
}

/// `(Nh, Nf, 6)` RAO of one body; the store must be dimensional
fn body_rao(s: &HydroStore, ex: &ForceTensor, ib: usize, zeta: f64) -> Result<Array3<Option<Complex64>>> {
    let body: &Body = &s.bodies[ib];
    let singular = |ifr: usize, ih: usize, source: LinalgError| HydroError::SingularSystem {
        operation: OP,
        body: ib,
        ifr,
        ih,
        source,
    };
    let mass = body
        .m
        .clone()
        .ok_or_else(|| HydroError::insufficient(OP, format!("mass matrix of body {ib}")))?;
    let stiffness = total(&[&body.c, &body.c_moor, &body.c_add]);
    let d_lin = total(&[&body.d_lin]);

    let (nh, nf) = (s.nh(), s.nf());
    let mut out = Array3::from_elem((nh, nf, NDOF), None);
    for ifr in 0..nf {
        let w = s.w[ifr];
        let a = body_block(&s.a, ib, ifr);
        let b = body_block(&s.b, ib, ifr);
        let extra = critical_damping(zeta, &stiffness, &(&mass + &a)).map_err(|e| singular(ifr, 0, e))?;
        let z = impedance(w, &mass, &stiffness, &a, &(&b + &d_lin + &extra));
        let lu = lu_factorize(&z.t().to_owned()).map_err(|e| singular(ifr, 0, e))?;
        for ih in 0..nh {
            let f = Array1::from_shape_fn(NDOF, |d| ex[[ib, ih, ifr, d]].unwrap_or_default());
            let x = lu.solve(&f).map_err(|e| singular(ifr, ih, e))?;
            for (d, v) in x.into_iter().enumerate() {
                out[[ih, ifr, d]] = Some(v);
            }
        }
    }
    Ok(out)
}

impl HydroStore {
    /// Solve the RAO of every body, frequency and heading into `rao`
    ///
    /// `zeta` is the fraction of critical damping added on top of `B + D_lin`.
    /// Requires added mass, damping, excitation, mass and hydrostatic
    /// stiffness. Fails with [`HydroError::SingularSystem`] at the first
    /// frequency/heading whose impedance cannot be inverted.
    pub fn compute_rao(&mut self, zeta: f64) -> Result<()> {
        self.validate_dimensions(OP)?;
        self.require(
            OP,
            &[Family::A, Family::B, Family::Ex, Family::Mass, Family::Stiffness],
        )?;

        self.dimensional_transaction(|work| {
            work.invalidate(&[Derived::Rao]);
            let nb = work.nb();
            let per_body = {
                let view: &HydroStore = work;
                let Some(ex) = &view.ex else {
                    return Err(HydroError::insufficient(OP, "excitation"));
                };
                parallel_map_indexed(nb, |ib| body_rao(view, ex, ib, zeta))
            };
            let mut rao = work.empty_forces();
            for (ib, r) in per_body.into_iter().enumerate() {
                let r = r?;
                rao.index_axis_mut(ndarray::Axis(0), ib).assign(&r);
            }
            work.rao = Some(rao);
            log::info!("{}: RAO for {} bodies, ζ = {zeta}", work.name, nb);
            Ok(())
        })
    }
}
