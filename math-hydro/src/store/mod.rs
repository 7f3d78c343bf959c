//! Coefficient store: the canonical multi-dimensional data model
//!
//! ## Layout
//!
//! `N6 = 6·Nb` flattens (body, DOF) pairs. Every element is an `Option`, a
//! whole family that was never loaded is `None` at the field level.
//!
//! | field | shape |
//! |-------|-------|
//! | `a`, `b`, `ainf_w`, `b_haskind` | `(N6, N6, Nf)` |
//! | `a0`, `ainf` | `(N6, N6)` |
//! | `kirf` | `(N6, N6, NT)` over `tirf` |
//! | `ex`, `sc`, `fk`, `rao` | `(Nb, Nh, Nf, 6)` |
//! | `md` | `(Nb, Nmdh, Nf, 6)` over `mdhead` |
//! | `qtfsum`, `qtfdif` | `(Nb, Nqh, 6, Nq, Nq)` over `qw`, `qhead` |
//! | `state_space` | `(N6, N6)` |
//! | `pots_rad[ib]` | `(panel, 6, Nf)` |

pub mod check;
pub mod dimension;
pub mod forces;
pub mod qtf;

use crate::config::HydroConfig;
use crate::error::{HydroError, Result};
use crate::radiation::state_space::StateSpace;
use crate::types::{Body, HeadingPair, NDOF, Point3D, WaterDepth};
use ndarray::{Array2, Array3, Array4, Array5};
use num_complex::Complex64;

pub use forces::ForceKind;
pub use qtf::QtfPart;

/// `(N6, N6, n)` real coefficient tensor
pub type CoefTensor = Array3<Option<f64>>;
/// `(N6, N6)` real matrix with missing entries
pub type CoefMatrix = Array2<Option<f64>>;
/// `(Nb, Nh, Nf, 6)` complex first order force tensor
pub type ForceTensor = Array4<Option<Complex64>>;
/// `(Nb, Nmdh, Nf, 6)` mean drift tensor
pub type DriftTensor = Array4<Option<f64>>;
/// `(Nb, Nqh, 6, Nq, Nq)` QTF tensor
pub type QtfTensor = Array5<Option<Complex64>>;
/// `(panel, 6, Nf)` radiation potentials of one body
pub type PotentialTensor = Array3<Option<Complex64>>;

/// Tensor families that can be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Added mass
    A,
    /// Radiation damping
    B,
    /// Per-frequency infinite added mass estimate
    AinfW,
    /// Zero-frequency added mass
    A0,
    /// Infinite-frequency added mass
    Ainf,
    /// Damping from the Haskind relation
    BHaskind,
    /// Radiation impulse response
    Kirf,
    /// Excitation force
    Ex,
    /// Scattering force
    Sc,
    /// Froude-Krylov force
    Fk,
    /// Response amplitude operator
    Rao,
    /// Mean drift
    Md,
    /// Sum-frequency QTF
    QtfSum,
    /// Difference-frequency QTF
    QtfDif,
    /// State-space realizations
    StateSpace,
    /// Radiation potentials
    PotsRad,
    /// Mass matrix of every body
    Mass,
    /// Hydrostatic stiffness of every body
    Stiffness,
}

/// Derived quantities cleared by [`HydroStore::invalidate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derived {
    /// `rao`
    Rao,
    /// Body hydrostatic stiffness `C`
    Stiffness,
    /// `kirf` and `tirf`
    Kernel,
    /// `state_space`
    StateSpace,
    /// Body `Cmoor`, `Cadd`, `Dlin`, `Dquad`
    ExternalMatrices,
    /// `b_haskind`
    Haskind,
}

/// Hydrodynamic coefficients of one loaded case
#[derive(Debug, Clone)]
pub struct HydroStore {
    /// Case name
    pub name: String,
    /// Producing solver
    pub code: String,
    /// Fluid density (kg/m³)
    pub rho: f64,
    /// Gravity (m/s²)
    pub g: f64,
    /// Length scale for non-dimensional values (m)
    pub len: f64,
    /// Water depth
    pub h: WaterDepth,
    /// `true` when values are dimensional
    pub dimen: bool,

    /// Per-body rigid data, `Nb` entries
    pub bodies: Vec<Body>,
    /// Frequencies (rad/s)
    pub w: Vec<f64>,
    /// Headings (deg)
    pub head: Vec<f64>,

    /// Added mass
    pub a: Option<CoefTensor>,
    /// Radiation damping
    pub b: Option<CoefTensor>,
    /// Per-frequency estimate of the infinite-frequency added mass
    pub ainf_w: Option<CoefTensor>,
    /// Diagonal damping from the Haskind relation
    pub b_haskind: Option<CoefTensor>,
    /// Added mass at zero frequency
    pub a0: Option<CoefMatrix>,
    /// Added mass at infinite frequency
    pub ainf: Option<CoefMatrix>,

    /// Radiation impulse response
    pub kirf: Option<CoefTensor>,
    /// Time axis of `kirf` (s)
    pub tirf: Vec<f64>,

    /// Excitation force
    pub ex: Option<ForceTensor>,
    /// Scattering force
    pub sc: Option<ForceTensor>,
    /// Froude-Krylov force
    pub fk: Option<ForceTensor>,
    /// Response amplitude operator
    pub rao: Option<ForceTensor>,

    /// Mean drift headings
    pub mdhead: Vec<HeadingPair>,
    /// Mean drift force
    pub md: Option<DriftTensor>,

    /// QTF frequencies (rad/s)
    pub qw: Vec<f64>,
    /// QTF headings
    pub qhead: Vec<HeadingPair>,
    /// Sum-frequency QTF
    pub qtfsum: Option<QtfTensor>,
    /// Difference-frequency QTF
    pub qtfdif: Option<QtfTensor>,

    /// State-space realization per DOF pair
    pub state_space: Option<Array2<Option<StateSpace>>>,
    /// Radiation potentials per body
    pub pots_rad: Option<Vec<PotentialTensor>>,
}

impl HydroStore {
    /// Empty store for `nb` bodies over the given axes, nothing loaded
    pub fn new(nb: usize, w: Vec<f64>, head: Vec<f64>, config: &HydroConfig) -> Self {
        let bodies = (0..nb)
            .map(|ib| Body::new(format!("Body{}", ib + 1), Point3D::zero()))
            .collect();
        Self {
            name: String::new(),
            code: String::new(),
            rho: config.rho,
            g: config.g,
            len: config.len,
            h: WaterDepth::Unknown,
            dimen: true,
            bodies,
            w,
            head,
            a: None,
            b: None,
            ainf_w: None,
            b_haskind: None,
            a0: None,
            ainf: None,
            kirf: None,
            tirf: Vec::new(),
            ex: None,
            sc: None,
            fk: None,
            rao: None,
            mdhead: Vec::new(),
            md: None,
            qw: Vec::new(),
            qhead: Vec::new(),
            qtfsum: None,
            qtfdif: None,
            state_space: None,
            pots_rad: None,
        }
    }

    /// Number of bodies
    pub fn nb(&self) -> usize {
        self.bodies.len()
    }

    /// `6·Nb`
    pub fn n6(&self) -> usize {
        NDOF * self.bodies.len()
    }

    /// Number of frequencies
    pub fn nf(&self) -> usize {
        self.w.len()
    }

    /// Number of headings
    pub fn nh(&self) -> usize {
        self.head.len()
    }

    /// Number of QTF frequencies
    pub fn nq(&self) -> usize {
        self.qw.len()
    }

    /// Number of QTF headings
    pub fn nqh(&self) -> usize {
        self.qhead.len()
    }

    /// Number of mean drift headings
    pub fn nmdh(&self) -> usize {
        self.mdhead.len()
    }

    /// Number of kernel time samples
    pub fn nt(&self) -> usize {
        self.tirf.len()
    }

    /// All-missing coefficient tensor over the frequency axis
    pub fn empty_coef(&self) -> CoefTensor {
        Array3::from_elem((self.n6(), self.n6(), self.nf()), None)
    }

    /// All-missing `N6×N6` matrix
    pub fn empty_matrix(&self) -> CoefMatrix {
        Array2::from_elem((self.n6(), self.n6()), None)
    }

    /// All-missing first order force tensor
    pub fn empty_forces(&self) -> ForceTensor {
        Array4::from_elem((self.nb(), self.nh(), self.nf(), NDOF), None)
    }

    /// All-missing QTF tensor
    pub fn empty_qtf(&self) -> QtfTensor {
        Array5::from_elem((self.nb(), self.nqh(), NDOF, self.nq(), self.nq()), None)
    }

    /// Allocate `family` with every value missing
    ///
    /// Axes the family depends on (`tirf`, `mdhead`, `qw`, `qhead`) must be set first.
    /// Body matrices are allocated as zero matrices.
    pub fn init(&mut self, family: Family) {
        let n6 = self.n6();
        match family {
            Family::A => self.a = Some(self.empty_coef()),
            Family::B => self.b = Some(self.empty_coef()),
            Family::AinfW => self.ainf_w = Some(self.empty_coef()),
            Family::BHaskind => self.b_haskind = Some(self.empty_coef()),
            Family::A0 => self.a0 = Some(self.empty_matrix()),
            Family::Ainf => self.ainf = Some(self.empty_matrix()),
            Family::Kirf => self.kirf = Some(Array3::from_elem((n6, n6, self.nt()), None)),
            Family::Ex => self.ex = Some(self.empty_forces()),
            Family::Sc => self.sc = Some(self.empty_forces()),
            Family::Fk => self.fk = Some(self.empty_forces()),
            Family::Rao => self.rao = Some(self.empty_forces()),
            Family::Md => {
                self.md = Some(Array4::from_elem(
                    (self.nb(), self.nmdh(), self.nf(), NDOF),
                    None,
                ))
            }
            Family::QtfSum => self.qtfsum = Some(self.empty_qtf()),
            Family::QtfDif => self.qtfdif = Some(self.empty_qtf()),
            Family::StateSpace => self.state_space = Some(Array2::from_elem((n6, n6), None)),
            Family::PotsRad => self.pots_rad = Some(vec![Array3::from_elem((0, NDOF, self.nf()), None); self.nb()]),
            Family::Mass => {
                for b in &mut self.bodies {
                    b.m = Some(Array2::zeros((NDOF, NDOF)));
                }
            }
            Family::Stiffness => {
                for b in &mut self.bodies {
                    b.c = Some(Array2::zeros((NDOF, NDOF)));
                }
            }
        }
    }

    /// Allocate radiation potentials with `panels[ib]` panels per body
    pub fn init_potentials(&mut self, panels: &[usize]) {
        assert_eq!(panels.len(), self.nb(), "one panel count per body");
        let nf = self.nf();
        self.pots_rad = Some(
            panels
                .iter()
                .map(|&np| Array3::from_elem((np, NDOF, nf), None))
                .collect(),
        );
    }

    /// `true` when `family` is loaded
    pub fn is_loaded(&self, family: Family) -> bool {
        match family {
            Family::A => self.a.is_some(),
            Family::B => self.b.is_some(),
            Family::AinfW => self.ainf_w.is_some(),
            Family::BHaskind => self.b_haskind.is_some(),
            Family::A0 => self.a0.is_some(),
            Family::Ainf => self.ainf.is_some(),
            Family::Kirf => self.kirf.is_some() && !self.tirf.is_empty(),
            Family::Ex => self.ex.is_some(),
            Family::Sc => self.sc.is_some(),
            Family::Fk => self.fk.is_some(),
            Family::Rao => self.rao.is_some(),
            Family::Md => self.md.is_some(),
            Family::QtfSum => self.qtfsum.is_some(),
            Family::QtfDif => self.qtfdif.is_some(),
            Family::StateSpace => self.state_space.is_some(),
            Family::PotsRad => self.pots_rad.is_some(),
            Family::Mass => !self.bodies.is_empty() && self.bodies.iter().all(|b| b.m.is_some()),
            Family::Stiffness => {
                !self.bodies.is_empty() && self.bodies.iter().all(|b| b.c.is_some())
            }
        }
    }

    /// Fail with [`HydroError::InsufficientData`] unless every family is loaded
    pub fn require(&self, operation: &'static str, families: &[Family]) -> Result<()> {
        for &family in families {
            if !self.is_loaded(family) {
                return Err(HydroError::insufficient(
                    operation,
                    format!("{family:?} is not loaded"),
                ));
            }
        }
        Ok(())
    }

    /// Clear derived quantities
    pub fn invalidate(&mut self, fields: &[Derived]) {
        for field in fields {
            log::debug!("invalidating {field:?}");
            match field {
                Derived::Rao => self.rao = None,
                Derived::Stiffness => {
                    for b in &mut self.bodies {
                        b.c = None;
                    }
                }
                Derived::Kernel => {
                    self.kirf = None;
                    self.tirf.clear();
                }
                Derived::StateSpace => self.state_space = None,
                Derived::ExternalMatrices => {
                    for b in &mut self.bodies {
                        b.c_moor = None;
                        b.c_add = None;
                        b.d_lin = None;
                        b.d_quad = None;
                    }
                }
                Derived::Haskind => self.b_haskind = None,
            }
        }
    }

    /// Mutable handles on the four `(Nb, Nh, Nf, 6)` families
    pub(crate) fn first_order_mut(&mut self) -> [&mut Option<ForceTensor>; 4] {
        [&mut self.ex, &mut self.sc, &mut self.fk, &mut self.rao]
    }

    /// Mutable handles on the `(N6, N6, Nf)` families
    pub(crate) fn coef_mut(&mut self) -> [&mut Option<CoefTensor>; 4] {
        [
            &mut self.a,
            &mut self.b,
            &mut self.ainf_w,
            &mut self.b_haskind,
        ]
    }

    /// Mutable handles on the QTF families
    pub(crate) fn qtf_mut(&mut self) -> [&mut Option<QtfTensor>; 2] {
        [&mut self.qtfsum, &mut self.qtfdif]
    }

    /// Check every loaded tensor against the axes
    pub fn validate_dimensions(&self, operation: &'static str) -> Result<()> {
        let (nb, n6, nf, nh) = (self.nb(), self.n6(), self.nf(), self.nh());

        let coef = [
            ("A", &self.a),
            ("B", &self.b),
            ("Ainf_w", &self.ainf_w),
            ("B_H", &self.b_haskind),
        ];
        for (what, t) in coef {
            if let Some(t) = t {
                expect_shape(operation, what, t.shape(), &[n6, n6, nf])?;
            }
        }
        for (what, t) in [("A0", &self.a0), ("Ainf", &self.ainf)] {
            if let Some(t) = t {
                expect_shape(operation, what, t.shape(), &[n6, n6])?;
            }
        }
        if let Some(t) = &self.kirf {
            expect_shape(operation, "Kirf", t.shape(), &[n6, n6, self.nt()])?;
        }
        let first = [
            ("ex", &self.ex),
            ("sc", &self.sc),
            ("fk", &self.fk),
            ("rao", &self.rao),
        ];
        for (what, t) in first {
            if let Some(t) = t {
                expect_shape(operation, what, t.shape(), &[nb, nh, nf, NDOF])?;
            }
        }
        if let Some(t) = &self.md {
            expect_shape(operation, "md", t.shape(), &[nb, self.nmdh(), nf, NDOF])?;
        }
        let (nq, nqh) = (self.nq(), self.nqh());
        for (what, t) in [("qtfsum", &self.qtfsum), ("qtfdif", &self.qtfdif)] {
            if let Some(t) = t {
                expect_shape(operation, what, t.shape(), &[nb, nqh, NDOF, nq, nq])?;
            }
        }
        if let Some(t) = &self.state_space {
            expect_shape(operation, "state_space", t.shape(), &[n6, n6])?;
        }
        if let Some(pots) = &self.pots_rad {
            if pots.len() != nb {
                return Err(HydroError::DimensionMismatch {
                    operation,
                    what: "pots_rad bodies".into(),
                    expected: nb,
                    got: pots.len(),
                });
            }
            for p in pots {
                expect_shape(operation, "pots_rad", &p.shape()[1..], &[NDOF, nf])?;
            }
        }
        for (ib, body) in self.bodies.iter().enumerate() {
            let mats = [
                ("M", &body.m),
                ("C", &body.c),
                ("Cmoor", &body.c_moor),
                ("Cadd", &body.c_add),
                ("Dlin", &body.d_lin),
                ("Dquad", &body.d_quad),
            ];
            for (what, m) in mats {
                if let Some(m) = m {
                    expect_shape(
                        operation,
                        &format!("body {ib} {what}"),
                        m.shape(),
                        &[NDOF, NDOF],
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn expect_shape(
    operation: &'static str,
    what: &str,
    got: &[usize],
    expected: &[usize],
) -> Result<()> {
    for (axis, (&g, &e)) in got.iter().zip(expected).enumerate() {
        if g != e {
            return Err(HydroError::DimensionMismatch {
                operation,
                what: format!("{what} axis {axis}"),
                expected: e,
                got: g,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HydroStore {
        HydroStore::new(2, vec![0.5, 1.0, 1.5], vec![0.0, 90.0], &HydroConfig::default())
    }

    #[test]
    fn test_new_store_is_empty() {
        let s = store();
        assert_eq!(s.n6(), 12);
        assert!(!s.is_loaded(Family::A));
        assert!(!s.is_loaded(Family::Mass));
        assert!(s.require("test", &[Family::A]).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_init_is_all_missing() {
        let mut s = store();
        s.init(Family::A);
        s.init(Family::Ex);
        let a = s.a.as_ref().unwrap();
        assert_eq!(a.shape(), &[12, 12, 3]);
        assert!(a.iter().all(|v| v.is_none()));
        assert_eq!(s.ex.as_ref().unwrap().shape(), &[2, 2, 3, 6]);
        assert!(s.validate_dimensions("test").is_ok());
    }

    #[test]
    fn test_validate_detects_mismatch() {
        let mut s = store();
        s.init(Family::B);
        s.w.push(2.0);
        let err = s.validate_dimensions("test").unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert!(err.to_string().contains("B axis 2"));
    }

    #[test]
    fn test_invalidate() {
        let mut s = store();
        s.init(Family::Rao);
        s.init(Family::Stiffness);
        s.tirf = vec![0.0, 1.0];
        s.init(Family::Kirf);
        assert!(s.is_loaded(Family::Kirf));
        s.invalidate(&[Derived::Rao, Derived::Kernel, Derived::Stiffness]);
        assert!(!s.is_loaded(Family::Rao));
        assert!(!s.is_loaded(Family::Kirf));
        assert!(s.tirf.is_empty());
        assert!(s.bodies.iter().all(|b| b.c.is_none()));
    }
}
