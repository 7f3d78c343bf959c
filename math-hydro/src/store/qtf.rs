//! QTF accessors and mean drift extraction

use super::{DriftTensor, HydroStore};
use crate::error::{HydroError, Result};
use crate::numeric::{argsort, interp_linear};
use crate::types::NDOF;
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Scalar view of a complex QTF entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtfPart {
    /// Modulus, `'m'`
    Magnitude,
    /// Argument in `(−π, π]`, `'p'`
    Phase,
    /// Real part, `'r'`
    Real,
    /// Imaginary part, `'i'`
    Imag,
}

impl TryFrom<char> for QtfPart {
    type Error = HydroError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'm' => Ok(QtfPart::Magnitude),
            'p' => Ok(QtfPart::Phase),
            'r' => Ok(QtfPart::Real),
            'i' => Ok(QtfPart::Imag),
            other => Err(HydroError::Config(format!("unknown QTF part '{other}'"))),
        }
    }
}

impl QtfPart {
    /// Project a complex value
    pub fn apply(self, z: Complex64) -> f64 {
        match self {
            QtfPart::Magnitude => z.norm(),
            QtfPart::Phase => {
                let p = z.arg();
                if p <= -PI { p + 2.0 * PI } else { p }
            }
            QtfPart::Real => z.re,
            QtfPart::Imag => z.im,
        }
    }
}

impl HydroStore {
    /// One QTF entry projected by `part`
    pub fn qtf_value(
        &self,
        ib: usize,
        ih: usize,
        idof: usize,
        ifr1: usize,
        ifr2: usize,
        sum: bool,
        part: QtfPart,
    ) -> Option<f64> {
        let t = if sum { &self.qtfsum } else { &self.qtfdif };
        t.as_ref()?[[ib, ih, idof, ifr1, ifr2]].map(|z| part.apply(z))
    }

    /// Full `Nq×Nq` QTF matrix projected by `part`
    pub fn qtf_matrix(
        &self,
        ib: usize,
        ih: usize,
        idof: usize,
        sum: bool,
        part: QtfPart,
    ) -> Option<Array2<Option<f64>>> {
        let t = if sum { &self.qtfsum } else { &self.qtfdif };
        let t = t.as_ref()?;
        let nq = self.nq();
        Some(Array2::from_shape_fn((nq, nq), |(i, j)| {
            t[[ib, ih, idof, i, j]].map(|z| part.apply(z))
        }))
    }

    /// Mean drift from the diagonal of the difference-frequency QTF
    ///
    /// The diagonal is interpolated onto `w`; frequencies outside the QTF
    /// range stay missing. `mdhead` becomes `qhead`.
    pub fn copy_qtf_to_md(&mut self) -> Result<()> {
        const OP: &str = "copy_qtf_to_md";
        self.validate_dimensions(OP)?;
        let dif = self
            .qtfdif
            .as_ref()
            .ok_or_else(|| HydroError::insufficient(OP, "difference-frequency QTF is not loaded"))?;

        let order = argsort(&self.qw);
        let (nb, nqh, nf) = (self.nb(), self.nqh(), self.nf());
        let mut md = DriftTensor::from_elem((nb, nqh, nf, NDOF), None);
        for ib in 0..nb {
            for ih in 0..nqh {
                for idof in 0..NDOF {
                    let (x, y): (Vec<f64>, Vec<f64>) = order
                        .iter()
                        .filter_map(|&i| dif[[ib, ih, idof, i, i]].map(|z| (self.qw[i], z.re)))
                        .unzip();
                    for (ifr, &w) in self.w.iter().enumerate() {
                        md[[ib, ih, ifr, idof]] = interp_linear(&x, &y, w);
                    }
                }
            }
        }
        self.mdhead = self.qhead.clone();
        self.md = Some(md);
        Ok(())
    }
}
