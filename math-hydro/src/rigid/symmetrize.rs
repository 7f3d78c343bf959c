//! Symmetrization of radiation coefficients and QTFs

use crate::numeric::avg_safe;
use crate::store::{CoefTensor, HydroStore, QtfTensor};
use ndarray::{ArrayViewMut2, Axis};

fn symmetrize_matrix(mut m: ArrayViewMut2<'_, Option<f64>>) {
    let n = m.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = avg_safe(m[[i, j]], m[[j, i]]);
            m[[i, j]] = avg;
            m[[j, i]] = avg;
        }
    }
}

fn symmetrize_tensor(t: &mut CoefTensor) {
    for slice in t.axis_iter_mut(Axis(2)) {
        symmetrize_matrix(slice);
    }
}

/// Symmetrize every `Nq×Nq` matrix; `conjugate` for the difference-frequency relation
fn symmetrize_qtf(t: &mut QtfTensor, conjugate: bool) {
    let (nb, nh, nd, nq, _) = t.dim();
    for ib in 0..nb {
        for ih in 0..nh {
            for d in 0..nd {
                for i in 0..nq {
                    for j in (i + 1)..nq {
                        let upper = t[[ib, ih, d, i, j]];
                        let lower = t[[ib, ih, d, j, i]];
                        if conjugate {
                            let avg = avg_safe(upper, lower.map(|z| z.conj()));
                            t[[ib, ih, d, i, j]] = avg;
                            t[[ib, ih, d, j, i]] = avg.map(|z| z.conj());
                        } else {
                            let avg = avg_safe(upper, lower);
                            t[[ib, ih, d, i, j]] = avg;
                            t[[ib, ih, d, j, i]] = avg;
                        }
                    }
                }
            }
        }
    }
}

impl HydroStore {
    /// Average `X[i][j]` and `X[j][i]` of every radiation family
    ///
    /// Covers `A`, `B`, `Ainf_w`, `A0`, `Ainf` and `Kirf`. A missing entry is
    /// excluded from the average, so a lone value is copied to its transpose.
    /// Sum-frequency QTFs become symmetric and difference-frequency QTFs
    /// Hermitian across the frequency pair. Idempotent.
    pub fn symmetrize(&mut self) {
        for t in [&mut self.a, &mut self.b, &mut self.ainf_w, &mut self.kirf]
            .into_iter()
            .flatten()
        {
            symmetrize_tensor(t);
        }
        for m in [&mut self.a0, &mut self.ainf].into_iter().flatten() {
            symmetrize_matrix(m.view_mut());
        }
        if let Some(t) = &mut self.qtfsum {
            symmetrize_qtf(t, false);
        }
        if let Some(t) = &mut self.qtfdif {
            symmetrize_qtf(t, true);
        }
        log::debug!("{}: symmetrized", self.name);
    }
}
