//! Reordering of DOFs and bodies

use super::select_square;
use crate::store::HydroStore;
use crate::types::NDOF;
use ndarray::{Array2, Array4, Array5, Axis};

fn transposition(n: usize, a: usize, b: usize) -> Vec<usize> {
    let mut p: Vec<usize> = (0..n).collect();
    p.swap(a, b);
    p
}

fn swap_last_axis<T>(t: &mut Array4<T>, (ib1, d1): (usize, usize), (ib2, d2): (usize, usize)) {
    let (_, n1, n2, _) = t.dim();
    for i in 0..n1 {
        for j in 0..n2 {
            t.swap([ib1, i, j, d1], [ib2, i, j, d2]);
        }
    }
}

fn swap_qtf_dof<T>(t: &mut Array5<T>, (ib1, d1): (usize, usize), (ib2, d2): (usize, usize)) {
    let (_, nh, _, nq1, nq2) = t.dim();
    for h in 0..nh {
        for i in 0..nq1 {
            for j in 0..nq2 {
                t.swap([ib1, h, d1, i, j], [ib2, h, d2, i, j]);
            }
        }
    }
}

/// Exchange the entries of `m1` involving `d1` with the entries of `m2` involving `d2`
///
/// Slot `(r, c)` of `m1` pairs with `(τ(r), τ(c))` of `m2`, `τ` exchanging `d1` and `d2`.
fn swap_body_matrices(m1: &mut Array2<f64>, m2: &mut Array2<f64>, d1: usize, d2: usize) {
    let tau = |k: usize| {
        if k == d1 {
            d2
        } else if k == d2 {
            d1
        } else {
            k
        }
    };
    for r in 0..NDOF {
        for c in 0..NDOF {
            if r == d1 || c == d1 {
                std::mem::swap(&mut m1[[r, c]], &mut m2[[tau(r), tau(c)]]);
            }
        }
    }
}

fn swap_matrix_field(
    a: &mut Option<Array2<f64>>,
    b: &mut Option<Array2<f64>>,
    d1: usize,
    d2: usize,
    name: &str,
) {
    match (a, b) {
        (Some(m1), Some(m2)) => swap_body_matrices(m1, m2, d1, d2),
        (None, None) => {}
        _ => log::warn!("{name} is loaded for one body only, left unchanged by DOF swap"),
    }
}

impl HydroStore {
    /// Exchange DOF `idof1` of body `ib1` with DOF `idof2` of body `ib2`
    ///
    /// Applying the same swap twice restores every tensor.
    pub fn swap_dof(&mut self, ib1: usize, idof1: usize, ib2: usize, idof2: usize) {
        let nb = self.nb();
        assert!(ib1 < nb && ib2 < nb, "body index out of range (Nb = {nb})");
        assert!(idof1 < NDOF && idof2 < NDOF, "DOF index out of range");
        let (i1, i2) = (ib1 * NDOF + idof1, ib2 * NDOF + idof2);
        if i1 == i2 {
            return;
        }
        let perm = transposition(self.n6(), i1, i2);

        for t in self.coef_mut() {
            select_square(t, &perm);
        }
        select_square(&mut self.a0, &perm);
        select_square(&mut self.ainf, &perm);
        select_square(&mut self.kirf, &perm);
        select_square(&mut self.state_space, &perm);

        for t in self.first_order_mut().into_iter().flatten() {
            swap_last_axis(t, (ib1, idof1), (ib2, idof2));
        }
        if let Some(t) = &mut self.md {
            swap_last_axis(t, (ib1, idof1), (ib2, idof2));
        }
        for t in self.qtf_mut().into_iter().flatten() {
            swap_qtf_dof(t, (ib1, idof1), (ib2, idof2));
        }

        let mut drop_pots = false;
        if let Some(pots) = &mut self.pots_rad {
            if ib1 == ib2 {
                let p = &mut pots[ib1];
                let order = transposition(NDOF, idof1, idof2);
                *p = p.select(Axis(1), &order);
            } else if pots[ib1].dim().0 == pots[ib2].dim().0 {
                let (lo, hi) = pots.split_at_mut(ib1.max(ib2));
                let (p1, p2) = if ib1 < ib2 {
                    (&mut lo[ib1], &mut hi[0])
                } else {
                    (&mut hi[0], &mut lo[ib2])
                };
                let (np, _, nf) = p1.dim();
                for ip in 0..np {
                    for k in 0..nf {
                        std::mem::swap(&mut p1[[ip, idof1, k]], &mut p2[[ip, idof2, k]]);
                    }
                }
            } else {
                drop_pots = true;
            }
        }
        if drop_pots {
            log::warn!("bodies {ib1} and {ib2} have different panel counts, potentials cleared");
            self.pots_rad = None;
        }

        if ib1 == ib2 {
            let order = transposition(NDOF, idof1, idof2);
            let body = &mut self.bodies[ib1];
            for m in [
                &mut body.m,
                &mut body.c,
                &mut body.c_moor,
                &mut body.c_add,
                &mut body.d_lin,
                &mut body.d_quad,
            ]
            .into_iter()
            .flatten()
            {
                *m = m.select(Axis(0), &order).select(Axis(1), &order);
            }
        } else {
            let (lo, hi) = self.bodies.split_at_mut(ib1.max(ib2));
            let (b1, b2, d1, d2) = if ib1 < ib2 {
                (&mut lo[ib1], &mut hi[0], idof1, idof2)
            } else {
                (&mut lo[ib2], &mut hi[0], idof2, idof1)
            };
            swap_matrix_field(&mut b1.m, &mut b2.m, d1, d2, "M");
            swap_matrix_field(&mut b1.c, &mut b2.c, d1, d2, "C");
            swap_matrix_field(&mut b1.c_moor, &mut b2.c_moor, d1, d2, "Cmoor");
            swap_matrix_field(&mut b1.c_add, &mut b2.c_add, d1, d2, "Cadd");
            swap_matrix_field(&mut b1.d_lin, &mut b2.d_lin, d1, d2, "Dlin");
            swap_matrix_field(&mut b1.d_quad, &mut b2.d_quad, d1, d2, "Dquad");
        }
    }

    /// Exchange two bodies, including their names and rigid data
    pub fn swap_bodies(&mut self, ib1: usize, ib2: usize) {
        let nb = self.nb();
        assert!(ib1 < nb && ib2 < nb, "body index out of range (Nb = {nb})");
        if ib1 == ib2 {
            return;
        }
        let body_perm = transposition(nb, ib1, ib2);
        let perm: Vec<usize> = body_perm
            .iter()
            .flat_map(|&ib| (ib * NDOF)..((ib + 1) * NDOF))
            .collect();

        for t in self.coef_mut() {
            select_square(t, &perm);
        }
        select_square(&mut self.a0, &perm);
        select_square(&mut self.ainf, &perm);
        select_square(&mut self.kirf, &perm);
        select_square(&mut self.state_space, &perm);

        for t in self.first_order_mut() {
            super::select_in_place(t, Axis(0), &body_perm);
        }
        super::select_in_place(&mut self.md, Axis(0), &body_perm);
        for t in self.qtf_mut() {
            super::select_in_place(t, Axis(0), &body_perm);
        }
        if let Some(pots) = &mut self.pots_rad {
            pots.swap(ib1, ib2);
        }
        self.bodies.swap(ib1, ib2);
    }
}
