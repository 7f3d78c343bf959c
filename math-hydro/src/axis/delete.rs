//! Removal of frequencies, headings and bodies

use super::{dof_indices, keep_indices, select_in_place, select_square};
use crate::store::{Derived, HydroStore};
use ndarray::Axis;

impl HydroStore {
    /// Remove first order frequencies by index
    ///
    /// Applies to A, B, Ainf_w, B_H, forces, RAO, mean drift and potentials.
    pub fn delete_frequencies(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nf(), indices, "frequency");
        for t in self.coef_mut() {
            select_in_place(t, Axis(2), &keep);
        }
        for t in self.first_order_mut() {
            select_in_place(t, Axis(2), &keep);
        }
        select_in_place(&mut self.md, Axis(2), &keep);
        if let Some(pots) = &mut self.pots_rad {
            for p in pots.iter_mut() {
                *p = p.select(Axis(2), &keep);
            }
        }
        self.w = keep.iter().map(|&i| self.w[i]).collect();
        log::info!("deleted {} frequencies, {} left", indices.len(), self.nf());
    }

    /// Remove QTF frequencies by index, along both frequency axes
    pub fn delete_frequencies_qtf(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nq(), indices, "QTF frequency");
        for t in self.qtf_mut() {
            select_in_place(t, Axis(3), &keep);
            select_in_place(t, Axis(4), &keep);
        }
        self.qw = keep.iter().map(|&i| self.qw[i]).collect();
    }

    /// Remove first order headings by index
    ///
    /// Haskind damping integrated over the old heading set is invalidated.
    pub fn delete_headings(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nh(), indices, "heading");
        if keep.len() == self.nh() {
            return;
        }
        for t in self.first_order_mut() {
            select_in_place(t, Axis(1), &keep);
        }
        self.head = keep.iter().map(|&i| self.head[i]).collect();
        self.invalidate(&[Derived::Haskind]);
    }

    /// Remove mean drift headings by index
    pub fn delete_headings_md(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nmdh(), indices, "mean drift heading");
        select_in_place(&mut self.md, Axis(1), &keep);
        self.mdhead = keep.iter().map(|&i| self.mdhead[i]).collect();
    }

    /// Remove QTF headings by index
    pub fn delete_headings_qtf(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nqh(), indices, "QTF heading");
        for t in self.qtf_mut() {
            select_in_place(t, Axis(1), &keep);
        }
        self.qhead = keep.iter().map(|&i| self.qhead[i]).collect();
    }

    /// Remove bodies by index
    ///
    /// Body-indexed tensors lose their slices, `6Nb` tensors lose the 6×6 blocks.
    pub fn delete_bodies(&mut self, indices: &[usize]) {
        let keep = keep_indices(self.nb(), indices, "body");
        let keep6 = dof_indices(&keep);

        for t in self.coef_mut() {
            select_square(t, &keep6);
        }
        select_square(&mut self.a0, &keep6);
        select_square(&mut self.ainf, &keep6);
        select_square(&mut self.kirf, &keep6);
        select_square(&mut self.state_space, &keep6);

        for t in self.first_order_mut() {
            select_in_place(t, Axis(0), &keep);
        }
        select_in_place(&mut self.md, Axis(0), &keep);
        for t in self.qtf_mut() {
            select_in_place(t, Axis(0), &keep);
        }
        if let Some(pots) = self.pots_rad.take() {
            self.pots_rad = Some(keep.iter().map(|&ib| pots[ib].clone()).collect());
        }
        self.bodies = keep.iter().map(|&ib| self.bodies[ib].clone()).collect();
        log::info!("deleted {} bodies, {} left", indices.len(), self.nb());
    }
}

#[cfg(test)]
mod tests {
    use crate::config::HydroConfig;
    use crate::store::{Family, HydroStore};
    use crate::types::HeadingPair;
    use num_complex::Complex64;

    fn store() -> HydroStore {
        let mut s = HydroStore::new(2, vec![1.0, 2.0, 3.0, 4.0], vec![0.0, 45.0, 90.0], &HydroConfig::default());
        s.init(Family::A);
        s.init(Family::Ex);
        s.mdhead = vec![HeadingPair::uni(0.0), HeadingPair::uni(90.0)];
        s.init(Family::Md);
        for ((i, j, k), v) in s.a.as_mut().unwrap().indexed_iter_mut() {
            *v = Some((100 * i + 10 * j + k) as f64);
        }
        for ((ib, ih, ifr, d), v) in s.ex.as_mut().unwrap().indexed_iter_mut() {
            *v = Some(Complex64::new((1000 * ib + 100 * ih + 10 * ifr + d) as f64, 0.0));
        }
        s
    }

    #[test]
    fn test_delete_frequencies_preserves_order() {
        let mut s = store();
        s.delete_frequencies(&[1]);
        assert_eq!(s.w, vec![1.0, 3.0, 4.0]);
        let a = s.a.as_ref().unwrap();
        assert_eq!(a.shape(), &[12, 12, 3]);
        assert_eq!(a[[0, 0, 1]], Some(2.0));
        assert_eq!(s.ex.as_ref().unwrap()[[0, 0, 1, 0]].unwrap().re, 20.0);
        assert_eq!(s.md.as_ref().unwrap().shape(), &[2, 2, 3, 6]);
        assert!(s.validate_dimensions("test").is_ok());
    }

    #[test]
    fn test_delete_headings() {
        let mut s = store();
        s.init(Family::BHaskind);
        s.delete_headings(&[0, 2]);
        assert_eq!(s.head, vec![45.0]);
        assert!(!s.is_loaded(Family::BHaskind));
        assert_eq!(s.ex.as_ref().unwrap()[[1, 0, 0, 0]].unwrap().re, 1100.0);
        s.delete_headings_md(&[1]);
        assert_eq!(s.mdhead.len(), 1);
        assert!(s.validate_dimensions("test").is_ok());
    }

    #[test]
    fn test_delete_bodies_removes_blocks() {
        let mut s = store();
        s.bodies[1].name = "second".into();
        s.delete_bodies(&[0]);
        assert_eq!(s.nb(), 1);
        assert_eq!(s.bodies[0].name, "second");
        let a = s.a.as_ref().unwrap();
        assert_eq!(a.shape(), &[6, 6, 4]);
        assert_eq!(a[[0, 1, 0]], Some((100 * 6 + 10 * 7) as f64));
        assert_eq!(s.ex.as_ref().unwrap()[[0, 0, 0, 0]].unwrap().re, 1000.0);
        assert!(s.validate_dimensions("test").is_ok());
    }

    #[test]
    #[should_panic]
    fn test_delete_out_of_range_panics() {
        let mut s = store();
        s.delete_frequencies(&[4]);
    }
}
