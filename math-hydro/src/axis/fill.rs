//! Sorting and gap filling along the frequency and heading axes

use super::{apply_plan_to_axis, gap_plan, min_positive_step, resample_in_place, select_in_place};
use crate::numeric::argsort;
use crate::store::{Derived, HydroStore};
use ndarray::Axis;

fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &j)| i == j)
}

impl HydroStore {
    /// Sort first order frequencies ascending, permuting every dependent tensor
    pub fn sort_frequencies(&mut self) {
        let order = argsort(&self.w);
        if is_identity(&order) {
            return;
        }
        for t in self.coef_mut() {
            select_in_place(t, Axis(2), &order);
        }
        for t in self.first_order_mut() {
            select_in_place(t, Axis(2), &order);
        }
        select_in_place(&mut self.md, Axis(2), &order);
        if let Some(pots) = &mut self.pots_rad {
            for p in pots.iter_mut() {
                *p = p.select(Axis(2), &order);
            }
        }
        self.w = order.iter().map(|&i| self.w[i]).collect();
    }

    /// Sort QTF frequencies ascending along both axes
    pub fn sort_frequencies_qtf(&mut self) {
        let order = argsort(&self.qw);
        if is_identity(&order) {
            return;
        }
        for t in self.qtf_mut() {
            select_in_place(t, Axis(3), &order);
            select_in_place(t, Axis(4), &order);
        }
        self.qw = order.iter().map(|&i| self.qw[i]).collect();
    }

    /// Sort first order headings ascending
    pub fn sort_headings(&mut self) {
        let order = argsort(&self.head);
        if is_identity(&order) {
            return;
        }
        for t in self.first_order_mut() {
            select_in_place(t, Axis(1), &order);
        }
        self.head = order.iter().map(|&i| self.head[i]).collect();
    }

    /// Insert frequencies where the spacing exceeds `max_dw`
    ///
    /// `max_dw` defaults to the smallest existing spacing. Inserted samples are
    /// interpolated linearly, or set to zero when `zero` is true. Returns the
    /// number of inserted frequencies.
    pub fn fill_frequency_gaps(&mut self, zero: bool, max_dw: Option<f64>) -> usize {
        self.sort_frequencies();
        let Some(step) = max_dw.or_else(|| min_positive_step(&self.w)) else {
            return 0;
        };
        let plan = gap_plan(&self.w, step);
        let inserted = plan.len() - self.nf();
        if inserted == 0 {
            return 0;
        }

        for t in self.coef_mut() {
            resample_in_place(t, Axis(2), &plan, zero);
        }
        for t in self.first_order_mut() {
            resample_in_place(t, Axis(2), &plan, zero);
        }
        resample_in_place(&mut self.md, Axis(2), &plan, zero);
        if let Some(pots) = &mut self.pots_rad {
            for p in pots.iter_mut() {
                *p = super::resample(p, Axis(2), &plan, zero);
            }
        }
        self.w = apply_plan_to_axis(&self.w, &plan);
        log::info!(
            "filled frequency gaps wider than {step:.4} rad/s with {inserted} {} samples",
            if zero { "zero" } else { "interpolated" }
        );
        inserted
    }

    /// Insert QTF frequencies where the spacing exceeds `max_dw`, along both axes
    pub fn fill_frequency_gaps_qtf(&mut self, zero: bool, max_dw: Option<f64>) -> usize {
        self.sort_frequencies_qtf();
        let Some(step) = max_dw.or_else(|| min_positive_step(&self.qw)) else {
            return 0;
        };
        let plan = gap_plan(&self.qw, step);
        let inserted = plan.len() - self.nq();
        if inserted == 0 {
            return 0;
        }
        for t in self.qtf_mut() {
            resample_in_place(t, Axis(3), &plan, zero);
            resample_in_place(t, Axis(4), &plan, zero);
        }
        self.qw = apply_plan_to_axis(&self.qw, &plan);
        inserted
    }

    /// Insert headings where the spacing exceeds `max_dh`
    ///
    /// Haskind damping is invalidated when headings are inserted.
    pub fn fill_heading_gaps(&mut self, zero: bool, max_dh: Option<f64>) -> usize {
        self.sort_headings();
        let Some(step) = max_dh.or_else(|| min_positive_step(&self.head)) else {
            return 0;
        };
        let plan = gap_plan(&self.head, step);
        let inserted = plan.len() - self.nh();
        if inserted == 0 {
            return 0;
        }
        for t in self.first_order_mut() {
            resample_in_place(t, Axis(1), &plan, zero);
        }
        self.head = apply_plan_to_axis(&self.head, &plan);
        self.invalidate(&[Derived::Haskind]);
        inserted
    }
}
