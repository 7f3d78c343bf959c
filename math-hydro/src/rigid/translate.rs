//! Translation of every coefficient tensor to new body reference points

use super::{BLOCK_VALUES, Block, classify, shift_moment, transform_block};
use crate::error::{HydroError, Result};
use crate::progress::Progress;
use crate::store::{CoefMatrix, CoefTensor, Derived, Family, HydroStore};
use crate::types::{NDOF, Point3D};
use ndarray::{Array, Array2, Axis, Dimension, RemoveAxis};
use std::ops::{Add, Mul, Sub};

const OP: &str = "translate";

fn partial(body: usize, detail: String) -> HydroError {
    HydroError::InvalidGeometry {
        operation: OP,
        body,
        detail,
    }
}

/// Apply the block transform to every `(ib, jb)` block of a square matrix
fn translate_matrix(m: &mut CoefMatrix, rs: &[Array2<f64>], force: bool, what: &str) -> Result<()> {
    let nb = rs.len();
    for ib in 0..nb {
        for jb in 0..nb {
            let values = (0..BLOCK_VALUES).map(|n| m[[NDOF * ib + n / NDOF, NDOF * jb + n % NDOF]]);
            let q = match classify(values, force) {
                Block::Missing => continue,
                Block::Partial(count) => {
                    return Err(partial(
                        ib,
                        format!("{what} block ({ib}, {jb}) has {count} of {BLOCK_VALUES} values"),
                    ));
                }
                Block::Full(v) => Array2::from_shape_fn((NDOF, NDOF), |(i, j)| v[i * NDOF + j]),
            };
            let out = transform_block(&q, &rs[ib], &rs[jb]);
            for ((i, j), &v) in out.indexed_iter() {
                m[[NDOF * ib + i, NDOF * jb + j]] = Some(v);
            }
        }
    }
    Ok(())
}

/// Frequency by frequency block transform of a `(N6, N6, n)` tensor
fn translate_tensor(t: &mut CoefTensor, rs: &[Array2<f64>], force: bool, what: &str) -> Result<()> {
    for (k, mut slice) in t.axis_iter_mut(Axis(2)).enumerate() {
        let mut m = slice.to_owned();
        translate_matrix(&mut m, rs, force, &format!("{what} at frequency #{k}"))?;
        slice.assign(&m);
    }
    Ok(())
}

/// Moment transfer `M' = M − δ×F` on every 6-component lane of a body-major tensor
///
/// Axis 0 of `t` is the body, `dof_axis` the DOF axis.
fn translate_lanes<T, D>(
    t: &mut Array<Option<T>, D>,
    dof_axis: usize,
    deltas: &[Point3D],
    force: bool,
    what: &str,
) -> Result<()>
where
    T: Copy + Default + Mul<f64, Output = T> + Sub<Output = T> + Add<Output = T>,
    D: Dimension + RemoveAxis,
{
    for (ib, mut body) in t.axis_iter_mut(Axis(0)).enumerate() {
        for mut lane in body.lanes_mut(Axis(dof_axis - 1)) {
            match classify(lane.iter().copied(), force) {
                Block::Missing => {}
                Block::Partial(count) => {
                    return Err(partial(ib, format!("{what} has {count} of {NDOF} components")));
                }
                Block::Full(mut v) => {
                    shift_moment(&mut v, deltas[ib]);
                    for (slot, x) in lane.iter_mut().zip(v) {
                        *slot = Some(x);
                    }
                }
            }
        }
    }
    Ok(())
}

impl HydroStore {
    /// Move every body's reference point to `to[ib]`
    ///
    /// Added mass, damping, `Ainf_w`, `A0`, `Ainf` and body mass matrices get
    /// the rigid block transform. Forces, mean drift, QTFs and radiation
    /// potentials get the moment transfer. Crossed QTF heading pairs are
    /// dropped. A block with some but not all values present fails with
    /// [`HydroError::InvalidGeometry`] unless `force` is set, in which case
    /// missing values are taken as zero.
    ///
    /// Invalidates RAO, hydrostatic stiffness, external matrices, state space
    /// and Haskind damping. A loaded kernel is recomputed with its previous
    /// cutoff and resolution. The store is unchanged on error or cancellation.
    pub fn translate(&mut self, to: &[Point3D], force: bool, progress: &mut Progress<'_>) -> Result<()> {
        self.validate_dimensions(OP)?;
        if to.len() != self.nb() {
            return Err(HydroError::DimensionMismatch {
                operation: OP,
                what: "target points".into(),
                expected: self.nb(),
                got: to.len(),
            });
        }
        let progress = progress.for_operation(OP);

        self.dimensional_transaction(|work| {
            let deltas: Vec<Point3D> = work
                .bodies
                .iter()
                .zip(to)
                .map(|(b, &p)| p - b.c0)
                .collect();
            if deltas.iter().all(|d| d.is_zero(0.0)) {
                log::info!("{}: reference points unchanged", work.name);
            }
            let rs: Vec<Array2<f64>> = deltas.iter().map(Point3D::skew).collect();

            progress.step("Added mass and damping", 10)?;
            if let Some(a) = &mut work.a {
                translate_tensor(a, &rs, force, "A")?;
            }
            if let Some(b) = &mut work.b {
                translate_tensor(b, &rs, force, "B")?;
            }
            if let Some(t) = &mut work.ainf_w {
                translate_tensor(t, &rs, force, "Ainf_w")?;
            }

            progress.step("Asymptotic added mass", 20)?;
            if let Some(m) = &mut work.a0 {
                translate_matrix(m, &rs, force, "A0")?;
            }
            if let Some(m) = &mut work.ainf {
                translate_matrix(m, &rs, force, "Ainf")?;
            }
            for (body, r) in work.bodies.iter_mut().zip(&rs) {
                if let Some(m) = &mut body.m {
                    *m = transform_block(m, r, r);
                }
            }

            progress.step("First order forces", 30)?;
            for (t, what) in [
                (&mut work.ex, "excitation"),
                (&mut work.sc, "scattering"),
                (&mut work.fk, "Froude-Krylov"),
            ] {
                if let Some(t) = t {
                    translate_lanes(t, 3, &deltas, force, what)?;
                }
            }

            progress.step("Mean drift", 40)?;
            if let Some(t) = &mut work.md {
                translate_lanes(t, 3, &deltas, force, "mean drift")?;
            }

            progress.step("QTF", 50)?;
            if work.is_loaded(Family::QtfSum) || work.is_loaded(Family::QtfDif) {
                let crossed: Vec<usize> = work
                    .qhead
                    .iter()
                    .enumerate()
                    .filter(|(_, q)| q.is_crossed())
                    .map(|(i, _)| i)
                    .collect();
                if !crossed.is_empty() {
                    log::warn!(
                        "{}: dropping {} crossed QTF heading pairs before translation",
                        work.name,
                        crossed.len()
                    );
                    work.delete_headings_qtf(&crossed);
                }
                for (t, what) in [(&mut work.qtfsum, "sum QTF"), (&mut work.qtfdif, "difference QTF")] {
                    if let Some(t) = t {
                        translate_lanes(t, 2, &deltas, force, what)?;
                    }
                }
            }

            progress.step("Radiation potentials", 55)?;
            if let Some(pots) = &mut work.pots_rad {
                for (ib, p) in pots.iter_mut().enumerate() {
                    for mut lane in p.lanes_mut(Axis(1)) {
                        match classify(lane.iter().copied(), force) {
                            Block::Missing => {}
                            Block::Partial(count) => {
                                return Err(partial(
                                    ib,
                                    format!("radiation potential has {count} of {NDOF} components"),
                                ));
                            }
                            Block::Full(mut v) => {
                                shift_moment(&mut v, deltas[ib]);
                                for (slot, x) in lane.iter_mut().zip(v) {
                                    *slot = Some(x);
                                }
                            }
                        }
                    }
                }
            }

            for (body, &p) in work.bodies.iter_mut().zip(to) {
                body.c0 = p;
            }
            work.invalidate(&[
                Derived::Rao,
                Derived::Stiffness,
                Derived::ExternalMatrices,
                Derived::StateSpace,
                Derived::Haskind,
            ]);

            if work.is_loaded(Family::Kirf) {
                progress.step("Kernel", 60)?;
                let max_t = work.tirf.last().copied().unwrap_or(0.0);
                let num_t = work.nt();
                work.recompute_kernel(max_t, num_t);
            }
            log::info!("{}: translated {} bodies", work.name, work.nb());
            Ok(())
        })
    }
}
