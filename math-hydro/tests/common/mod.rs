//! Synthetic coefficient sets shared by the integration tests

#![allow(dead_code)]

use math_hydro::{Body, Family, HeadingPair, HydroConfig, HydroStore, NDOF, Point3D, WaterDepth};
use ndarray::{Array, Dimension};
use num_complex::Complex64;

pub fn config() -> HydroConfig {
    HydroConfig::default()
}

/// Smooth, fully populated store with `nb` bodies
///
/// Added mass and damping carry cross-body coupling, forces and drift vary
/// with every index so that permutations and transforms are detectable.
pub fn populated(nb: usize) -> HydroStore {
    let w: Vec<f64> = (0..8).map(|k| 0.3 + 0.1 * k as f64).collect();
    let head: Vec<f64> = (0..4).map(|k| k as f64 * 90.0).collect();
    let mut s = HydroStore::new(nb, w, head, &config());
    s.name = "synthetic".into();
    s.h = WaterDepth::Infinite;

    s.init(Family::A);
    s.init(Family::B);
    s.init(Family::Ex);
    s.mdhead = vec![HeadingPair::uni(0.0), HeadingPair::uni(90.0)];
    s.init(Family::Md);
    s.qw = vec![0.4, 0.6, 0.8];
    s.qhead = vec![HeadingPair::uni(0.0), HeadingPair::uni(180.0)];
    s.init(Family::QtfDif);

    let n6 = s.n6();
    let w = s.w.clone();
    let a = s.a.as_mut().unwrap();
    let b = s.b.as_mut().unwrap();
    for i in 0..n6 {
        for j in 0..n6 {
            for (ifr, &wf) in w.iter().enumerate() {
                let base = if i == j { 50.0 + i as f64 } else { 1.0 + 0.1 * (i + 2 * j) as f64 };
                a[[i, j, ifr]] = Some(base + 2.0 * wf);
                b[[i, j, ifr]] = Some((0.5 + 0.05 * (i * n6 + j) as f64) * wf * (-wf).exp());
            }
        }
    }

    let nh = s.nh();
    let ex = s.ex.as_mut().unwrap();
    let md = s.md.as_mut().unwrap();
    let qtf = s.qtfdif.as_mut().unwrap();
    for ib in 0..nb {
        for ifr in 0..w.len() {
            for d in 0..NDOF {
                for ih in 0..nh {
                    let phase = 0.2 * (ih + d) as f64 + w[ifr];
                    ex[[ib, ih, ifr, d]] = Some(Complex64::from_polar(1.0 + (ib + d) as f64, phase));
                }
                for imd in 0..2 {
                    md[[ib, imd, ifr, d]] = Some(0.1 * (1 + ib + imd + d) as f64 * w[ifr]);
                }
            }
        }
        for iqh in 0..2 {
            for d in 0..NDOF {
                for i1 in 0..3 {
                    for i2 in 0..3 {
                        qtf[[ib, iqh, d, i1, i2]] = Some(Complex64::new(
                            (1 + ib + iqh + d) as f64,
                            0.3 * (i1 as f64 - i2 as f64),
                        ));
                    }
                }
            }
        }
    }

    for (ib, body) in s.bodies.iter_mut().enumerate() {
        let cg = Point3D::new(0.5 * ib as f64, 0.0, -1.0);
        body.cg = cg;
        body.m = Some(Body::rigid_mass(1.0e3, [2.0e3, 3.0e3, 4.0e3], cg, Point3D::zero()));
    }
    s
}

/// One body over `w` with constant added mass and damping on every pair
pub fn constant_coefficients(w: Vec<f64>, a: f64, b: f64) -> HydroStore {
    let mut s = HydroStore::new(1, w, vec![0.0], &config());
    s.init(Family::A);
    s.init(Family::B);
    s.a.as_mut().unwrap().fill(Some(a));
    s.b.as_mut().unwrap().fill(Some(b));
    s
}

/// Uncoupled body of mass `m` on every DOF, heave stiffness `k`, heave force only
pub fn heave_oscillator(w: Vec<f64>, nh: usize, m: f64, k: f64, force: Complex64) -> HydroStore {
    let head: Vec<f64> = (0..nh).map(|i| i as f64 * 360.0 / nh as f64).collect();
    let mut s = HydroStore::new(1, w, head, &config());
    s.init(Family::A);
    s.init(Family::B);
    s.init(Family::Ex);
    s.init(Family::Mass);
    s.init(Family::Stiffness);
    let body = &mut s.bodies[0];
    if let Some(mass) = body.m.as_mut() {
        for d in 0..NDOF {
            mass[[d, d]] = m;
        }
    }
    if let Some(c) = body.c.as_mut() {
        c[[2, 2]] = k;
    }
    if let Some(ex) = s.ex.as_mut() {
        ex.fill(Some(Complex64::new(0.0, 0.0)));
        ex.slice_mut(ndarray::s![0, .., .., 2]).fill(Some(force));
    }
    s
}

/// Elements of an optional tensor in logical order, empty when not loaded
pub fn flat<T: Clone, D: Dimension>(t: &Option<Array<T, D>>) -> Vec<T> {
    t.as_ref().map(|a| a.iter().cloned().collect()).unwrap_or_default()
}

pub fn assert_option_close(a: &[Option<f64>], b: &[Option<f64>], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        match (x, y) {
            (Some(x), Some(y)) => assert!(
                (x - y).abs() <= tol * (1.0 + y.abs()),
                "{x} differs from {y}"
            ),
            (None, None) => {}
            _ => panic!("presence differs: {x:?} vs {y:?}"),
        }
    }
}

pub fn assert_complex_close(a: &[Option<Complex64>], b: &[Option<Complex64>], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        match (x, y) {
            (Some(x), Some(y)) => assert!(
                (x - y).norm() <= tol * (1.0 + y.norm()),
                "{x} differs from {y}"
            ),
            (None, None) => {}
            _ => panic!("presence differs: {x:?} vs {y:?}"),
        }
    }
}
