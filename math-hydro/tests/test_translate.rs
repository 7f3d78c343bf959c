mod common;

use common::{assert_complex_close, assert_option_close, flat, populated};
use math_hydro::{Body, Family, Point3D, Progress};

#[test]
fn test_translate_and_back_restores_coefficients() {
    let original = populated(2);
    let mut s = original.clone();
    let targets = [Point3D::new(1.0, -2.0, 0.5), Point3D::new(-3.0, 0.0, 2.0)];
    s.translate(&targets, false, &mut Progress::none()).unwrap();
    assert_eq!(s.bodies[1].c0, targets[1]);
    assert!(s.a.as_ref().unwrap() != original.a.as_ref().unwrap());

    s.translate(&[Point3D::zero(), Point3D::zero()], false, &mut Progress::none())
        .unwrap();
    for ib in 0..2 {
        assert_eq!(s.bodies[ib].c0, Point3D::zero());
    }
    assert_option_close(&flat(&s.a), &flat(&original.a), 1e-9);
    assert_option_close(&flat(&s.b), &flat(&original.b), 1e-9);
    assert_option_close(&flat(&s.md), &flat(&original.md), 1e-9);
    assert_complex_close(&flat(&s.ex), &flat(&original.ex), 1e-9);
    assert_complex_close(&flat(&s.qtfdif), &flat(&original.qtfdif), 1e-9);
    for (b, o) in s.bodies.iter().zip(&original.bodies) {
        let (m, mo) = (b.m.as_ref().unwrap(), o.m.as_ref().unwrap());
        for (x, y) in m.iter().zip(mo.iter()) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }
}

#[test]
fn test_mass_matrices_follow_each_body() {
    let mut s = populated(2);
    let targets = [Point3D::new(0.0, 1.0, 0.0), Point3D::new(2.0, 0.0, -1.0)];
    s.translate(&targets, false, &mut Progress::none()).unwrap();
    for (ib, body) in s.bodies.iter().enumerate() {
        let expected = Body::rigid_mass(1.0e3, [2.0e3, 3.0e3, 4.0e3], body.cg, targets[ib]);
        for (x, y) in body.m.as_ref().unwrap().iter().zip(expected.iter()) {
            assert!((x - y).abs() < 1e-6, "body {ib}: {x} vs {y}");
        }
    }
}

#[test]
fn test_translation_invalidates_derived_results() {
    let mut s = populated(1);
    s.init(Family::Rao);
    s.init(Family::Stiffness);
    s.init(Family::BHaskind);
    s.translate(&[Point3D::new(0.0, 0.0, 1.0)], false, &mut Progress::none())
        .unwrap();
    assert!(!s.is_loaded(Family::Rao));
    assert!(!s.is_loaded(Family::Stiffness));
    assert!(!s.is_loaded(Family::BHaskind));
    assert!(s.is_loaded(Family::A));
    assert!(s.is_loaded(Family::Mass));
}

#[test]
fn test_kernel_is_recomputed_at_previous_cutoff() {
    let config = common::config();
    let mut s = populated(1);
    s.compute_kernel(&config, &mut Progress::none()).unwrap();
    let (max_t, nt) = (*s.tirf.last().unwrap(), s.nt());

    s.translate(&[Point3D::new(1.0, 0.0, -1.0)], false, &mut Progress::none())
        .unwrap();
    assert_eq!(s.nt(), nt);
    assert!((s.tirf.last().unwrap() - max_t).abs() < 1e-12);

    let mut fresh = s.clone();
    fresh.compute_kernel_at(max_t, nt, &mut Progress::none()).unwrap();
    assert_option_close(&flat(&s.kirf), &flat(&fresh.kirf), 1e-12);
}

#[test]
fn test_partial_dof_block_is_refused() {
    let mut s = populated(2);
    s.ex.as_mut().unwrap()[[1, 2, 3, 4]] = None;
    let before = s.clone();
    let err = s
        .translate(&[Point3D::zero(), Point3D::new(0.0, 1.0, 0.0)], false, &mut Progress::none())
        .unwrap_err();
    assert!(err.is_invalid_geometry());
    assert_eq!(s.a, before.a);
    assert_eq!(s.bodies[1].c0, before.bodies[1].c0);

    s.translate(&[Point3D::zero(), Point3D::new(0.0, 1.0, 0.0)], true, &mut Progress::none())
        .unwrap();
    assert!(s.ex.as_ref().unwrap()[[1, 2, 3, 4]].is_some());
}

#[test]
fn test_cancellation_leaves_store_unchanged() {
    let mut s = populated(1);
    let before = s.clone();
    let mut stages = Vec::new();
    let mut cb = |stage: &str, pct: i32| {
        stages.push(stage.to_string());
        pct < 30
    };
    let mut progress = Progress::new(&mut cb);
    let err = s
        .translate(&[Point3D::new(5.0, 5.0, 5.0)], false, &mut progress)
        .unwrap_err();
    drop(progress);
    assert!(err.is_cancelled());
    assert_eq!(stages.len(), 3);
    assert_eq!(s.a, before.a);
    assert_eq!(s.ex, before.ex);
    assert_eq!(s.bodies[0].m, before.bodies[0].m);
    assert_eq!(s.bodies[0].c0, Point3D::zero());
}
