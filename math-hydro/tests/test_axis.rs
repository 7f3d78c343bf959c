mod common;

use common::{assert_option_close, flat, populated};
use math_hydro::HydroStore;
use ndarray::s;

fn assert_same_data(a: &HydroStore, b: &HydroStore) {
    assert_eq!(a.w, b.w);
    assert_eq!(a.head, b.head);
    assert_eq!(a.a, b.a);
    assert_eq!(a.b, b.b);
    assert_eq!(a.ex, b.ex);
    assert_eq!(a.md, b.md);
    assert_eq!(a.qtfdif, b.qtfdif);
    assert_eq!(a.bodies, b.bodies);
}

#[test]
fn test_delete_then_fill_restores_linear_data() {
    let original = populated(1);
    let mut s = original.clone();
    s.delete_frequencies(&[3]);
    assert_eq!(s.nf(), 7);
    assert_eq!(s.a.as_ref().unwrap().dim().2, 7);

    let inserted = s.fill_frequency_gaps(false, None);
    assert_eq!(inserted, 1);
    assert_eq!(s.nf(), 8);
    for (x, y) in s.w.iter().zip(&original.w) {
        assert!((x - y).abs() < 1e-12);
    }
    // A and mean drift are linear in w
    assert_option_close(&flat(&s.a), &flat(&original.a), 1e-9);
    assert_option_close(&flat(&s.md), &flat(&original.md), 1e-9);
}

#[test]
fn test_zero_fill_inserts_zeros() {
    let mut s = populated(1);
    s.delete_frequencies(&[2, 3]);
    assert_eq!(s.fill_frequency_gaps(true, Some(0.1)), 2);
    let a = s.a.as_ref().unwrap();
    assert!(a.slice(s![.., .., 2..4]).iter().all(|v| *v == Some(0.0)));
    assert!(a.slice(s![.., .., 4]).iter().all(|v| v.is_some_and(|v| v != 0.0)));
}

#[test]
fn test_delete_body_keeps_remaining_blocks() {
    let original = populated(2);
    let mut s = original.clone();
    s.delete_bodies(&[0]);
    assert_eq!(s.nb(), 1);
    assert_eq!(s.n6(), 6);
    let (a, a0) = (s.a.as_ref().unwrap(), original.a.as_ref().unwrap());
    assert_eq!(a.slice(s![.., .., ..]), a0.slice(s![6.., 6.., ..]));
    let (ex, ex0) = (s.ex.as_ref().unwrap(), original.ex.as_ref().unwrap());
    assert_eq!(ex.slice(s![0, .., .., ..]), ex0.slice(s![1, .., .., ..]));
    assert_eq!(s.bodies[0], original.bodies[1]);
    assert!(s.validate_dimensions("test").is_ok());
}

#[test]
fn test_delete_heading_drops_force_slices() {
    let original = populated(1);
    let mut s = original.clone();
    s.delete_headings(&[1]);
    assert_eq!(s.head, vec![0.0, 180.0, 270.0]);
    let (ex, ex0) = (s.ex.as_ref().unwrap(), original.ex.as_ref().unwrap());
    assert_eq!(ex.slice(s![.., 1, .., ..]), ex0.slice(s![.., 2, .., ..]));
    assert_eq!(s.md, original.md);
}

#[test]
fn test_dof_swap_is_an_involution() {
    let original = populated(2);
    let mut s = original.clone();
    s.swap_dof(0, 1, 1, 4);
    assert_ne!(s.a, original.a);
    let (a, a0) = (s.a.as_ref().unwrap(), original.a.as_ref().unwrap());
    assert_eq!(a[[1, 1, 0]], a0[[10, 10, 0]]);
    s.swap_dof(0, 1, 1, 4);
    assert_same_data(&s, &original);
}

#[test]
fn test_body_swap_exchanges_blocks() {
    let original = populated(2);
    let mut s = original.clone();
    s.swap_bodies(0, 1);
    assert_eq!(s.bodies[0].name, original.bodies[1].name);
    let (a, a0) = (s.a.as_ref().unwrap(), original.a.as_ref().unwrap());
    assert_eq!(a.slice(s![..6, ..6, ..]), a0.slice(s![6.., 6.., ..]));
    assert_eq!(a.slice(s![..6, 6.., ..]), a0.slice(s![6.., ..6, ..]));
    s.swap_bodies(0, 1);
    assert_same_data(&s, &original);
}

#[test]
fn test_sort_headings_reorders_forces() {
    let original = populated(1);
    let mut s = original.clone();
    s.head = vec![270.0, 0.0, 90.0, 180.0];
    s.sort_headings();
    assert_eq!(s.head, vec![0.0, 90.0, 180.0, 270.0]);
    let (ex, ex0) = (s.ex.as_ref().unwrap(), original.ex.as_ref().unwrap());
    assert_eq!(ex.slice(s![.., 0, .., ..]), ex0.slice(s![.., 1, .., ..]));
    assert_eq!(ex.slice(s![.., 3, .., ..]), ex0.slice(s![.., 0, .., ..]));
}
