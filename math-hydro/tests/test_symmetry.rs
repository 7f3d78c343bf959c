mod common;

use common::populated;

#[test]
fn test_radiation_coefficients_become_symmetric() {
    let original = populated(2);
    let mut s = original.clone();
    s.symmetrize();

    let (a, a0) = (s.a.as_ref().unwrap(), original.a.as_ref().unwrap());
    let n6 = s.n6();
    for i in 0..n6 {
        for j in 0..n6 {
            for ifr in 0..s.nf() {
                assert_eq!(a[[i, j, ifr]], a[[j, i, ifr]]);
                let mean = (a0[[i, j, ifr]].unwrap() + a0[[j, i, ifr]].unwrap()) / 2.0;
                assert!((a[[i, j, ifr]].unwrap() - mean).abs() < 1e-12);
            }
        }
    }
    let b = s.b.as_ref().unwrap();
    assert_eq!(b[[2, 9, 4]], b[[9, 2, 4]]);
}

#[test]
fn test_lone_value_is_mirrored() {
    let mut s = populated(1);
    s.a.as_mut().unwrap()[[1, 4, 0]] = None;
    let kept = s.a.as_ref().unwrap()[[4, 1, 0]];
    s.symmetrize();
    let a = s.a.as_ref().unwrap();
    assert_eq!(a[[1, 4, 0]], kept);
    assert_eq!(a[[4, 1, 0]], kept);
}

#[test]
fn test_difference_qtf_becomes_hermitian() {
    let mut s = populated(1);
    s.symmetrize();
    let q = s.qtfdif.as_ref().unwrap();
    for d in 0..6 {
        for i in 0..s.nq() {
            for j in 0..s.nq() {
                let (x, y) = (q[[0, 0, d, i, j]].unwrap(), q[[0, 0, d, j, i]].unwrap());
                assert!((x - y.conj()).norm() < 1e-12);
            }
        }
    }
}

#[test]
fn test_symmetrize_is_idempotent() {
    let mut s = populated(2);
    s.symmetrize();
    let once = s.clone();
    s.symmetrize();
    assert_eq!(s.a, once.a);
    assert_eq!(s.b, once.b);
    assert_eq!(s.qtfdif, once.qtfdif);
}
