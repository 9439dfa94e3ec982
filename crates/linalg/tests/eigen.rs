use linalg::{eigh, eigvalsh, LinalgError, Matrix, Operator, C64};

#[test]
fn real_symmetric_spectrum_is_ascending() {
    let m = Matrix::from_rows(&[
        vec![0.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0],
    ])
    .unwrap();
    let ee = eigvalsh(&Operator::Real(m)).unwrap();

    let s = 2.0_f64.sqrt();
    let expected = [-s, 0.0, s];
    for (e, x) in ee.iter().zip(expected) {
        assert!((e - x).abs() < 1e-12, "ee = {:?}", ee);
    }
}

#[test]
fn complex_hermitian_eigenpairs_satisfy_av_eq_lv() {
    let z = C64::new(0.0, 0.0);
    let mut m = Matrix::<C64>::zeros(2, 2);
    m.set(0, 0, C64::new(1.0, 0.0));
    m.set(0, 1, C64::new(0.0, -1.0));
    m.set(1, 0, C64::new(0.0, 1.0));
    m.set(1, 1, z);
    let op = Operator::Complex(m.clone());

    let evd = eigh(&op).unwrap();
    assert!(evd.values[0] <= evd.values[1]);

    for k in 0..2 {
        let v = evd.vector(k);
        for r in 0..2 {
            let mut av = z;
            for c in 0..2 {
                av += m.get(r, c) * v[c];
            }
            let lv = v[r] * evd.values[k];
            assert!((av - lv).norm() < 1e-10, "k = {}, r = {}", k, r);
        }
    }

    let values = eigvalsh(&op).unwrap();
    for (a, b) in values.iter().zip(&evd.values) {
        assert!((a - b).abs() < 1e-10);
    }
}

#[test]
fn diagonal_projection_of_base_operator_is_its_spectrum() {
    let m = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
    let op = Operator::Real(m);
    let evd = eigh(&op).unwrap();
    let proj = evd.diagonal_projection(&op).unwrap();

    assert!((proj[0] - 1.0).abs() < 1e-12, "proj = {:?}", proj);
    assert!((proj[1] - 3.0).abs() < 1e-12, "proj = {:?}", proj);
}

#[test]
fn non_square_input_is_rejected() {
    let op = Operator::Real(Matrix::zeros(2, 3));
    assert_eq!(
        eigvalsh(&op).unwrap_err(),
        LinalgError::NotSquare { rows: 2, cols: 3 }
    );
}
