use linalg::C64;
use spin::{
    build_hamiltonian,
    generators::heisenberg_terms,
    information::{concurrence, density_matrix, entanglement_entropy_per_site_gs, fidelity_states},
    Spin,
};

#[test]
fn dimer_ground_state_is_maximally_entangled() {
    let spins = [Spin::HALF, Spin::HALF];
    let terms = heisenberg_terms(&[(0, 1)], &[1.0], 2).unwrap();
    let h = build_hamiltonian(&terms, &spins).unwrap();

    let s = entanglement_entropy_per_site_gs(&h, &spins).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s[0].abs() < 1e-9, "pure singlet has S = {}", s[0]);
    assert!((s[1] - 2.0_f64.ln()).abs() < 1e-9, "S = {}", s[1]);
}

#[test]
fn ferromagnetic_chain_mixes_degenerate_manifold() {
    // J < 0: triplet ground manifold, equal mixture of three states
    let spins = [Spin::HALF, Spin::HALF];
    let terms = heisenberg_terms(&[(0, 1)], &[-1.0], 2).unwrap();
    let h = build_hamiltonian(&terms, &spins).unwrap();

    let s = entanglement_entropy_per_site_gs(&h, &spins).unwrap();
    assert!((s[0] - 3.0_f64.ln()).abs() < 1e-9, "S = {}", s[0]);
}

#[test]
fn concurrence_of_pure_and_mixed_qubits() {
    let up = vec![C64::new(1.0, 0.0), C64::new(0.0, 0.0)];
    let down = vec![C64::new(0.0, 0.0), C64::new(1.0, 0.0)];

    let pure = density_matrix(&[up.clone()], &[1.0]).unwrap();
    assert!(concurrence(&pure).unwrap().abs() < 1e-12);

    let mixed = density_matrix(&[up, down], &[0.5, 0.5]).unwrap();
    assert!((concurrence(&mixed).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn fidelity_is_overlap_squared() {
    let r = 1.0 / 2.0_f64.sqrt();
    let plus = vec![C64::new(r, 0.0), C64::new(r, 0.0)];
    let up = vec![C64::new(1.0, 0.0), C64::new(0.0, 0.0)];
    let down = vec![C64::new(0.0, 0.0), C64::new(1.0, 0.0)];

    assert!((fidelity_states(&up, &up).unwrap() - 1.0).abs() < 1e-12);
    assert!(fidelity_states(&up, &down).unwrap().abs() < 1e-12);
    assert!((fidelity_states(&plus, &up).unwrap() - 0.5).abs() < 1e-12);
    assert!(fidelity_states(&up, &plus[..1]).is_err());
}
