use proptest::prelude::*;
use thermo::{
    log_partition, occupation_probabilities, precision_tier, thermal_state, PrecisionTier,
    Spectrum, ThermalConfig, ThermoError, BOLTZMANN,
};

fn sum(p: &[f64]) -> f64 {
    p.iter().sum()
}

#[test]
fn probabilities_are_normalized_on_native_branch() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![-0.01, -0.005, 0.0, 0.02]).unwrap();
    let t = 300.0;
    assert_eq!(precision_tier(&s, t, &cfg).unwrap(), PrecisionTier::Native);

    let p = occupation_probabilities(&s, t, &cfg).unwrap();
    assert!((sum(&p) - 1.0).abs() < 1e-6, "sum = {}", sum(&p));
    assert!(p.windows(2).all(|w| w[0] >= w[1]), "p = {:?}", p);
}

#[test]
fn probabilities_are_normalized_on_arbitrary_branch() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![-1.0, -0.9999, -0.9998, 0.5]).unwrap();
    let t = 1.0;
    assert_eq!(precision_tier(&s, t, &cfg).unwrap(), PrecisionTier::Arbitrary);

    let p = occupation_probabilities(&s, t, &cfg).unwrap();
    assert!(p.iter().all(|x| x.is_finite() && *x >= 0.0), "p = {:?}", p);
    assert!((sum(&p) - 1.0).abs() < 1e-6, "sum = {}", sum(&p));
    assert_eq!(p[3], 0.0);
}

#[test]
fn degenerate_ground_manifold_takes_all_weight_when_cold() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![0.0, -1.0, -1.0, 2.0, -1.0]).unwrap();
    let p = occupation_probabilities(&s, 1e-3, &cfg).unwrap();

    for k in 0..3 {
        assert!((p[k] - 1.0 / 3.0).abs() < 1e-12, "p = {:?}", p);
    }
    assert_eq!(p[3], 0.0);
    assert_eq!(p[4], 0.0);
}

#[test]
fn truncation_floor_zeroes_small_entries() {
    let s = Spectrum::new(vec![0.0, 0.05]).unwrap();
    let t = 40.0;
    let x = 0.05 / (BOLTZMANN * t);
    let p1 = (-x).exp() / (1.0 + (-x).exp());
    assert!(p1 < 1e-6 && p1 > 1e-8, "p1 = {}", p1);

    let loose = ThermalConfig {
        truncation_floor: 1e-6,
        ..ThermalConfig::default()
    };
    assert_eq!(occupation_probabilities(&s, t, &loose).unwrap()[1], 0.0);

    let strict = ThermalConfig::default();
    let p = occupation_probabilities(&s, t, &strict).unwrap();
    assert!((p[1] - p1).abs() < 1e-15, "p = {:?}", p);
}

#[test]
fn both_branches_agree_where_both_are_valid() {
    let native = ThermalConfig::default();
    let forced = ThermalConfig {
        overflow_threshold: 1.0,
        ..ThermalConfig::default()
    };
    let s = Spectrum::new(vec![-0.02, -0.01, 0.0, 0.01, 0.03]).unwrap();
    let t = 150.0;
    assert_eq!(precision_tier(&s, t, &native).unwrap(), PrecisionTier::Native);
    assert_eq!(precision_tier(&s, t, &forced).unwrap(), PrecisionTier::Arbitrary);

    let a = occupation_probabilities(&s, t, &native).unwrap();
    let b = occupation_probabilities(&s, t, &forced).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() < 1e-14, "{:?} vs {:?}", a, b);
    }

    let la = log_partition(&s, t, &native).unwrap();
    let lb = log_partition(&s, t, &forced).unwrap();
    assert!((la - lb).abs() < 1e-12, "{} vs {}", la, lb);
}

#[test]
fn log_partition_of_two_level_system() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![0.0, 0.01]).unwrap();
    let t = 120.0;
    let x = 0.01 / (BOLTZMANN * t);
    let expected = (1.0 + (-x).exp()).ln();
    let got = log_partition(&s, t, &cfg).unwrap();
    assert!((got - expected).abs() < 1e-14, "ln Z = {}", got);
}

#[test]
fn log_partition_survives_exponent_overflow() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![-1.0, 0.0]).unwrap();
    let t = 1.0;
    let b = 1.0 / (BOLTZMANN * t);
    assert!(b.exp().is_infinite());

    // ln(e^β + 1) = β + ln(1 + e^−β)
    let got = log_partition(&s, t, &cfg).unwrap();
    assert!(((got - b) / b).abs() < 1e-14, "ln Z = {}, β = {}", got, b);
}

#[test]
fn zero_precision_digits_is_a_config_error() {
    let cfg = ThermalConfig {
        precision_digits: 0,
        ..ThermalConfig::default()
    };
    let s = Spectrum::new(vec![-1.0, 0.0]).unwrap();
    // 1 K puts a 1 eV gap far beyond the f64 exponent range
    assert_eq!(
        precision_tier(&s, 1.0, &ThermalConfig::default()).unwrap(),
        PrecisionTier::Arbitrary
    );

    assert!(matches!(
        occupation_probabilities(&s, 1.0, &cfg),
        Err(ThermoError::InvalidConfig {
            field: "precision_digits",
            ..
        })
    ));
    assert!(matches!(
        log_partition(&s, 1.0, &cfg),
        Err(ThermoError::InvalidConfig { .. })
    ));
    assert!(matches!(
        thermal_state(&s, 1.0, &cfg),
        Err(ThermoError::InvalidConfig { .. })
    ));
}

#[test]
fn thermal_state_matches_separate_calls() {
    let cfg = ThermalConfig::default();
    let s = Spectrum::new(vec![-0.3, -0.1, 0.0, 0.2]).unwrap();
    for t in [1.0, 1000.0] {
        let state = thermal_state(&s, t, &cfg).unwrap();
        assert_eq!(state.probabilities, occupation_probabilities(&s, t, &cfg).unwrap());
        assert_eq!(state.log_partition, log_partition(&s, t, &cfg).unwrap());
        assert_eq!(state.tier, precision_tier(&s, t, &cfg).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn normalized_for_any_spectrum(
        energies in prop::collection::vec(-2.0f64..2.0, 1..12),
        log_t in -2.0f64..5.0,
    ) {
        let cfg = ThermalConfig::default();
        let s = Spectrum::new(energies).unwrap();
        let t = 10f64.powf(log_t);
        let p = occupation_probabilities(&s, t, &cfg).unwrap();
        prop_assert!(p.iter().all(|x| x.is_finite() && *x >= 0.0));
        prop_assert!((sum(&p) - 1.0).abs() < 1e-6, "sum = {}", sum(&p));
        prop_assert!(log_partition(&s, t, &cfg).unwrap().is_finite());
    }
}
