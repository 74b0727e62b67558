use lockstep_math::fixed_math::{self, Fixed4, Fixed6};

const CASES: usize = 5_000;

fn random_real(rng: &mut fastrand::Rng, bound: f64) -> f64 {
    (rng.f64() * 2.0 - 1.0) * bound
}

#[test]
fn test_f64_round_trip_within_one_ulp() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..CASES {
        let x = random_real(&mut rng, 500_000.0);
        let back = Fixed4::from_f64(x).unwrap().to_f64();
        assert!((back - x).abs() <= 1.0 / 4096.0, "Fixed4 round trip of {x} gave {back}");

        let x = random_real(&mut rng, 2_000.0);
        let back = Fixed6::from_f64(x).unwrap().to_f64();
        assert!((back - x).abs() <= 1.0 / 1_048_576.0, "Fixed6 round trip of {x} gave {back}");
    }
}

#[test]
fn test_addition_is_exactly_invertible() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..CASES {
        let a = Fixed6::from_raw(rng.i64(-(1 << 50)..(1 << 50)));
        let b = Fixed6::from_raw(rng.i64(-(1 << 50)..(1 << 50)));
        assert_eq!((a + b) - b, a);
        assert_eq!(a - a, Fixed6::ZERO);
    }
}

#[test]
fn test_multiplication_inverts_within_rounding() {
    let mut rng = fastrand::Rng::with_seed(7);
    let ulp = 1.0 / 1_048_576.0;
    for _ in 0..CASES {
        let a = Fixed6::from_f64(random_real(&mut rng, 100.0)).unwrap();
        let mut b = Fixed6::from_f64(random_real(&mut rng, 100.0)).unwrap();
        if fixed_math::abs(b) < Fixed6::from_f64(0.5).unwrap() {
            b = b + Fixed6::ONE;
        }
        let back = (a * b) / b;
        assert!((back - a).to_f64().abs() <= 4.0 * ulp, "({a:?} * {b:?}) / {b:?} = {back:?}");
    }
}

#[test]
fn test_ordering_matches_real_values() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..CASES {
        let a = Fixed4::from_raw(rng.i64(-(1 << 40)..(1 << 40)));
        let b = Fixed4::from_raw(rng.i64(-(1 << 40)..(1 << 40)));
        assert_eq!(a < b, a.to_f64() < b.to_f64());
        assert_eq!(a == b, a.raw() == b.raw());
    }
}

#[test]
fn test_display_parses_back_within_display_precision() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..CASES {
        let value = Fixed4::from_f64(random_real(&mut rng, 10_000.0)).unwrap();
        let parsed: Fixed4 = value.to_string().parse().unwrap();
        let error = (parsed - value).to_f64().abs();
        assert!(error <= 0.5e-4 + 1.0 / 4096.0, "{value:?} printed as {value}");

        let value = Fixed6::from_raw(rng.i64(-(1 << 40)..(1 << 40)));
        let parsed: Fixed6 = value.to_string().parse().unwrap();
        let error = (parsed - value).to_f64().abs();
        assert!(error <= 0.5e-6 + 1.0 / 1_048_576.0, "{value:?} printed as {value}");
    }
}

#[test]
fn test_trig_bounds_and_identity_on_random_angles() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..CASES {
        let x = Fixed6::from_f64(random_real(&mut rng, 100.0)).unwrap();
        let s = fixed_math::sin(x).to_f64();
        let c = fixed_math::cos(x).to_f64();
        assert!((s - x.to_f64().sin()).abs() < 1e-3, "sin({x:?})");
        assert!((c - x.to_f64().cos()).abs() < 1e-3, "cos({x:?})");
        assert!((s * s + c * c - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_serde_preserves_raw_bits() {
    let mut rng = fastrand::Rng::with_seed(5);
    let values: Vec<Fixed6> = (0..100).map(|_| Fixed6::from_raw(rng.i64(..))).collect();
    let bytes = bincode::serialize(&values).unwrap();
    let back: Vec<Fixed6> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, values);
}
