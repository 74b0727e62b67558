mod common;

use lockstep_math::config::{load_random_config, EngineKind, RandomConfig, SeedSource};
use lockstep_math::random::{distributions, Engine, MersenneTwister, MultiplyWithCarry, RandomCore};
use lockstep_math::MathError;

fn check_uniform<R: RandomCore>(rng: &mut R, name: &str) {
    let n = 100_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let u = rng.uniform();
        assert!(u > 0.0 && u < 1.0, "{name} produced {u}");
        sum += u;
    }
    let mean = sum / f64::from(n);
    assert!((mean - 0.5).abs() < 0.01, "{name} uniform mean was {mean}");
}

#[test]
fn test_uniform_is_open_and_centered() {
    common::init_test_logging();
    check_uniform(&mut MersenneTwister::default(), "MersenneTwister");
    check_uniform(&mut MultiplyWithCarry::default(), "MultiplyWithCarry");
    check_uniform(&mut Engine::from(MersenneTwister::new(9)), "Engine");
}

#[test]
fn test_exponential_and_laplace_means() {
    let mut rng = MersenneTwister::new(31);
    let n = 50_000;
    let exp_mean = (0..n)
        .map(|_| distributions::exponential(&mut rng, 3.0).unwrap())
        .sum::<f64>()
        / f64::from(n);
    assert!((exp_mean - 3.0).abs() < 0.1, "exponential mean was {exp_mean}");

    let lap_mean =
        (0..n).map(|_| distributions::laplace(&mut rng, -2.0, 1.0)).sum::<f64>() / f64::from(n);
    assert!((lap_mean + 2.0).abs() < 0.05, "laplace mean was {lap_mean}");
}

#[test]
fn test_beta_mean() {
    let mut rng = MultiplyWithCarry::new(101, 202);
    let n = 20_000;
    let mean = (0..n)
        .map(|_| distributions::beta(&mut rng, 2.0, 6.0).unwrap())
        .sum::<f64>()
        / f64::from(n);
    assert!((mean - 0.25).abs() < 0.01, "beta(2, 6) mean was {mean}");
}

#[test]
fn test_domain_errors_surface_to_caller() {
    let mut rng = MersenneTwister::default();
    assert!(matches!(
        distributions::gamma(&mut rng, 0.0, 1.0),
        Err(MathError::InvalidArgument { .. })
    ));
    assert!(matches!(
        distributions::beta(&mut rng, -1.0, 1.0),
        Err(MathError::InvalidArgument { .. })
    ));
    assert_eq!(distributions::dice_roll(&mut rng, 0, 5), Ok(0));
    assert!(distributions::dice_roll(&mut rng, 6, -1).is_err());
}

#[test]
fn test_rand_ecosystem_runs_on_engines() {
    use rand::seq::SliceRandom;
    use rand::Rng;

    let mut a = MersenneTwister::new(77);
    let mut b = MersenneTwister::new(77);
    let mut deck_a: Vec<u32> = (0..52).collect();
    let mut deck_b = deck_a.clone();
    deck_a.shuffle(&mut a);
    deck_b.shuffle(&mut b);
    assert_eq!(deck_a, deck_b);

    let mut engine = Engine::from(MultiplyWithCarry::new(4, 5));
    let roll: u8 = engine.random_range(1..=6);
    assert!((1..=6).contains(&roll));
}

#[test]
fn test_config_file_drives_engine_choice() {
    common::init_test_logging();

    let config = RandomConfig {
        engine: EngineKind::MultiplyWithCarry,
        seed: SeedSource::Pair(1, 1),
        warmup: 0,
    };
    let path = std::env::temp_dir().join(format!("lockstep_math_it_{}.ron", std::process::id()));
    std::fs::write(&path, config.to_ron_string().unwrap()).unwrap();
    let loaded = load_random_config(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, config);
    let mut engine = loaded.build().unwrap();
    assert!(matches!(engine, Engine::MultiplyWithCarry(_)));
    assert_eq!(engine.next_raw_u32(), 2422818384);
}
