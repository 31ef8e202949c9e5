use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seeded_rng::SeededRng;

use crate::PhysicsError;
use crate::body::{Body, BodyId, BodyKind, BodyOptions, VisualHandle};
use crate::collisions::{Fragment, break_apart, generate_fragment_masses};
use crate::config::{SimConfig, TrailConfig};

fn make_body(id: u32, options: BodyOptions) -> Body {
    let mut rng = SeededRng::new(id);
    Body::new(BodyId(id), options, &TrailConfig::default(), &mut rng).unwrap()
}

fn head_on_pair() -> (Body, Body) {
    let a = make_body(
        0,
        BodyOptions::star(100.0, Point2::new(-5.0, 0.0))
            .with_velocity(Vector2::new(10.0, 10.0))
            .with_visual(VisualHandle(7)),
    );
    let b = make_body(
        1,
        BodyOptions::star(150.0, Point2::new(5.0, 0.0)).with_velocity(Vector2::new(-10.0, -10.0)),
    );
    (a, b)
}

fn total_momentum(fragments: &[Fragment]) -> Vector2<f64> {
    fragments
        .iter()
        .map(Fragment::momentum)
        .fold(Vector2::zeros(), |acc, p| acc + p)
}

#[test]
fn test_masses_below_twice_minimum_fail() {
    let mut rng = SeededRng::new(1);
    let result = generate_fragment_masses(&mut rng, 1.5, &SimConfig::default());

    assert!(matches!(result, Err(PhysicsError::InvariantViolation(_))));
    assert!(result.unwrap_err().is_fatal());
}

#[test]
fn test_chunk_errors_convert() {
    let err: PhysicsError = seeded_rng::ChunkError::invalid("bad split").into();

    assert!(matches!(err, PhysicsError::Chunk(_)));
    assert!(!err.is_fatal());
    assert_eq!(err.to_string(), "Invalid chunk request: bad split");
}

#[test]
fn test_single_fragment_when_cap_is_one() {
    let config = SimConfig {
        max_fragment_count: 1,
        ..SimConfig::default()
    };
    let mut rng = SeededRng::new(1);

    let masses = generate_fragment_masses(&mut rng, 50.0, &config).unwrap();

    assert_eq!(masses, vec![50.0]);
    // no partition drawn
    assert_eq!(rng.state(), 1);
}

#[test]
fn test_just_above_twice_minimum_gives_two() {
    let config = SimConfig::default();
    let mut rng = SeededRng::new(9);

    let masses = generate_fragment_masses(&mut rng, 2.1, &config).unwrap();

    assert_eq!(masses.len(), 2);
    assert!((masses.iter().sum::<f64>() - 2.1).abs() < 1e-9);
    for mass in masses {
        assert!(mass >= config.min_mass - 1e-9, "fragment {mass} below minimum");
    }
}

#[test]
fn test_masses_respect_count_bounds() {
    let config = SimConfig::default();
    let mut rng = SeededRng::new(5);

    for total in [10.0, 55.5, 250.0, 10_000.0] {
        let masses = generate_fragment_masses(&mut rng, total, &config).unwrap();
        let cap = ((total / config.min_mass).floor() as usize).min(config.max_fragment_count);

        assert!(masses.len() >= 2 && masses.len() <= cap);
        assert!((masses.iter().sum::<f64>() - total).abs() < 1e-9 * total);
        assert!(masses.iter().all(|&m| m >= config.min_mass - 1e-9));
    }
}

#[test]
fn test_break_apart_flags_both() {
    let (mut a, mut b) = head_on_pair();
    let mut rng = SeededRng::new(42);

    break_apart(&mut a, &mut b, 24_000.0, &SimConfig::default(), &mut rng).unwrap();

    assert!(a.to_remove);
    assert!(b.to_remove);
}

#[test]
fn test_break_apart_conserves_mass_and_momentum() {
    let (mut a, mut b) = head_on_pair();
    let before = a.momentum() + b.momentum();
    let mut rng = SeededRng::new(42);

    let fragments = break_apart(&mut a, &mut b, 24_000.0, &SimConfig::default(), &mut rng).unwrap();

    let mass: f64 = fragments.iter().map(|f| f.mass).sum();
    assert!(mass <= 250.0 + 1e-9);
    assert!((mass - 250.0).abs() < 1e-9);

    let after = total_momentum(&fragments);
    assert!((after - before).magnitude() <= 1e-6 * before.magnitude().max(1.0));
}

#[test]
fn test_fragments_inherit_cooldown_and_visual() {
    let (mut a, mut b) = head_on_pair();
    let config = SimConfig {
        fragment_cooldown_seconds: 2.5,
        ..SimConfig::default()
    };
    let mut rng = SeededRng::new(3);

    let fragments = break_apart(&mut a, &mut b, 24_000.0, &config, &mut rng).unwrap();

    assert!(fragments.len() >= 2);
    for fragment in &fragments {
        assert_eq!(fragment.fragment_cooldown, 2.5);
        assert_eq!(fragment.visual, VisualHandle(7));
    }

    let options = BodyOptions::from(fragments[0].clone());
    assert_eq!(options.kind, BodyKind::Star);
    assert_eq!(options.tint, None);
    assert_eq!(options.fragment_cooldown, 2.5);
}

#[test]
fn test_fragments_scatter_around_center_of_mass() {
    let (mut a, mut b) = head_on_pair();
    let mut rng = SeededRng::new(11);
    let impact_energy = 24_000.0;

    let fragments = break_apart(&mut a, &mut b, impact_energy, &SimConfig::default(), &mut rng).unwrap();

    // centre of mass at x = 1, scatter reach is offset + base speed
    let center = Point2::new(1.0, 0.0);
    let reach = a.radius * 0.5 + (impact_energy / 250.0_f64).sqrt();
    for fragment in &fragments {
        let distance = (fragment.position - center).magnitude();
        assert!((distance - reach).abs() < 1e-9, "fragment at distance {distance}");
    }
}

#[test]
fn test_conservation_sweep() {
    let mut driver = ChaCha8Rng::seed_from_u64(0xF4A9);
    let trail = TrailConfig::default();

    for _ in 0..200 {
        let config = SimConfig {
            explosive_force: driver.random_range(0.0..3.0),
            max_fragment_count: driver.random_range(1..40),
            ..SimConfig::default()
        };
        let mut rng = SeededRng::new(driver.random());

        let mass_a = driver.random_range(1.0..500.0);
        let mass_b = driver.random_range(1.0..500.0);
        let velocity_a = Vector2::new(driver.random_range(-50.0..50.0), driver.random_range(-50.0..50.0));
        let velocity_b = Vector2::new(driver.random_range(-50.0..50.0), driver.random_range(-50.0..50.0));

        let mut a = Body::new(
            BodyId(0),
            BodyOptions::star(mass_a, Point2::origin()).with_velocity(velocity_a),
            &trail,
            &mut rng,
        )
        .unwrap();
        let mut b = Body::new(
            BodyId(1),
            BodyOptions::star(mass_b, Point2::new(1.0, 1.0)).with_velocity(velocity_b),
            &trail,
            &mut rng,
        )
        .unwrap();

        let total = mass_a + mass_b;
        let before = a.momentum() + b.momentum();
        let energy = driver.random_range(0.0..100_000.0);

        let fragments = break_apart(&mut a, &mut b, energy, &config, &mut rng).unwrap();

        let mass: f64 = fragments.iter().map(|f| f.mass).sum();
        assert!(mass <= total + 1e-9);
        assert!((mass - total).abs() < 1e-9 * total.max(1.0));

        let after = total_momentum(&fragments);
        assert!(
            (after - before).magnitude() <= 1e-6 * before.magnitude().max(1.0),
            "momentum drifted from {before:?} to {after:?}"
        );
    }
}

#[test]
fn test_heavy_pairs_never_gain_mass() {
    let config = SimConfig::default();
    let trail = TrailConfig::default();

    for seed in 0..2_000u32 {
        let mass = 3.0e8 + f64::from(seed) * 1_234_567.891;
        let mut rng = SeededRng::new(seed);
        let mut a = Body::new(BodyId(0), BodyOptions::star(mass, Point2::origin()), &trail, &mut rng)
            .unwrap();
        let mut b = Body::new(
            BodyId(1),
            BodyOptions::star(0.7 * mass, Point2::new(1.0, 0.0)),
            &trail,
            &mut rng,
        )
        .unwrap();
        let total = a.mass + b.mass;

        let fragments = break_apart(&mut a, &mut b, 1.0e9, &config, &mut rng)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        let fragment_mass: f64 = fragments.iter().map(|f| f.mass).sum();
        assert!(fragment_mass <= total, "seed {seed}: {fragment_mass} > {total}");
    }
}

#[test]
fn test_heavy_masses_sum_to_at_most_total() {
    let config = SimConfig::default();
    let mut rng = SeededRng::new(58);

    for total in [1.0e7, 6.317_283_940_526e8, 1.0e9, 1.0e12] {
        let masses = generate_fragment_masses(&mut rng, total, &config).unwrap();
        let sum: f64 = masses.iter().sum();

        assert!(sum <= total);
        assert!((sum - total).abs() <= total * 1e-12);
    }
}
