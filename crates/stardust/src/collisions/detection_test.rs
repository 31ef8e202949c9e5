use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;

use crate::body::{Body, BodyId, BodyOptions};
use crate::collisions::{CollisionOutcome, assess_impact, choose_outcome, in_contact, on_cooldown};
use crate::config::{SimConfig, TrailConfig};

fn make_body(id: u32, options: BodyOptions) -> Body {
    let mut rng = SeededRng::new(id);
    Body::new(BodyId(id), options, &TrailConfig::default(), &mut rng).unwrap()
}

fn head_on_pair() -> (Body, Body) {
    let a = make_body(
        0,
        BodyOptions::star(100.0, Point2::new(-5.0, 0.0)).with_velocity(Vector2::new(10.0, 10.0)),
    );
    let b = make_body(
        1,
        BodyOptions::star(150.0, Point2::new(5.0, 0.0)).with_velocity(Vector2::new(-10.0, -10.0)),
    );
    (a, b)
}

#[test]
fn test_contact_is_strict() {
    // radii 1 and 2, so contact below distance 3
    let a = make_body(0, BodyOptions::star(1.0, Point2::origin()));
    let touching = make_body(1, BodyOptions::star(4.0, Point2::new(2.9, 0.0)));
    let grazing = make_body(2, BodyOptions::star(4.0, Point2::new(3.0, 0.0)));

    assert!(in_contact(&a, &touching));
    assert!(!in_contact(&a, &grazing));
}

#[test]
fn test_cooldown_on_either_body() {
    let a = make_body(0, BodyOptions::star(1.0, Point2::origin()));
    let b = make_body(1, BodyOptions::star(1.0, Point2::origin()).with_cooldown(0.2));
    let c = make_body(2, BodyOptions::star(1.0, Point2::origin()));

    assert!(on_cooldown(&a, &b));
    assert!(on_cooldown(&b, &a));
    assert!(!on_cooldown(&a, &c));
}

#[test]
fn test_impact_energies() {
    let (a, b) = head_on_pair();
    let impact = assess_impact(&a, &b, &SimConfig::default());

    assert!((impact.reduced_mass - 60.0).abs() < 1e-10);
    assert!((impact.relative_speed - 800.0_f64.sqrt()).abs() < 1e-10);
    assert!((impact.impact_energy - 24_000.0).abs() < 1e-6);
    assert!((impact.binding_energy - 2_500.0).abs() < 1e-10);
}

#[test]
fn test_violent_impact_fragments() {
    let (a, b) = head_on_pair();
    let config = SimConfig::default();
    let impact = assess_impact(&a, &b, &config);

    assert_eq!(choose_outcome(&a, &b, &impact, &config), CollisionOutcome::Fragment);
}

#[test]
fn test_strong_binding_merges() {
    let (a, b) = head_on_pair();
    let config = SimConfig {
        binding_constant: 100.0,
        ..SimConfig::default()
    };
    let impact = assess_impact(&a, &b, &config);

    assert_eq!(impact.binding_energy, 25_000.0);
    assert_eq!(choose_outcome(&a, &b, &impact, &config), CollisionOutcome::Merge);
}

#[test]
fn test_black_hole_always_merges() {
    let (a, _) = head_on_pair();
    let hole = make_body(
        1,
        BodyOptions::black_hole(150.0, Point2::new(5.0, 0.0)).with_velocity(Vector2::new(-10.0, -10.0)),
    );
    let config = SimConfig::default();
    let impact = assess_impact(&a, &hole, &config);

    assert!(impact.impact_energy > impact.binding_energy);
    assert_eq!(choose_outcome(&a, &hole, &impact, &config), CollisionOutcome::Merge);
}

#[test]
fn test_small_pair_always_merges() {
    let config = SimConfig {
        binding_constant: 0.0,
        ..SimConfig::default()
    };
    let a = make_body(0, BodyOptions::star(1.0, Point2::origin()).with_velocity(Vector2::new(100.0, 0.0)));
    let b = make_body(1, BodyOptions::star(1.0, Point2::new(1.0, 0.0)));
    let impact = assess_impact(&a, &b, &config);

    // total mass exactly twice the minimum
    assert_eq!(choose_outcome(&a, &b, &impact, &config), CollisionOutcome::Merge);
}
