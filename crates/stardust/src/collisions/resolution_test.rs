use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;

use crate::body::{BLACK_HOLE_RADIUS, Body, BodyId, BodyOptions};
use crate::collisions::{merge_bodies, pair_mut};
use crate::color::Tint;
use crate::config::TrailConfig;

fn make_body(id: u32, options: BodyOptions) -> Body {
    let mut rng = SeededRng::new(id);
    Body::new(BodyId(id), options, &TrailConfig::default(), &mut rng).unwrap()
}

fn star(id: u32, mass: f64, position: Point2<f64>, velocity: Vector2<f64>) -> Body {
    make_body(id, BodyOptions::star(mass, position).with_velocity(velocity))
}

#[test]
fn test_merge_bodies_mass_conservation() {
    let mut a = star(0, 1.0, Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0));
    let mut b = star(1, 2.0, Point2::new(1.1, 0.0), Vector2::new(0.0, 3.0));

    merge_bodies(&mut a, &mut b);

    assert!((b.mass - 3.0).abs() < 1e-10);
    assert!((b.radius - 3.0_f64.sqrt()).abs() < 1e-10);
}

#[test]
fn test_merge_bodies_momentum_conservation() {
    let mut a = star(0, 1.0, Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0));
    let mut b = star(1, 2.0, Point2::new(1.1, 0.0), Vector2::new(0.0, 3.0));
    let p_before = a.momentum() + b.momentum();

    merge_bodies(&mut a, &mut b);

    assert!((b.momentum() - p_before).magnitude() < 1e-10);
    assert!((b.velocity.y - 11.0 / 3.0).abs() < 1e-10);
}

#[test]
fn test_heavier_body_survives_in_place() {
    let mut a = star(0, 150.0, Point2::new(5.0, 0.0), Vector2::new(-10.0, -10.0));
    let mut b = star(1, 100.0, Point2::new(-5.0, 0.0), Vector2::new(10.0, 10.0));

    let outcome = merge_bodies(&mut a, &mut b);

    assert_eq!(outcome.survivor, BodyId(0));
    assert_eq!(outcome.absorbed, BodyId(1));
    assert!(!a.to_remove);
    assert!(b.to_remove);
    assert_eq!(a.position, Point2::new(5.0, 0.0));
    assert_eq!(a.mass, 250.0);
    assert!((a.velocity - Vector2::new(-2.0, -2.0)).magnitude() < 1e-10);
}

#[test]
fn test_equal_masses_keep_first() {
    let mut a = star(0, 2.0, Point2::origin(), Vector2::zeros());
    let mut b = star(1, 2.0, Point2::new(1.0, 0.0), Vector2::zeros());

    let outcome = merge_bodies(&mut a, &mut b);

    assert_eq!(outcome.survivor, BodyId(0));
    assert!(b.to_remove);
}

#[test]
fn test_black_hole_survives_lighter() {
    let mut star_body = star(0, 500.0, Point2::origin(), Vector2::new(4.0, 0.0));
    let mut hole = make_body(1, BodyOptions::black_hole(100.0, Point2::new(3.0, 0.0)));

    let outcome = merge_bodies(&mut star_body, &mut hole);

    assert_eq!(outcome.survivor, BodyId(1));
    assert!(star_body.to_remove);
    assert_eq!(hole.mass, 600.0);
    assert_eq!(hole.radius, BLACK_HOLE_RADIUS);
    assert!((hole.momentum() - Vector2::new(2_000.0, 0.0)).magnitude() < 1e-9);
}

#[test]
fn test_black_hole_tint_is_kept() {
    let mut star_body = make_body(0, BodyOptions::star(1.0, Point2::origin()).with_tint(Tint(0xFF0000)));
    let mut hole = make_body(
        1,
        BodyOptions::black_hole(100.0, Point2::new(3.0, 0.0)).with_tint(Tint(0x000000)),
    );

    merge_bodies(&mut hole, &mut star_body);

    assert_eq!(hole.tint, Tint(0x000000));
}

#[test]
fn test_survivor_tint_shifts_toward_absorbed() {
    let mut a = make_body(0, BodyOptions::star(3.0, Point2::origin()).with_tint(Tint::from_rgb(0, 0, 0)));
    let mut b = make_body(
        1,
        BodyOptions::star(1.0, Point2::new(1.0, 0.0)).with_tint(Tint::from_rgb(200, 100, 0)),
    );

    merge_bodies(&mut a, &mut b);

    // absorbed share of the merged mass is 1/4
    assert_eq!(a.tint, Tint::from_rgb(50, 25, 0));
}

#[test]
fn test_pair_mut_either_order() {
    let mut bodies = vec![
        star(0, 1.0, Point2::origin(), Vector2::zeros()),
        star(1, 2.0, Point2::origin(), Vector2::zeros()),
        star(2, 3.0, Point2::origin(), Vector2::zeros()),
    ];

    let (first, second) = pair_mut(&mut bodies, 0, 2);
    assert_eq!((first.id, second.id), (BodyId(0), BodyId(2)));

    let (first, second) = pair_mut(&mut bodies, 2, 1);
    assert_eq!((first.id, second.id), (BodyId(2), BodyId(1)));
}

#[test]
#[should_panic]
fn test_pair_mut_same_index_panics() {
    let mut bodies = vec![star(0, 1.0, Point2::origin(), Vector2::zeros())];
    let _ = pair_mut(&mut bodies, 0, 0);
}
