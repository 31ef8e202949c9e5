//! Collision resolution through momentum-conserving mergers
//!
//! When two bodies merge, the survivor keeps its identity and position and
//! takes on:
//! - Total mass: m = m_a + m_b
//! - Momentum-weighted velocity: v = (p_a + p_b) / m
//! - A tint shifted toward the absorbed body by its share of the new mass

use tracing::trace;

use crate::body::{Body, BodyId};
use crate::color::Tint;

/// Which body survived a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// Borrows two distinct elements of a slice mutably
///
/// # Panics
///
/// Panics if `a == b` or either index is out of bounds.
pub fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert_ne!(a, b, "cannot borrow the same body twice");
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Merge two touching bodies in place
///
/// A black hole always survives against a star; otherwise the lighter body
/// is absorbed (ties keep `a`). The absorbed body is flagged for removal and
/// left otherwise untouched.
///
/// # Arguments
///
/// * `a` - First body
/// * `b` - Second body
///
/// # Returns
///
/// Ids of the surviving and absorbed bodies
///
/// # Examples
///
/// ```
/// use stardust::body::{Body, BodyId, BodyOptions};
/// use stardust::collisions::merge_bodies;
/// use stardust::config::TrailConfig;
/// use seeded_rng::SeededRng;
/// use nalgebra::{Point2, Vector2};
///
/// let mut rng = SeededRng::new(1);
/// let trail = TrailConfig::default();
/// let mut a = Body::new(BodyId(0), BodyOptions::star(1.0, Point2::new(0.0, 0.0))
///     .with_velocity(Vector2::new(0.0, 5.0)), &trail, &mut rng).unwrap();
/// let mut b = Body::new(BodyId(1), BodyOptions::star(2.0, Point2::new(0.5, 0.0))
///     .with_velocity(Vector2::new(0.0, 2.0)), &trail, &mut rng).unwrap();
///
/// let p_initial = a.momentum() + b.momentum();
/// let outcome = merge_bodies(&mut a, &mut b);
///
/// assert_eq!(outcome.survivor, BodyId(1));
/// assert!(a.to_remove);
/// assert_eq!(b.mass, 3.0);
/// assert!((b.momentum() - p_initial).magnitude() < 1e-12);
/// ```
pub fn merge_bodies(a: &mut Body, b: &mut Body) -> MergeOutcome {
    let a_absorbed = if b.is_black_hole() {
        true
    } else if a.is_black_hole() {
        false
    } else {
        a.mass < b.mass
    };

    let total_mass = a.mass + b.mass;
    let velocity = (a.momentum() + b.momentum()) / total_mass;

    let (smaller, bigger) = if a_absorbed { (a, b) } else { (b, a) };

    smaller.to_remove = true;
    bigger.velocity = velocity;
    bigger.set_mass(total_mass);

    if !bigger.is_black_hole() {
        let ratio = smaller.mass / bigger.mass;
        bigger.tint = Tint::mix(smaller.tint, bigger.tint, ratio);
    }

    trace!(
        survivor = bigger.id.0,
        absorbed = smaller.id.0,
        mass = total_mass,
        "bodies merged"
    );

    MergeOutcome {
        survivor: bigger.id,
        absorbed: smaller.id,
    }
}
