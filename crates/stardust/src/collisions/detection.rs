//! Contact tests and merge-versus-fragment classification

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::config::SimConfig;

/// How a collision is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// The smaller body is absorbed by the larger one
    Merge,
    /// Both bodies are destroyed and replaced by fragments
    Fragment,
}

/// Energetics of a collision between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// m_a m_b / (m_a + m_b)
    pub reduced_mass: f64,
    /// |v_b - v_a|
    pub relative_speed: f64,
    /// ½ μ v_rel²
    pub impact_energy: f64,
    /// Energy needed to disrupt the pair
    pub binding_energy: f64,
}

/// True when the bodies overlap (centre distance below the sum of radii)
pub fn in_contact(a: &Body, b: &Body) -> bool {
    a.distance_to(b) < a.radius + b.radius
}

/// True when either body is still immune from its last collision
pub fn on_cooldown(a: &Body, b: &Body) -> bool {
    a.fragment_cooldown > 0.0 || b.fragment_cooldown > 0.0
}

/// Computes impact and binding energy for a colliding pair
///
/// # Arguments
///
/// * `a` - First body
/// * `b` - Second body
/// * `config` - Supplies `G` and the binding constant
///
/// # Returns
///
/// Reduced mass, relative speed, impact energy and binding energy
///
/// # Examples
///
/// ```
/// use stardust::body::{Body, BodyId, BodyOptions};
/// use stardust::collisions::assess_impact;
/// use stardust::config::{SimConfig, TrailConfig};
/// use seeded_rng::SeededRng;
/// use nalgebra::{Point2, Vector2};
///
/// let mut rng = SeededRng::new(1);
/// let trail = TrailConfig::default();
/// let a = Body::new(BodyId(0), BodyOptions::star(100.0, Point2::new(-5.0, 0.0))
///     .with_velocity(Vector2::new(10.0, 10.0)), &trail, &mut rng).unwrap();
/// let b = Body::new(BodyId(1), BodyOptions::star(150.0, Point2::new(5.0, 0.0))
///     .with_velocity(Vector2::new(-10.0, -10.0)), &trail, &mut rng).unwrap();
///
/// let impact = assess_impact(&a, &b, &SimConfig::default());
/// assert!((impact.impact_energy - 24_000.0).abs() < 1e-6);
/// assert!((impact.binding_energy - 2_500.0).abs() < 1e-9);
/// ```
pub fn assess_impact(a: &Body, b: &Body, config: &SimConfig) -> Impact {
    let total_mass = a.mass + b.mass;
    let relative_speed = (b.velocity - a.velocity).magnitude();
    let reduced_mass = (a.mass * b.mass) / total_mass;
    let impact_energy = 0.5 * reduced_mass * relative_speed * relative_speed;
    let binding_energy = config.binding_constant * config.gravitational_constant * total_mass;

    Impact {
        reduced_mass,
        relative_speed,
        impact_energy,
        binding_energy,
    }
}

/// Picks the resolution for a colliding pair
///
/// Merges when the pair is too light to fragment (combined mass at most
/// twice the minimum fragment mass), when a black hole is involved, or when
/// the impact is weaker than the binding energy. Fragments otherwise.
///
/// # Arguments
///
/// * `a` - First body
/// * `b` - Second body
/// * `impact` - Energetics from [`assess_impact`]
/// * `config` - Supplies `min_mass`
pub fn choose_outcome(a: &Body, b: &Body, impact: &Impact, config: &SimConfig) -> CollisionOutcome {
    let too_small = a.mass + b.mass <= config.min_mass * 2.0;
    let black_hole = a.is_black_hole() || b.is_black_hole();

    if too_small || black_hole || impact.impact_energy < impact.binding_energy {
        CollisionOutcome::Merge
    } else {
        CollisionOutcome::Fragment
    }
}
