//! Violent collisions: breaking two bodies into fragments
//!
//! The combined mass is split with a constrained random partition, each
//! fragment is thrown out along a random angle, and the scatter velocities
//! are then shifted so the fragments carry exactly the pair's original
//! momentum.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};
use seeded_rng::{ChunkRequest, SeededRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{Body, BodyKind, BodyOptions, VisualHandle};
use crate::config::SimConfig;
use crate::error::{PhysicsError, Result};

/// Slack allowed when checking that fragmentation did not create mass
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Construction record for a body spawned by fragmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub mass: f64,
    pub fragment_cooldown: f64,
    pub visual: VisualHandle,
}

impl Fragment {
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }
}

impl From<Fragment> for BodyOptions {
    fn from(fragment: Fragment) -> Self {
        BodyOptions {
            mass: fragment.mass,
            position: fragment.position,
            velocity: fragment.velocity,
            kind: BodyKind::Star,
            fragment_cooldown: fragment.fragment_cooldown,
            tint: None,
            visual: fragment.visual,
        }
    }
}

/// Splits `total_mass` into fragment masses
///
/// The number of fragments is drawn from `[2, n]` where `n` is the number of
/// minimum-mass fragments that fit, capped by `max_fragment_count`. When
/// fewer than two fit, the whole mass comes back as a single fragment.
/// Rounding drift is removed from the largest fragment so the masses sum to
/// the total, never above it.
///
/// # Arguments
///
/// * `rng` - Shared stream the partition is drawn from
/// * `total_mass` - Combined mass of the colliding pair
/// * `config` - Supplies `min_mass` and `max_fragment_count`
///
/// # Returns
///
/// Fragment masses in partition order
///
/// # Errors
///
/// `InvariantViolation` when `total_mass` is below twice the minimum mass;
/// collision classification never sends such a pair here.
pub fn generate_fragment_masses(
    rng: &mut SeededRng,
    total_mass: f64,
    config: &SimConfig,
) -> Result<Vec<f64>> {
    if total_mass < config.min_mass * 2.0 {
        return Err(PhysicsError::invariant(format!(
            "cannot fragment mass {total_mass} below twice the minimum {}",
            config.min_mass
        )));
    }

    let max_chunks_possible = (total_mass / config.min_mass).floor() as usize;
    let num_chunks = max_chunks_possible.min(config.max_fragment_count);
    if num_chunks < 2 {
        return Ok(vec![total_mass]);
    }

    let min_chunk = config.min_mass / total_mass;
    let portions = rng.chunks(&ChunkRequest::between(2, num_chunks, min_chunk))?;

    let mut masses: Vec<f64> = portions.iter().map(|p| p * total_mass).collect();

    let (largest, _) = masses
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |(best_i, best), (i, &m)| {
            if m > best { (i, m) } else { (best_i, best) }
        });
    let diff = masses.iter().sum::<f64>() - total_mass;
    if diff != 0.0 {
        masses[largest] -= diff;
    }

    // One subtraction can still leave the re-summed total an ulp high once
    // masses are large; keep trimming the largest fragment until it is not.
    let mut excess = masses.iter().sum::<f64>() - total_mass;
    while excess > 0.0 {
        masses[largest] -= excess.max(masses[largest] * f64::EPSILON);
        excess = masses.iter().sum::<f64>() - total_mass;
    }

    Ok(masses)
}

fn check_mass(stage: &str, fragment_mass: f64, source_mass: f64) -> Result<()> {
    if fragment_mass > source_mass + MASS_TOLERANCE {
        return Err(PhysicsError::invariant(format!(
            "{stage}: fragment mass {fragment_mass} exceeds source mass {source_mass} by {}",
            fragment_mass - source_mass
        )));
    }
    Ok(())
}

/// Breaks `a` and `b` apart
///
/// Both bodies are flagged for removal. Fragments scatter from the pair's
/// centre of mass with speed derived from `sqrt(impact_energy / total_mass)`,
/// are offset by half of `a`'s radius along their angle, and receive the
/// configured cooldown.
///
/// # Arguments
///
/// * `a` - First body; its radius sets the scatter offset and its visual
///   handle is passed on
/// * `b` - Second body
/// * `impact_energy` - Kinetic energy of the impact in the centre-of-mass frame
/// * `config` - Physics constants
/// * `rng` - Shared stream for masses and scatter angles
///
/// # Returns
///
/// Construction records for the fragments, to be admitted after the tick
///
/// # Errors
///
/// `InvariantViolation` if the fragments would hold more mass than the pair
/// (checked after partitioning and again after momentum correction).
pub fn break_apart(
    a: &mut Body,
    b: &mut Body,
    impact_energy: f64,
    config: &SimConfig,
    rng: &mut SeededRng,
) -> Result<Vec<Fragment>> {
    a.to_remove = true;
    b.to_remove = true;

    let total_mass = a.mass + b.mass;
    let center = Point2::from((a.position.coords * a.mass + b.position.coords * b.mass) / total_mass);
    let center_velocity = (a.momentum() + b.momentum()) / total_mass;

    let masses = generate_fragment_masses(rng, total_mass, config)?;
    check_mass("after partitioning", masses.iter().sum(), total_mass)?;

    let base_speed = (impact_energy / total_mass).sqrt();
    let offset = a.radius * 0.5;

    let mut fragments: Vec<Fragment> = masses
        .iter()
        .map(|&mass| {
            let angle = rng.next_f64() * TAU;
            let direction = Vector2::new(angle.cos(), angle.sin());
            let scatter = direction * base_speed;

            Fragment {
                position: center + direction * offset + scatter,
                velocity: scatter * config.explosive_force,
                mass,
                fragment_cooldown: config.fragment_cooldown_seconds,
                visual: a.visual,
            }
        })
        .collect();

    // Random angles leave a net drift; remove it and restore the pair's
    // centre-of-mass velocity.
    let fragment_mass: f64 = fragments.iter().map(|f| f.mass).sum();
    let drift = fragments
        .iter()
        .map(Fragment::momentum)
        .fold(Vector2::zeros(), |acc, p| acc + p)
        / fragment_mass;

    for fragment in &mut fragments {
        fragment.velocity += center_velocity - drift;
    }

    check_mass(
        "after momentum correction",
        fragments.iter().map(|f| f.mass).sum(),
        a.mass + b.mass,
    )?;

    debug!(
        a = a.id.0,
        b = b.id.0,
        total_mass,
        fragments = fragments.len(),
        impact_energy,
        "bodies fragmented"
    );

    Ok(fragments)
}
