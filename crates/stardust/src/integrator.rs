//! Per-tick body update
//!
//! Each live star scans every other live body once, accumulating softened
//! gravity until it either finishes the scan or touches another body. A
//! touch resolves as a merge or a fragmentation and ends the body's update
//! for the tick. Otherwise the body is advanced with semi-implicit Euler:
//!
//! 1. Kick: v(t + dt) = v(t) + a(t) * dt
//! 2. Drift: x(t + dt) = x(t) + v(t + dt) * dt
//!
//! Bodies are updated in collection order and see the already-updated state
//! of earlier bodies. Structural changes (removals, new fragments) are left
//! to the caller so the collection stays stable during the scan.

use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;

use crate::body::Body;
use crate::collisions::{
    CollisionOutcome, Fragment, assess_impact, break_apart, choose_outcome, in_contact,
    merge_bodies, on_cooldown, pair_mut,
};
use crate::config::{SimConfig, TrailConfig};
use crate::error::Result;
use crate::forces::DirectGravity;

/// What one body's update produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyUpdate {
    /// Trail sample points emitted along the step just taken
    pub particles: Vec<Point2<f64>>,
    /// True when the body's path should be redrawn
    pub path_updated: bool,
    /// New bodies to spawn after the tick
    pub fragments: Vec<Fragment>,
    /// Collision resolved by this body during the tick, if any
    pub collision: Option<CollisionOutcome>,
}

/// Semi-implicit Euler stepper with collision handling
///
/// # Examples
///
/// ```
/// use stardust::body::{Body, BodyId, BodyOptions};
/// use stardust::config::{SimConfig, TrailConfig};
/// use stardust::integrator::SemiImplicitEuler;
/// use seeded_rng::SeededRng;
/// use nalgebra::{Point2, Vector2};
///
/// let config = SimConfig::default();
/// let trail = TrailConfig::default();
/// let mut rng = SeededRng::new(3);
///
/// let mut bodies = vec![
///     Body::new(BodyId(0), BodyOptions::black_hole(1_000.0, Point2::origin()), &trail, &mut rng).unwrap(),
///     Body::new(BodyId(1), BodyOptions::star(1.0, Point2::new(100.0, 0.0))
///         .with_velocity(Vector2::new(0.0, 3.0)), &trail, &mut rng).unwrap(),
/// ];
///
/// let stepper = SemiImplicitEuler::new(&config, &trail);
/// stepper.update_grav(1, &mut bodies, 0.01, &mut rng).unwrap();
///
/// // pulled toward the black hole
/// assert!(bodies[1].velocity.x < 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SemiImplicitEuler<'a> {
    config: &'a SimConfig,
    trail: &'a TrailConfig,
    gravity: DirectGravity,
}

impl<'a> SemiImplicitEuler<'a> {
    pub fn new(config: &'a SimConfig, trail: &'a TrailConfig) -> Self {
        Self {
            config,
            trail,
            gravity: DirectGravity::from_config(config),
        }
    }

    /// Advances `bodies[idx]` by `dt`
    ///
    /// May also mutate the single body it collides with. Black holes and
    /// bodies already flagged for removal are left untouched.
    ///
    /// # Arguments
    ///
    /// * `idx` - Index of the body to advance
    /// * `bodies` - The live collection; never resized here
    /// * `dt` - Timestep in seconds
    /// * `rng` - Shared stream, drawn from only when the body fragments
    ///
    /// # Returns
    ///
    /// Trail samples, the path flag, any fragments to spawn and the
    /// collision resolved this tick
    ///
    /// # Errors
    ///
    /// Propagates `InvariantViolation` from fragmentation.
    pub fn update_grav(
        &self,
        idx: usize,
        bodies: &mut [Body],
        dt: f64,
        rng: &mut SeededRng,
    ) -> Result<BodyUpdate> {
        {
            let body = &mut bodies[idx];
            if body.to_remove || body.is_black_hole() {
                return Ok(BodyUpdate::default());
            }

            // Removal takes effect between ticks; the update still runs.
            if body.is_out_of_bounds(self.config.universe_size) {
                body.to_remove = true;
            }

            if body.fragment_cooldown > 0.0 {
                body.fragment_cooldown = (body.fragment_cooldown - dt).max(0.0);
            }
        }

        let mut acceleration: Vector2<f64> = Vector2::zeros();

        for j in 0..bodies.len() {
            if j == idx || bodies[j].to_remove {
                continue;
            }

            let (body, other) = pair_mut(bodies, idx, j);

            if in_contact(body, other) {
                // One collision per cooldown window; the pair also exerts no
                // force this tick.
                if on_cooldown(body, other) {
                    continue;
                }

                let impact = assess_impact(body, other, self.config);
                return match choose_outcome(body, other, &impact, self.config) {
                    CollisionOutcome::Merge => {
                        merge_bodies(body, other);
                        Ok(BodyUpdate {
                            collision: Some(CollisionOutcome::Merge),
                            ..BodyUpdate::default()
                        })
                    }
                    CollisionOutcome::Fragment => {
                        let fragments =
                            break_apart(body, other, impact.impact_energy, self.config, rng)?;
                        Ok(BodyUpdate {
                            fragments,
                            collision: Some(CollisionOutcome::Fragment),
                            ..BodyUpdate::default()
                        })
                    }
                };
            }

            let dr = other.position - body.position;
            acceleration += self
                .gravity
                .acceleration_for_offset(dr, dr.magnitude_squared(), other.mass);
        }

        let body = &mut bodies[idx];
        body.velocity += acceleration * dt;

        let old_position = body.position;
        body.position += body.velocity * dt;

        Ok(self.emit(body, old_position))
    }

    /// Trail and path bookkeeping for the step from `old_position`
    ///
    /// Trail samples are spaced evenly by distance and interpolated along
    /// the step; the remainder carries into the next tick.
    fn emit(&self, body: &mut Body, old_position: Point2<f64>) -> BodyUpdate {
        let step = body.position - old_position;
        let seg_dist = step.magnitude();

        let mut particles = Vec::new();
        let spacing = body.radius * self.trail.particle_spacing;
        body.trail_accumulator += seg_dist;
        while spacing > 0.0 && body.trail_accumulator >= spacing {
            let overshoot = body.trail_accumulator - spacing;
            let t = if seg_dist > 0.0 {
                (1.0 - overshoot / seg_dist).clamp(0.0, 1.0)
            } else {
                1.0
            };
            particles.push(old_position + step * t);
            body.trail_accumulator -= spacing;
        }

        let mut path_updated = false;
        let interval = self.trail.dist_per_line_segment;
        body.line_accumulator += seg_dist;
        if interval > 0.0 && body.line_accumulator > interval {
            if self.trail.draw_lines {
                body.path.record(body.position);
                path_updated = true;
            }
            body.line_accumulator %= interval;
        }

        BodyUpdate {
            particles,
            path_updated,
            ..BodyUpdate::default()
        }
    }
}
