use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;
use serde::{Deserialize, Serialize};

use crate::color::{Tint, random_tint};
use crate::config::TrailConfig;
use crate::error::{PhysicsError, Result};
use crate::path::BodyPath;

/// Fixed collision radius of a black hole, independent of its mass
pub const BLACK_HOLE_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Moves, merges and fragments
    #[default]
    Star,
    /// Immovable gravity source; always survives a merge
    BlackHole,
}

impl BodyKind {
    /// Collision radius for a body of this kind and mass
    pub fn radius_for(self, mass: f64) -> f64 {
        match self {
            BodyKind::Star => mass_to_radius(mass),
            BodyKind::BlackHole => BLACK_HOLE_RADIUS,
        }
    }
}

/// Opaque token identifying a body's visual resource
///
/// The physics never looks inside it; fragments inherit it from the body
/// that broke apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

pub fn mass_to_radius(mass: f64) -> f64 {
    mass.sqrt()
}

/// Everything needed to spawn a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub mass: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub kind: BodyKind,
    pub fragment_cooldown: f64,
    /// Drawn from the simulation RNG when absent
    pub tint: Option<Tint>,
    pub visual: VisualHandle,
}

impl BodyOptions {
    /// A resting star of the given mass at `position`
    pub fn star(mass: f64, position: Point2<f64>) -> Self {
        Self {
            mass,
            position,
            velocity: Vector2::zeros(),
            kind: BodyKind::Star,
            fragment_cooldown: 0.0,
            tint: None,
            visual: VisualHandle::default(),
        }
    }

    pub fn black_hole(mass: f64, position: Point2<f64>) -> Self {
        Self {
            kind: BodyKind::BlackHole,
            ..Self::star(mass, position)
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_visual(mut self, visual: VisualHandle) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.fragment_cooldown = seconds;
        self
    }
}

/// A point mass with extent
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub mass: f64,
    /// Collision radius, derived from mass and kind
    pub radius: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Seconds left during which collisions involving this body are ignored
    pub fragment_cooldown: f64,
    /// Logically destroyed; dropped from the collection after the tick
    pub to_remove: bool,
    pub tint: Tint,
    pub visual: VisualHandle,
    pub path: BodyPath,
    pub(crate) trail_accumulator: f64,
    pub(crate) line_accumulator: f64,
}

impl Body {
    /// Builds a body from spawn options
    ///
    /// Draws a tint from `rng` when the options carry none.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the mass is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use stardust::body::{Body, BodyId, BodyOptions};
    /// use stardust::config::TrailConfig;
    /// use seeded_rng::SeededRng;
    /// use nalgebra::Point2;
    ///
    /// let mut rng = SeededRng::new(1);
    /// let options = BodyOptions::star(16.0, Point2::new(1.0, 2.0));
    /// let body = Body::new(BodyId(0), options, &TrailConfig::default(), &mut rng).unwrap();
    ///
    /// assert_eq!(body.radius, 4.0);
    /// ```
    pub fn new(
        id: BodyId,
        options: BodyOptions,
        trail: &TrailConfig,
        rng: &mut SeededRng,
    ) -> Result<Self> {
        if !(options.mass.is_finite() && options.mass > 0.0) {
            return Err(PhysicsError::invalid_argument(format!(
                "body mass must be positive, got {}",
                options.mass
            )));
        }

        let tint = match options.tint {
            Some(tint) => tint,
            None => random_tint(rng),
        };

        Ok(Body {
            id,
            kind: options.kind,
            mass: options.mass,
            radius: options.kind.radius_for(options.mass),
            position: options.position,
            velocity: options.velocity,
            fragment_cooldown: options.fragment_cooldown.max(0.0),
            to_remove: false,
            tint,
            visual: options.visual,
            path: BodyPath::with_capacity(trail.max_line_segments),
            trail_accumulator: 0.0,
            line_accumulator: 0.0,
        })
    }

    /// Updates mass and the radius derived from it
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = self.kind.radius_for(mass);
    }

    pub fn is_black_hole(&self) -> bool {
        self.kind == BodyKind::BlackHole
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Angular momentum about the origin per unit mass (z component)
    pub fn specific_angular_momentum(&self) -> f64 {
        self.position.x * self.velocity.y - self.position.y * self.velocity.x
    }

    /// True when either coordinate lies beyond `universe_size`
    pub fn is_out_of_bounds(&self, universe_size: f64) -> bool {
        self.position.x.abs() > universe_size || self.position.y.abs() > universe_size
    }
}
