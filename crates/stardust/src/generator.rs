//! Initial system generation
//!
//! A system is one central black hole plus a ring of stars on roughly
//! circular orbits. Stars are placed at increasing radius so the disk fills
//! outward; orbital speed is the circular speed scaled by a random factor.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;
use serde::{Deserialize, Serialize};

use crate::body::{BodyOptions, VisualHandle};
use crate::error::{PhysicsError, Result};

/// Radius of the innermost orbit
pub const INNER_ORBIT_RADIUS: f64 = 50.0;

/// Parameters for [`generate_system`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub name: String,
    pub bodies_count: usize,
    /// Extra radius spanned by the ring beyond [`INNER_ORBIT_RADIUS`]
    pub start_distance_max: f64,
    pub black_hole_mass: f64,
    pub mass_min: f64,
    pub mass_max: f64,
    /// Lower bound of the circular-speed multiplier
    pub start_velocity_variance_min: f64,
    /// Upper bound of the circular-speed multiplier
    pub start_velocity_variance_max: f64,
}

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorPreset {
    Default,
    TightPlanetarySystem,
    /// Wide speed band; spiral arms can form
    LooseGalacticDisk,
}

impl GeneratorPreset {
    pub const ALL: [GeneratorPreset; 3] = [
        GeneratorPreset::Default,
        GeneratorPreset::TightPlanetarySystem,
        GeneratorPreset::LooseGalacticDisk,
    ];

    pub fn settings(self) -> GeneratorSettings {
        match self {
            GeneratorPreset::Default => GeneratorSettings {
                name: "Default".to_string(),
                bodies_count: 100,
                start_distance_max: 400.0,
                black_hole_mass: 100_000.0,
                mass_min: 1.0,
                mass_max: 100.0,
                start_velocity_variance_min: 0.95,
                start_velocity_variance_max: 1.05,
            },
            GeneratorPreset::TightPlanetarySystem => GeneratorSettings {
                name: "Tight Planetary System".to_string(),
                bodies_count: 30,
                start_distance_max: 200.0,
                black_hole_mass: 500.0,
                mass_min: 1.0,
                mass_max: 5.0,
                start_velocity_variance_min: 0.95,
                start_velocity_variance_max: 1.05,
            },
            GeneratorPreset::LooseGalacticDisk => GeneratorSettings {
                name: "Loose Galactic Disk".to_string(),
                bodies_count: 100,
                start_distance_max: 600.0,
                black_hole_mass: 2_000.0,
                mass_min: 5.0,
                mass_max: 20.0,
                start_velocity_variance_min: 0.8,
                start_velocity_variance_max: 1.2,
            },
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorPreset::Default.settings()
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.black_hole_mass.is_finite() && self.black_hole_mass > 0.0) {
            return Err(PhysicsError::invalid_argument(format!(
                "black_hole_mass must be positive, got {}",
                self.black_hole_mass
            )));
        }
        if !(self.mass_min.is_finite() && self.mass_min > 0.0) {
            return Err(PhysicsError::invalid_argument(format!(
                "mass_min must be positive, got {}",
                self.mass_min
            )));
        }
        if !(self.mass_max.is_finite() && self.mass_max >= self.mass_min) {
            return Err(PhysicsError::invalid_argument(format!(
                "mass band [{}, {}] is inverted or non-finite",
                self.mass_min, self.mass_max
            )));
        }
        if !(self.start_velocity_variance_min.is_finite()
            && self.start_velocity_variance_max.is_finite()
            && self.start_velocity_variance_min <= self.start_velocity_variance_max)
        {
            return Err(PhysicsError::invalid_argument(format!(
                "velocity variance band [{}, {}] is inverted or non-finite",
                self.start_velocity_variance_min, self.start_velocity_variance_max
            )));
        }
        if !(self.start_distance_max.is_finite() && self.start_distance_max >= 0.0) {
            return Err(PhysicsError::invalid_argument(format!(
                "start_distance_max must be non-negative, got {}",
                self.start_distance_max
            )));
        }
        Ok(())
    }
}

/// Builds a black hole at `center` plus `bodies_count` orbiting stars
///
/// Star `i` sits at radius `INNER_ORBIT_RADIUS + (i / n) * start_distance_max`
/// at a random angle, moving tangentially (counter-clockwise) at
/// `sqrt(g * black_hole_mass / r)` times a factor drawn from the variance
/// band. Draws per star: angle, speed factor, mass.
///
/// # Arguments
///
/// * `settings` - Ring size, mass band and speed band
/// * `center` - Position of the black hole
/// * `visual` - Rendering handle given to every body
/// * `g` - Gravitational constant used for the circular speed
/// * `rng` - Shared stream
///
/// # Returns
///
/// Construction options, black hole first
///
/// # Examples
///
/// ```
/// use stardust::body::{BodyKind, VisualHandle};
/// use stardust::generator::{GeneratorPreset, generate_system};
/// use seeded_rng::SeededRng;
/// use nalgebra::Point2;
///
/// let settings = GeneratorPreset::TightPlanetarySystem.settings();
/// let mut rng = SeededRng::new(42);
/// let bodies = generate_system(&settings, Point2::origin(), VisualHandle(0), 1.0, &mut rng).unwrap();
///
/// assert_eq!(bodies.len(), 31);
/// assert_eq!(bodies[0].kind, BodyKind::BlackHole);
/// ```
pub fn generate_system(
    settings: &GeneratorSettings,
    center: Point2<f64>,
    visual: VisualHandle,
    g: f64,
    rng: &mut SeededRng,
) -> Result<Vec<BodyOptions>> {
    settings.validate()?;

    let mut bodies = Vec::with_capacity(settings.bodies_count + 1);
    bodies.push(BodyOptions::black_hole(settings.black_hole_mass, center).with_visual(visual));

    let n = settings.bodies_count as f64;
    for i in 0..settings.bodies_count {
        let angle = rng.next_f64() * TAU;
        let distance = INNER_ORBIT_RADIUS + (i as f64 / n) * settings.start_distance_max;
        let radial = Vector2::new(angle.cos(), angle.sin());

        let circular_speed = (g * settings.black_hole_mass / distance).sqrt();
        let speed = circular_speed
            * rng.range(
                settings.start_velocity_variance_min,
                settings.start_velocity_variance_max,
            );
        let tangent = Vector2::new(-radial.y, radial.x);

        let mass = rng.range(settings.mass_min, settings.mass_max);

        bodies.push(
            BodyOptions::star(mass, center + radial * distance)
                .with_velocity(tangent * speed)
                .with_visual(visual),
        );
    }

    Ok(bodies)
}

/// A fixed head-on pair for reproducible collision checks
///
/// Masses 100 and 150 at `center ∓ (5, 0)` with velocities `±(10, 10)`.
pub fn two_body_scenario(center: Point2<f64>, visual: VisualHandle) -> Vec<BodyOptions> {
    vec![
        BodyOptions::star(100.0, center + Vector2::new(-5.0, 0.0))
            .with_velocity(Vector2::new(10.0, 10.0))
            .with_visual(visual),
        BodyOptions::star(150.0, center + Vector2::new(5.0, 0.0))
            .with_velocity(Vector2::new(-10.0, -10.0))
            .with_visual(visual),
    ]
}
