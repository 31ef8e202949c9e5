//! Direct N-body gravity (O(N²) implementation)

use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::config::SimConfig;

/// Softened Newtonian gravity
///
/// The acceleration on a body at `p` from a mass `m` at `q` is
/// `G m (q - p) / (|q - p|² + ε²)^1.5`. The softening length `ε` keeps the
/// force finite as separation approaches zero.
///
/// # Examples
///
/// ```
/// use stardust::forces::DirectGravity;
/// use nalgebra::Point2;
///
/// let gravity = DirectGravity::new(1.0, 0.0);
/// let accel = gravity.acceleration_from(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), 8.0);
///
/// // G m / r² = 8 / 4
/// assert!((accel.x - 2.0).abs() < 1e-12);
/// assert_eq!(accel.y, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant
    pub g: f64,
    /// Softening length
    pub softening: f64,
}

impl DirectGravity {
    pub fn new(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.gravitational_constant, config.softening)
    }

    /// Acceleration at `position` due to `mass` located at `source`
    pub fn acceleration_from(
        &self,
        position: Point2<f64>,
        source: Point2<f64>,
        mass: f64,
    ) -> Vector2<f64> {
        let dr = source - position;
        self.acceleration_for_offset(dr, dr.magnitude_squared(), mass)
    }

    /// Acceleration for a precomputed offset and its squared length
    pub fn acceleration_for_offset(&self, dr: Vector2<f64>, dist_sq: f64, mass: f64) -> Vector2<f64> {
        let eps2 = self.softening * self.softening;
        let inv_dist3 = 1.0 / (dist_sq + eps2).powf(1.5);
        dr * (self.g * mass * inv_dist3)
    }

    /// Total softened potential energy of the live bodies
    ///
    /// Bodies flagged for removal are ignored. Each pair is counted once.
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let eps2 = self.softening * self.softening;
        let live: Vec<&Body> = bodies.iter().filter(|b| !b.to_remove).collect();

        live.iter()
            .enumerate()
            .flat_map(|(i, a)| {
                live[i + 1..].iter().map(move |b| {
                    let r = ((a.position - b.position).magnitude_squared() + eps2).sqrt();
                    -self.g * a.mass * b.mass / r
                })
            })
            .sum()
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
