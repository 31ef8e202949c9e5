//! Simulation constants
//!
//! All physics and trail-sampling constants are carried in plain
//! serializable structs and handed to the algorithms explicitly.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Physics constants for a simulation run
///
/// # Examples
///
/// ```
/// use stardust::config::SimConfig;
///
/// let config = SimConfig::from_json(r#"{ "binding_constant": 25.0 }"#).unwrap();
/// assert_eq!(config.binding_constant, 25.0);
/// assert_eq!(config.min_mass, SimConfig::default().min_mass);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant in simulation units
    pub gravitational_constant: f64,
    /// Bodies with |x| or |y| beyond this are removed
    pub universe_size: f64,
    /// Smallest mass a fragment may have
    pub min_mass: f64,
    /// Upper bound on fragments produced by one collision
    pub max_fragment_count: usize,
    /// Scales the binding energy threshold separating merges from fragmentation
    pub binding_constant: f64,
    /// Collision immunity given to fresh fragments (seconds)
    pub fragment_cooldown_seconds: f64,
    /// Multiplier on fragment scatter velocity
    pub explosive_force: f64,
    /// Live body cap enforced when admitting new bodies
    pub max_bodies: usize,
    /// Gravity softening length
    pub softening: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            universe_size: 10_000.0,
            min_mass: 1.0,
            max_fragment_count: 30,
            binding_constant: 10.0,
            fragment_cooldown_seconds: 1.0,
            explosive_force: 1.2,
            max_bodies: 1_000,
            softening: 0.1,
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::invalid_argument(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::invalid_argument(format!(
            "{name} must be non-negative and finite, got {value}"
        )))
    }
}

impl SimConfig {
    /// Parses a JSON document, filling absent keys with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PhysicsError::invalid_argument(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("gravitational_constant", self.gravitational_constant)?;
        require_positive("universe_size", self.universe_size)?;
        require_positive("min_mass", self.min_mass)?;
        require_non_negative("binding_constant", self.binding_constant)?;
        require_non_negative("fragment_cooldown_seconds", self.fragment_cooldown_seconds)?;
        require_non_negative("explosive_force", self.explosive_force)?;
        require_non_negative("softening", self.softening)?;
        if self.max_fragment_count == 0 {
            return Err(PhysicsError::invalid_argument(
                "max_fragment_count must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Trail and path sampling constants
///
/// These only decide where sample points are emitted; drawing them is up to
/// the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Whether bodies record their own path polyline
    pub draw_lines: bool,
    /// Capacity of each body's path
    pub max_line_segments: usize,
    /// Distance travelled between path samples
    pub dist_per_line_segment: f64,
    /// Trail spacing as a fraction of body radius
    pub particle_spacing: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            draw_lines: true,
            max_line_segments: 200,
            dist_per_line_segment: 10.0,
            particle_spacing: 0.5,
        }
    }
}

impl TrailConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PhysicsError::invalid_argument(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("dist_per_line_segment", self.dist_per_line_segment)?;
        require_positive("particle_spacing", self.particle_spacing)?;
        if self.max_line_segments == 0 {
            return Err(PhysicsError::invalid_argument(
                "max_line_segments must be at least 1",
            ));
        }
        Ok(())
    }
}
