use nalgebra::{Point2, Vector2};
use seeded_rng::SeededRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::body::{Body, BodyId, BodyOptions, VisualHandle};
use crate::collisions::CollisionOutcome;
use crate::config::{SimConfig, TrailConfig};
use crate::error::Result;
use crate::forces::DirectGravity;
use crate::generator::{GeneratorSettings, generate_system};
use crate::integrator::SemiImplicitEuler;

/// Trail samples emitted by one body during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TrailEmission {
    pub body: BodyId,
    pub points: Vec<Point2<f64>>,
}

/// Everything a tick produced, for renderers and diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub trails: Vec<TrailEmission>,
    /// Bodies whose path gained a point
    pub path_updates: Vec<BodyId>,
    pub merges: usize,
    pub fragmentations: usize,
    /// Fragments admitted into the live collection
    pub fragments_spawned: usize,
    /// Bodies dropped after the tick (absorbed, fragmented or out of bounds)
    pub removed: Vec<BodyId>,
}

/// Snapshot of population counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub body_count: usize,
    pub universe_mass: f64,
    pub pending: usize,
    pub time: f64,
}

/// Complete state of a simulation run
///
/// Owns the live bodies, the spawn queue and the shared random stream.
/// Bodies are only added or removed between ticks.
#[derive(Debug, Clone)]
pub struct SystemState {
    /// Elapsed simulated time in seconds
    pub time: f64,
    pub bodies: Vec<Body>,
    config: SimConfig,
    trail: TrailConfig,
    rng: SeededRng,
    pending: Vec<BodyOptions>,
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use stardust::config::{SimConfig, TrailConfig};
    /// use stardust::state::SystemState;
    /// use seeded_rng::SeededRng;
    ///
    /// let system = SystemState::new(SimConfig::default(), TrailConfig::default(), SeededRng::new(1)).unwrap();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new(config: SimConfig, trail: TrailConfig, rng: SeededRng) -> Result<Self> {
        config.validate()?;
        trail.validate()?;
        Ok(Self {
            time: 0.0,
            bodies: Vec::new(),
            config,
            trail,
            rng,
            pending: Vec::new(),
            next_id: 0,
        })
    }

    /// Default configuration with the given seed
    pub fn with_seed(seed: u32) -> Result<Self> {
        Self::new(SimConfig::default(), TrailConfig::default(), SeededRng::new(seed))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn trail_config(&self) -> &TrailConfig {
        &self.trail
    }

    pub fn rng(&self) -> &SeededRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut SeededRng {
        &mut self.rng
    }

    /// Generates a fresh system and admits it
    ///
    /// # Arguments
    ///
    /// * `settings` - Generator parameters
    /// * `center` - Position of the central black hole
    /// * `visual` - Rendering handle for every generated body
    ///
    /// # Returns
    ///
    /// Number of bodies admitted
    ///
    /// # Examples
    ///
    /// ```
    /// use stardust::body::VisualHandle;
    /// use stardust::generator::GeneratorPreset;
    /// use stardust::state::SystemState;
    /// use nalgebra::Point2;
    ///
    /// let mut system = SystemState::with_seed(42).unwrap();
    /// let settings = GeneratorPreset::TightPlanetarySystem.settings();
    /// system.populate(&settings, Point2::origin(), VisualHandle(0)).unwrap();
    ///
    /// assert_eq!(system.body_count(), 31);
    /// ```
    pub fn populate(
        &mut self,
        settings: &GeneratorSettings,
        center: Point2<f64>,
        visual: VisualHandle,
    ) -> Result<usize> {
        let bodies = generate_system(
            settings,
            center,
            visual,
            self.config.gravitational_constant,
            &mut self.rng,
        )?;
        self.queue_bodies(bodies);
        self.admit_pending()
    }

    /// Queues bodies for admission at the end of the next tick
    pub fn queue_bodies<I>(&mut self, bodies: I)
    where
        I: IntoIterator,
        I::Item: Into<BodyOptions>,
    {
        self.pending.extend(bodies.into_iter().map(Into::into));
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves queued bodies into the live collection
    ///
    /// Admits at most `max_bodies - body_count` bodies in queue order and
    /// drops the rest. Each admitted body without a tint draws one from the
    /// shared stream.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a queued body with non-positive mass. Bodies
    /// admitted before it stay admitted; the queue is cleared either way.
    pub fn admit_pending(&mut self) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending);
        let available = self.config.max_bodies.saturating_sub(self.bodies.len());

        if pending.len() > available {
            warn!(
                queued = pending.len(),
                available,
                max_bodies = self.config.max_bodies,
                "body cap reached, dropping queued bodies"
            );
        }

        let mut admitted = 0;
        for options in pending.into_iter().take(available) {
            let id = BodyId(self.next_id);
            let body = Body::new(id, options, &self.trail, &mut self.rng)?;
            self.next_id += 1;
            self.bodies.push(body);
            admitted += 1;
        }

        Ok(admitted)
    }

    /// Drops bodies flagged for removal, returning their ids
    pub fn remove_flagged(&mut self) -> Vec<BodyId> {
        let removed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| b.to_remove)
            .map(|b| b.id)
            .collect();
        self.bodies.retain(|b| !b.to_remove);
        removed
    }

    /// Advances the whole system by `dt`
    ///
    /// Every body is updated once, in collection order. Afterwards flagged
    /// bodies are removed and queued fragments admitted.
    ///
    /// # Returns
    ///
    /// Trails, path updates, collision counts and removed ids for the tick
    ///
    /// # Errors
    ///
    /// An `InvariantViolation` ends the run; the state must be discarded.
    pub fn step(&mut self, dt: f64) -> Result<StepReport> {
        let stepper = SemiImplicitEuler::new(&self.config, &self.trail);
        let mut report = StepReport::default();

        for idx in 0..self.bodies.len() {
            let update = stepper.update_grav(idx, &mut self.bodies, dt, &mut self.rng)?;
            let id = self.bodies[idx].id;

            match update.collision {
                Some(CollisionOutcome::Merge) => report.merges += 1,
                Some(CollisionOutcome::Fragment) => report.fragmentations += 1,
                None => {}
            }
            if update.path_updated {
                report.path_updates.push(id);
            }
            if !update.particles.is_empty() {
                report.trails.push(TrailEmission {
                    body: id,
                    points: update.particles,
                });
            }
            self.pending.extend(update.fragments.into_iter().map(BodyOptions::from));
        }

        report.removed = self.remove_flagged();
        for id in &report.removed {
            trace!(body = id.0, "body removed");
        }

        report.fragments_spawned = self.admit_pending()?;
        self.time += dt;

        debug!(
            time = self.time,
            bodies = self.bodies.len(),
            merges = report.merges,
            fragmentations = report.fragmentations,
            removed = report.removed.len(),
            "tick complete"
        );

        Ok(report)
    }

    /// Runs `n_steps` ticks of `dt`, returning the final time
    pub fn integrate(&mut self, dt: f64, n_steps: usize) -> Result<f64> {
        for _ in 0..n_steps {
            self.step(dt)?;
        }
        Ok(self.time)
    }

    /// Removes every body and queued spawn and rewinds time
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.pending.clear();
        self.time = 0.0;
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total mass of all bodies, black holes included
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total momentum of all bodies
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Total angular momentum about the origin
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.specific_angular_momentum() * b.mass)
            .sum()
    }

    /// Kinetic plus softened potential energy
    pub fn total_energy(&self) -> f64 {
        let kinetic: f64 = self.bodies.iter().map(|b| b.kinetic_energy()).sum();
        kinetic + DirectGravity::from_config(&self.config).potential_energy(&self.bodies)
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            body_count: self.bodies.len(),
            universe_mass: self.total_mass(),
            pending: self.pending.len(),
            time: self.time,
        }
    }
}
