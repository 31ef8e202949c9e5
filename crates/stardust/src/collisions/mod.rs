//! Collision detection and resolution
//!
//! Touching bodies either merge (gentle impacts, small or black-hole
//! partners) or break apart into fragments (violent impacts). Both outcomes
//! conserve mass and momentum.

pub mod detection;
pub mod fragmentation;
pub mod resolution;

#[cfg(test)]
mod detection_test;
#[cfg(test)]
mod fragmentation_test;
#[cfg(test)]
mod resolution_test;

pub use detection::{
    CollisionOutcome, Impact, assess_impact, choose_outcome, in_contact, on_cooldown,
};
pub use fragmentation::{Fragment, break_apart, generate_fragment_masses};
pub use resolution::{MergeOutcome, merge_bodies, pair_mut};
