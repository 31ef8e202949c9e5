//! 2D N-body gravity with emergent merging and fragmentation
//!
//! Bodies attract each other with softened Newtonian gravity. Touching
//! bodies either merge or shatter into fragments depending on how the
//! impact energy compares with their binding energy. All randomness comes
//! from a single [`SeededRng`](seeded_rng::SeededRng), so a seed fully
//! determines a run.

pub mod body;
pub mod collisions;
pub mod color;
pub mod config;
pub mod error;
pub mod forces;
pub mod generator;
pub mod integrator;
pub mod path;
pub mod state;

#[cfg(test)]
mod path_test;

pub use error::{PhysicsError, Result};
