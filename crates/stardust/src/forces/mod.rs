//! Force models for the N-body scan
//!
//! Gravity is evaluated pair by pair inside the per-tick body update so that
//! collision handling can interrupt the scan. This module provides the pair
//! kernel and whole-system diagnostics built on it.

pub mod gravity;


pub use gravity::DirectGravity;
