//! Core types and definitions for the METEOR arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, body handles, configuration, errors, events, snapshots
//! and tuning constants. It has no simulation logic of its own.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod handle;
pub mod state;
pub mod types;

pub use error::MeteorError;
pub use handle::BodyId;
pub use types::{Aabb, SimTime, Vec3};

#[cfg(test)]
mod tests;
