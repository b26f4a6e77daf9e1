//! Simulation for the METEOR arena.
//!
//! Owns the spatial grid, the world and its two-phase tick, the intercept
//! math, the targeting policy and scenario setup. Completely headless, so
//! every run is reproducible from a seed.

pub mod bodies;
pub mod body;
pub mod grid;
pub mod intercept;
pub mod scenario;
pub mod targeting;
pub mod world;

pub use meteor_core as core;
pub use body::{Body, GunInfo, Shooter};
pub use targeting::{Engagement, TargetingPolicy};
pub use world::{TickContext, TickReport, World};
