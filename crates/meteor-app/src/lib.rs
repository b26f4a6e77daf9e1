//! METEOR command-line runner.
//!
//! Wires the targeting policy to the world and steps the arena headless,
//! optionally paced to wall-clock time.

pub mod cli;
pub mod runner;

pub use meteor_core as core;
