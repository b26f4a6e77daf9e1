//! Error type shared by the METEOR crates.
//!
//! Only precondition violations are errors. Solver outcomes such as "never
//! collides" or "no intercept" are ordinary values, and removing a body that
//! is already gone is a no-op.

use thiserror::Error;

use crate::handle::BodyId;

#[derive(Error, Debug)]
pub enum MeteorError {
    /// Configuration that cannot produce a working arena.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Negative, NaN or infinite time step.
    #[error("invalid time step: {0}")]
    InvalidDelta(f64),

    /// A body reported a NaN or infinite position.
    #[error("body {id} has a non-finite position")]
    NonFinitePosition { id: BodyId },

    /// A non-finite position was offered before the body got a handle.
    #[error("body rejected: non-finite position")]
    RejectedBody,

    /// Handle does not refer to a live body.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// Body exists but has no shooter capability.
    #[error("body {0} cannot shoot")]
    NotAShooter(BodyId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
