//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What a body is, as far as targeting and collision logic care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Engageable target.
    Asteroid,
    /// Shooter.
    Ship,
    /// Shot fired by a ship. Destroys the first asteroid it touches.
    Projectile,
}

/// How the targeting policy breaks ties between feasible candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPriority {
    /// Nearest feasible candidate wins.
    #[default]
    Nearest,
    /// Nearest feasible moving candidate wins; stationary candidates are
    /// only considered when nothing feasible is moving.
    MovingFirst,
}

/// Which tracked bodies an update call advances and finalizes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum UpdateScope {
    /// Bodies overlapping the last region remembered by a primary query.
    /// Every tracked body when no region has been remembered yet.
    #[default]
    LastQuery,
    /// Bodies overlapping the given region.
    Region(crate::types::Aabb),
    /// Every tracked body.
    All,
}
