//! Events emitted by the world for logging and run statistics.

use serde::{Deserialize, Serialize};

use crate::enums::BodyKind;
use crate::handle::BodyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorldEvent {
    /// Body registered with the world.
    BodyAdded { id: BodyId, kind: BodyKind },
    /// Body deregistered from the world.
    BodyRemoved { id: BodyId, kind: BodyKind },
    /// A shooter fired at a target.
    ShotFired {
        shooter: BodyId,
        target: BodyId,
        intercept_secs: f64,
    },
    /// A projectile touched an asteroid.
    Impact { projectile: BodyId, target: BodyId },
}
