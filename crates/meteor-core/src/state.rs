//! Serializable world snapshots.
//!
//! Snapshots are plain data, built by the simulation on demand. They are
//! used for determinism checks and for dumping the arena from the app.

use serde::{Deserialize, Serialize};

use crate::enums::BodyKind;
use crate::handle::BodyId;
use crate::types::{SimTime, Vec3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    pub tracked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    /// Bodies ordered by handle index.
    pub bodies: Vec<BodySnapshot>,
    /// Number of non-empty grid buckets.
    pub bucket_count: usize,
}

impl WorldSnapshot {
    pub fn count_of(&self, kind: BodyKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }
}
