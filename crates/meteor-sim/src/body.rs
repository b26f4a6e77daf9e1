//! Capability traits the world and the targeting policy consume.

use meteor_core::constants::{GUN_COOLDOWN_SECS, PROJECTILE_LIFETIME_SECS, PROJECTILE_SPEED};
use meteor_core::enums::BodyKind;
use meteor_core::{Aabb, BodyId, Vec3};

use crate::world::TickContext;

/// Anything the world can hold.
///
/// The world owns bodies as `Box<dyn Body>` and drives them through a
/// two-phase tick: every in-scope tracked body gets `advance` before any of
/// them gets `finalize`. While a callback runs, the body is detached from the
/// world, so it never sees itself in its own queries.
pub trait Body {
    fn kind(&self) -> BodyKind;

    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn bounding_radius(&self) -> f64;

    /// Box used for grid queries and update scoping.
    fn bounding_box(&self) -> Aabb {
        Aabb::around_sphere(self.position(), self.bounding_radius())
    }

    /// Read once, when the body is added. Only bodies answering true are
    /// advanced and finalized.
    fn needs_update(&self) -> bool {
        false
    }

    /// Called exactly once, after the body is given its handle.
    fn on_added(&mut self, _id: BodyId) {}

    /// Called exactly once, when the body leaves the world.
    fn on_removed(&mut self) {}

    /// First phase: integrate state over `dt` seconds.
    fn advance(&mut self, _dt: f64, _ctx: &mut TickContext<'_>) {}

    /// Second phase: react to the post-advance state of the world.
    fn finalize(&mut self, _ctx: &mut TickContext<'_>) {}

    fn as_shooter(&self) -> Option<&dyn Shooter> {
        None
    }

    fn as_shooter_mut(&mut self) -> Option<&mut dyn Shooter> {
        None
    }
}

/// Gun parameters a shooter exposes to the targeting policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GunInfo {
    /// Muzzle speed relative to the shooter (m/s).
    pub projectile_speed: f64,
    /// Maximum flight time; intercepts beyond it are infeasible.
    pub projectile_lifetime_secs: f64,
    pub cooldown_secs: f64,
}

impl Default for GunInfo {
    fn default() -> Self {
        Self {
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            cooldown_secs: GUN_COOLDOWN_SECS,
        }
    }
}

/// A body that can fire projectiles.
pub trait Shooter: Body {
    fn can_fire(&self) -> bool;

    fn gun(&self) -> GunInfo;

    /// Fire along `direction` and hand back the projectile. The caller adds
    /// it to the world.
    fn fire(&mut self, direction: Vec3) -> Box<dyn Body>;
}
