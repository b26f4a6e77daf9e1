use log::trace;

use meteor_core::constants::SHIP_RADIUS;
use meteor_core::enums::BodyKind;
use meteor_core::{BodyId, Vec3};

use crate::bodies::Projectile;
use crate::body::{Body, GunInfo, Shooter};
use crate::world::TickContext;

/// The shooter. Always tracked so its gun cooldown keeps running.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    pub gun: GunInfo,
    /// Seconds until the gun can fire again.
    cooldown: f64,
    shots_fired: u32,
    id: Option<BodyId>,
}

impl Ship {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self::with_gun(position, velocity, GunInfo::default())
    }

    pub fn with_gun(position: Vec3, velocity: Vec3, gun: GunInfo) -> Self {
        Self {
            position,
            velocity,
            radius: SHIP_RADIUS,
            gun,
            cooldown: 0.0,
            shots_fired: 0,
            id: None,
        }
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }
}

impl Body for Ship {
    fn kind(&self) -> BodyKind {
        BodyKind::Ship
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn bounding_radius(&self) -> f64 {
        self.radius
    }

    fn needs_update(&self) -> bool {
        true
    }

    fn on_added(&mut self, id: BodyId) {
        self.id = Some(id);
    }

    fn on_removed(&mut self) {
        self.id = None;
    }

    fn advance(&mut self, dt: f64, _ctx: &mut TickContext<'_>) {
        self.position += self.velocity * dt;
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    fn as_shooter(&self) -> Option<&dyn Shooter> {
        Some(self)
    }

    fn as_shooter_mut(&mut self) -> Option<&mut dyn Shooter> {
        Some(self)
    }
}

impl Shooter for Ship {
    fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    fn gun(&self) -> GunInfo {
        self.gun
    }

    fn fire(&mut self, direction: Vec3) -> Box<dyn Body> {
        self.cooldown = self.gun.cooldown_secs;
        self.shots_fired += 1;
        let velocity = self.velocity + direction.normalize_or_zero() * self.gun.projectile_speed;
        if let Some(id) = self.id {
            trace!("ship {id} fired shot {} along {direction}", self.shots_fired);
        }
        Box::new(Projectile::new(
            self.position,
            velocity,
            self.gun.projectile_lifetime_secs,
        ))
    }
}
