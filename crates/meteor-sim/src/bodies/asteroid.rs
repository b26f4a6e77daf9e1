use meteor_core::enums::BodyKind;
use meteor_core::Vec3;

use crate::body::Body;
use crate::world::TickContext;

/// Engageable target. Drifts in a straight line, or sits still.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
}

impl Asteroid {
    pub fn new(position: Vec3, velocity: Vec3, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    pub fn stationary(position: Vec3, radius: f64) -> Self {
        Self::new(position, Vec3::ZERO, radius)
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec3::ZERO
    }
}

impl Body for Asteroid {
    fn kind(&self) -> BodyKind {
        BodyKind::Asteroid
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

    /// Stationary rocks never need a tick.
    fn needs_update(&self) -> bool {
        self.is_moving()
    }

    fn advance(&mut self, dt: f64, _ctx: &mut TickContext<'_>) {
        self.position += self.velocity * dt;
    }
}
