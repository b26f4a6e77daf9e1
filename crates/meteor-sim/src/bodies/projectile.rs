use meteor_core::constants::PROJECTILE_RADIUS;
use meteor_core::enums::BodyKind;
use meteor_core::events::WorldEvent;
use meteor_core::{Aabb, Vec3};

use crate::body::Body;
use crate::intercept::{time_of_impact, MovingSphere};
use crate::world::TickContext;

/// Fixed-velocity shot. Destroys the first asteroid it touches, or expires.
///
/// Contact is swept over the last step, so a fast shot cannot pass through
/// a small asteroid between two ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    pub lifetime_secs: f64,
    age_secs: f64,
    /// Length of the last advance step (seconds).
    step_secs: f64,
}

impl Projectile {
    pub fn new(position: Vec3, velocity: Vec3, lifetime_secs: f64) -> Self {
        Self {
            position,
            velocity,
            radius: PROJECTILE_RADIUS,
            lifetime_secs,
            age_secs: 0.0,
            step_secs: 0.0,
        }
    }

    pub fn age_secs(&self) -> f64 {
        self.age_secs
    }

    pub fn is_expired(&self) -> bool {
        self.age_secs >= self.lifetime_secs
    }
}

impl Body for Projectile {
    fn kind(&self) -> BodyKind {
        BodyKind::Projectile
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

    fn advance(&mut self, dt: f64, _ctx: &mut TickContext<'_>) {
        self.position += self.velocity * dt;
        self.age_secs += dt;
        self.step_secs = dt;
    }

    fn finalize(&mut self, ctx: &mut TickContext<'_>) {
        if self.is_expired() {
            ctx.remove_self();
            return;
        }

        // Rewind both spheres to the start of the step and look for first
        // contact within it. Asteroids move at constant velocity, so the
        // rewind is exact for every body the tick advanced.
        let step = self.step_secs;
        let start = self.position - self.velocity * step;
        let pad = Vec3::splat(self.radius);
        let swept = Aabb::new(start.min(self.position) - pad, start.max(self.position) + pad);
        let me = MovingSphere::new(start, self.velocity, self.radius);

        let mut nearby = Vec::new();
        ctx.query(&swept, &mut nearby);
        // Lowest handle wins so the outcome does not depend on bucket order.
        let hit = nearby
            .into_iter()
            .filter(|&id| !ctx.is_removal_pending(id))
            .filter(|&id| {
                ctx.body(id).is_some_and(|b| {
                    if b.kind() != BodyKind::Asteroid {
                        return false;
                    }
                    let rock = MovingSphere::of(b);
                    let rock = MovingSphere::new(
                        rock.center - rock.velocity * step,
                        rock.velocity,
                        rock.radius,
                    );
                    time_of_impact(&me, &rock) <= step
                })
            })
            .min();

        if let Some(target) = hit {
            ctx.emit(WorldEvent::Impact {
                projectile: ctx.id(),
                target,
            });
            ctx.remove(target);
            ctx.remove_self();
        }
    }
}
