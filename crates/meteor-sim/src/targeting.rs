//! Targeting policy: pick a nearby asteroid with a feasible lead and fire.

use std::cmp::Ordering;

use log::debug;

use meteor_core::config::TargetingConfig;
use meteor_core::enums::{BodyKind, TargetPriority};
use meteor_core::error::MeteorError;
use meteor_core::events::WorldEvent;
use meteor_core::{Aabb, BodyId, Vec3};

use crate::body::GunInfo;
use crate::intercept::{firing_solution, MovingSphere};
use crate::world::World;

/// A shot that was fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engagement {
    pub target: BodyId,
    /// Unit firing direction.
    pub direction: Vec3,
    /// Predicted flight time to the target (seconds).
    pub intercept_time: f64,
    pub projectile: BodyId,
}

/// Feasible candidate and the numbers used to rank it.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    target: BodyId,
    direction: Vec3,
    intercept_time: f64,
    distance: f64,
    moving: bool,
}

impl Candidate {
    fn rank(&self, priority: TargetPriority) -> u8 {
        match priority {
            TargetPriority::Nearest => 0,
            TargetPriority::MovingFirst => u8::from(!self.moving),
        }
    }

    fn compare(&self, other: &Self, priority: TargetPriority) -> Ordering {
        self.rank(priority)
            .cmp(&other.rank(priority))
            .then(self.distance.total_cmp(&other.distance))
            .then(self.target.cmp(&other.target))
    }
}

/// Greedy single-shooter targeting.
///
/// Never re-selects the target it engaged last, so two consecutive shots go
/// to different asteroids whenever more than one is feasible.
#[derive(Debug, Clone)]
pub struct TargetingPolicy {
    half_extent: f64,
    priority: TargetPriority,
    last_target: Option<BodyId>,
    candidates: Vec<BodyId>,
}

impl TargetingPolicy {
    pub fn new(config: &TargetingConfig) -> Self {
        Self {
            half_extent: config.query_half_extent,
            priority: config.priority,
            last_target: None,
            candidates: Vec::new(),
        }
    }

    pub fn priority(&self) -> TargetPriority {
        self.priority
    }

    pub fn last_target(&self) -> Option<BodyId> {
        self.last_target
    }

    /// Try to fire `shooter` at the best feasible asteroid nearby.
    ///
    /// The cube query around the shooter is a primary query: if the shooter
    /// sits on the reference plane it becomes the world's update region.
    /// Returns `Ok(None)` when the gun is cooling down or nothing is feasible.
    pub fn engage(
        &mut self,
        world: &mut World,
        shooter: BodyId,
    ) -> Result<Option<Engagement>, MeteorError> {
        let (origin, gun) = {
            let body = world.body(shooter).ok_or(MeteorError::UnknownBody(shooter))?;
            let gun_body = body
                .as_shooter()
                .ok_or(MeteorError::NotAShooter(shooter))?;
            if !gun_body.can_fire() {
                return Ok(None);
            }
            (MovingSphere::of(body), gun_body.gun())
        };

        let mut candidates = std::mem::take(&mut self.candidates);
        candidates.clear();
        world.query(&Aabb::cube(origin.center, self.half_extent), &mut candidates);

        let priority = self.priority;
        let best = candidates
            .iter()
            .filter_map(|&id| self.evaluate(world, shooter, &origin, &gun, id))
            .min_by(|a, b| a.compare(b, priority));
        self.candidates = candidates;

        let Some(choice) = best else {
            return Ok(None);
        };

        let projectile = world
            .body_mut(shooter)
            .and_then(|b| b.as_shooter_mut())
            .ok_or(MeteorError::NotAShooter(shooter))?
            .fire(choice.direction);
        let projectile = world.add(projectile)?;

        self.last_target = Some(choice.target);
        world.emit(WorldEvent::ShotFired {
            shooter,
            target: choice.target,
            intercept_secs: choice.intercept_time,
        });
        debug!(
            "{shooter} engaged {} at {:.1} m, intercept in {:.2} s",
            choice.target, choice.distance, choice.intercept_time
        );

        Ok(Some(Engagement {
            target: choice.target,
            direction: choice.direction,
            intercept_time: choice.intercept_time,
            projectile,
        }))
    }

    fn evaluate(
        &self,
        world: &World,
        shooter: BodyId,
        origin: &MovingSphere,
        gun: &GunInfo,
        id: BodyId,
    ) -> Option<Candidate> {
        if id == shooter || Some(id) == self.last_target {
            return None;
        }
        let body = world.body(id)?;
        if body.kind() != BodyKind::Asteroid {
            return None;
        }
        let target = MovingSphere::of(body);
        let solution = firing_solution(
            origin,
            &target,
            gun.projectile_speed,
            gun.projectile_lifetime_secs,
        )?;
        Some(Candidate {
            target: id,
            direction: solution.direction,
            intercept_time: solution.time,
            distance: origin.center.distance(target.center),
            moving: target.velocity != Vec3::ZERO,
        })
    }
}
