//! Closed-form moving-sphere collision and lead solutions.
//!
//! Everything here is pure. "No solution" is a value (`f64::INFINITY` or
//! `None`), never an error.

use meteor_core::Vec3;

use crate::body::Body;

/// A sphere in uniform linear motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingSphere {
    pub center: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
}

impl MovingSphere {
    pub fn new(center: Vec3, velocity: Vec3, radius: f64) -> Self {
        Self {
            center,
            velocity,
            radius,
        }
    }

    /// Current kinematic state of a body.
    pub fn of(body: &dyn Body) -> Self {
        Self::new(body.position(), body.velocity(), body.bounding_radius())
    }
}

/// Seconds until two moving spheres first touch.
///
/// Returns 0 when they already overlap or touch while closing, and
/// `f64::INFINITY` when they are not closing or pass without contact.
/// Symmetric in its arguments.
pub fn time_of_impact(a: &MovingSphere, b: &MovingSphere) -> f64 {
    let s = a.center - b.center;
    let v = a.velocity - b.velocity;
    let r = a.radius + b.radius;
    if !(s.is_finite() && v.is_finite() && r.is_finite()) {
        return f64::INFINITY;
    }

    let c = s.dot(s) - r * r;
    if c < 0.0 {
        return 0.0;
    }
    let b = v.dot(s);
    if b >= 0.0 {
        return f64::INFINITY;
    }
    let a = v.dot(v);
    let d = b * b - a * c;
    if d < 0.0 {
        return f64::INFINITY;
    }
    // b < 0 implies a > 0, but the division must never see a zero.
    if a <= 0.0 {
        return 0.0;
    }
    ((-b - d.sqrt()) / a).max(0.0)
}

/// Flight time for a projectile of speed `muzzle_speed` to reach a target at
/// relative position `delta` moving at relative velocity `relative_velocity`.
///
/// `None` when the discriminant is not positive. The returned time may be
/// negative; see [`intercept_time`] for the windowed variant.
pub fn aim_ahead(delta: Vec3, relative_velocity: Vec3, muzzle_speed: f64) -> Option<f64> {
    let a = relative_velocity.dot(relative_velocity) - muzzle_speed * muzzle_speed;
    let b = 2.0 * relative_velocity.dot(delta);
    let c = delta.dot(delta);
    let disc = b * b - 4.0 * a * c;
    if !(disc.is_finite() && disc > 0.0) {
        return None;
    }
    let denom = disc.sqrt() - b;
    if denom == 0.0 {
        return None;
    }
    Some(2.0 * c / denom)
}

/// [`aim_ahead`] restricted to `[0, max_flight_secs]`.
pub fn intercept_time(
    delta: Vec3,
    relative_velocity: Vec3,
    muzzle_speed: f64,
    max_flight_secs: f64,
) -> Option<f64> {
    aim_ahead(delta, relative_velocity, muzzle_speed)
        .filter(|t| (0.0..=max_flight_secs).contains(t))
}

/// Unit direction to fire along so the shot meets the target after `t`
/// seconds. `None` if the aim point coincides with the shooter.
pub fn aim_direction(
    target_pos: Vec3,
    target_vel: Vec3,
    shooter_pos: Vec3,
    shooter_vel: Vec3,
    t: f64,
) -> Option<Vec3> {
    (target_pos - shooter_pos + target_vel * t - shooter_vel * t).try_normalize()
}

/// A feasible shot: when it lands and where to point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiringSolution {
    pub time: f64,
    pub direction: Vec3,
}

/// Combine the windowed lead time and the aim direction.
pub fn firing_solution(
    shooter: &MovingSphere,
    target: &MovingSphere,
    muzzle_speed: f64,
    max_flight_secs: f64,
) -> Option<FiringSolution> {
    let time = intercept_time(
        target.center - shooter.center,
        target.velocity - shooter.velocity,
        muzzle_speed,
        max_flight_secs,
    )?;
    let direction = aim_direction(
        target.center,
        target.velocity,
        shooter.center,
        shooter.velocity,
        time,
    )?;
    Some(FiringSolution { time, direction })
}
