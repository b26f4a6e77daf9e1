//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D vector in arena space (meters or m/s).
/// x = East, y = Up, z = North. The grid index hashes on x and z.
pub type Vec3 = glam::DVec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    /// Box from two corners. The corners are sorted per axis, so the
    /// argument order does not matter.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered on `center` extending `half_extents` along each axis.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Cube centered on `center` with the given half side length.
    pub fn cube(center: Vec3, half_side: f64) -> Self {
        Self::from_center_half_extents(center, Vec3::splat(half_side))
    }

    /// Tightest box around a sphere.
    pub fn around_sphere(center: Vec3, radius: f64) -> Self {
        Self::cube(center, radius.max(0.0))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// True unless the boxes are disjoint. Touching faces count as overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of update calls since the last reset.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by exactly `dt` seconds. Callers validate `dt` first.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_sorts_corners() {
        let b = Aabb::new(Vec3::new(5.0, -1.0, 3.0), Vec3::new(-5.0, 1.0, -3.0));
        assert_eq!(b.min, Vec3::new(-5.0, -1.0, -3.0));
        assert_eq!(b.max, Vec3::new(5.0, 1.0, 3.0));
        assert_eq!(b.center(), Vec3::ZERO);
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = Aabb::cube(Vec3::ZERO, 1.0);
        let b = Aabb::cube(Vec3::new(0.0, 0.0, 2.5), 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Aabb::cube(Vec3::ZERO, 10.0);
        let inner = Aabb::cube(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_degenerate_box_matches_point_inside() {
        let point = Aabb::default();
        let around = Aabb::around_sphere(Vec3::new(0.5, 0.0, 0.5), 1.0);
        assert!(around.intersects(&point));
        assert!(around.contains_point(Vec3::ZERO));
    }

    #[test]
    fn test_sim_time_advances_by_delta() {
        let mut t = SimTime::default();
        t.advance(0.25);
        t.advance(0.5);
        assert_eq!(t.tick, 2);
        assert_relative_eq!(t.elapsed_secs, 0.75);
        t.reset();
        assert_eq!(t, SimTime::default());
    }
}
