//! Capsule collision volume
//!
//! A capsule is a swept sphere: a line segment plus a radius. The player's
//! capsule is never stored; it is projected from the body position each time
//! it is needed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Default capsule radius in meters.
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.35;

/// Default distance between the two sphere centres in meters.
pub const DEFAULT_CAPSULE_SEGMENT: f32 = 0.65;

/// A capsule in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Centre of the bottom sphere
    pub start: Vec3,
    /// Centre of the top sphere
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Midpoint of the axis segment.
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        let mut moved = *self;
        moved.translate(offset);
        moved
    }

    /// Bounding box of the whole capsule, including its spherical caps.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.start.min(self.end) - Vec3::splat(self.radius),
            self.start.max(self.end) + Vec3::splat(self.radius),
        )
    }
}

/// Fixed capsule dimensions used to project a body position into a
/// [`Capsule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleShape {
    pub radius: f32,
    /// Length of the axis segment (distance between sphere centres)
    pub segment: f32,
}

impl Default for CapsuleShape {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CAPSULE_RADIUS,
            segment: DEFAULT_CAPSULE_SEGMENT,
        }
    }
}

impl CapsuleShape {
    /// Upright capsule whose bottom sphere is centred on `position`.
    pub fn at(&self, position: Vec3) -> Capsule {
        Capsule::new(position, position + Vec3::Y * self.segment, self.radius)
    }

    /// Total standing height from the lowest to the highest point.
    pub fn total_height(&self) -> f32 {
        self.segment + 2.0 * self.radius
    }
}
