//! Capsule collision resolver
//!
//! Runs once per substep after integration. Finds the deepest contact across
//! every active index, pushes the body out along the contact normal, and
//! classifies the contact:
//!
//! - **Floor** (`normal.y > floor_threshold`): the body lands.
//! - **Wall / ceiling**: the velocity component into the surface is removed
//!   so the body slides along it.
//!
//! A body that was grounded and did not touch anything this substep is
//! probed downward. The probe reaches two skin widths plus the drop of the
//! steepest walkable floor over this substep's horizontal travel, so walking
//! downhill stays on the ground. A floor found by the probe pulls the body
//! down to rest one skin above it; if no floor is found the body starts
//! falling.

use serde::{Deserialize, Serialize};
use tracing::trace;

use glam::Vec3;

use super::capsule::{Capsule, CapsuleShape};
use super::collision::Contact;
use super::spatial_index::SpatialIndex;
use crate::player::PlayerBody;

/// Minimum `normal.y` for a contact to count as floor.
pub const DEFAULT_FLOOR_THRESHOLD: f32 = 0.5;

/// Extra separation added on every push-out.
pub const DEFAULT_SKIN: f32 = 0.01;

/// Gaps below this are left alone when snapping to the ground.
const SNAP_TOLERANCE: f32 = 1e-4;

/// Collision tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub floor_threshold: f32,
    pub skin: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            floor_threshold: DEFAULT_FLOOR_THRESHOLD,
            skin: DEFAULT_SKIN,
        }
    }
}

/// How a resolved contact was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Floor,
    Wall,
}

/// Outcome of one resolver pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Deepest contact found, before the push-out was applied
    pub contact: Option<Contact>,
    pub kind: Option<ContactKind>,
    /// Body went from airborne to grounded in this pass
    pub landed: bool,
    /// Body went from grounded to airborne without jumping
    pub left_ground: bool,
}

/// Separates the player capsule from static geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver {
    config: CollisionConfig,
}

impl CollisionResolver {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    #[inline]
    pub fn is_floor(&self, normal: Vec3) -> bool {
        normal.y > self.config.floor_threshold
    }

    /// Deepest contact for `capsule` across `indices`.
    pub fn deepest_contact(capsule: &Capsule, indices: &[&dyn SpatialIndex]) -> Option<Contact> {
        indices
            .iter()
            .filter_map(|index| index.query_capsule(capsule))
            .max_by(|a, b| a.depth.total_cmp(&b.depth))
    }

    /// How far below the body the ground probe reaches after moving
    /// horizontally at `speed` for `dt`.
    pub fn probe_distance(&self, speed: f32, dt: f32) -> f32 {
        let threshold = self.config.floor_threshold.clamp(1e-3, 1.0);
        let max_grade = (1.0 - threshold * threshold).sqrt() / threshold;
        2.0 * self.config.skin + speed.max(0.0) * dt.max(0.0) * max_grade
    }

    /// Look for a floor within `distance` below `position`.
    ///
    /// # Returns
    /// The height at which the body rests one skin above that floor
    pub fn probe_floor(
        &self,
        position: Vec3,
        shape: &CapsuleShape,
        indices: &[&dyn SpatialIndex],
        distance: f32,
    ) -> Option<f32> {
        let probe_y = position.y - distance;
        let probe = shape.at(Vec3::new(position.x, probe_y, position.z));
        let contact = Self::deepest_contact(&probe, indices)?;
        if !self.is_floor(contact.normal) {
            return None;
        }
        Some(probe_y + (contact.depth + self.config.skin) / contact.normal.y)
    }

    /// Resolve the body against `indices` for one substep of `dt` seconds.
    pub fn resolve(
        &self,
        body: &mut PlayerBody,
        shape: &CapsuleShape,
        indices: &[&dyn SpatialIndex],
        dt: f32,
    ) -> Resolution {
        let was_grounded = body.grounded;
        let capsule = shape.at(body.position);

        let Some(contact) = Self::deepest_contact(&capsule, indices) else {
            self.keep_or_lose_ground(body, shape, indices, was_grounded, dt);
            return Resolution {
                contact: None,
                kind: None,
                landed: false,
                left_ground: was_grounded && !body.grounded,
            };
        };

        body.position += contact.normal * (contact.depth + self.config.skin);

        let kind = if self.is_floor(contact.normal) {
            body.land();
            ContactKind::Floor
        } else {
            let into_surface = body.velocity.dot(contact.normal);
            if into_surface < 0.0 {
                body.velocity -= contact.normal * into_surface;
            }
            self.keep_or_lose_ground(body, shape, indices, was_grounded, dt);
            ContactKind::Wall
        };

        trace!(
            ?kind,
            normal = ?contact.normal,
            depth = contact.depth,
            position = ?body.position,
            "resolved contact"
        );

        Resolution {
            contact: Some(contact),
            kind: Some(kind),
            landed: !was_grounded && body.grounded,
            left_ground: was_grounded && !body.grounded,
        }
    }

    fn keep_or_lose_ground(
        &self,
        body: &mut PlayerBody,
        shape: &CapsuleShape,
        indices: &[&dyn SpatialIndex],
        was_grounded: bool,
        dt: f32,
    ) {
        if !was_grounded || body.velocity.y > 0.0 {
            body.grounded = false;
            return;
        }
        let distance = self.probe_distance(body.horizontal_speed(), dt);
        let Some(rest_y) = self.probe_floor(body.position, shape, indices, distance) else {
            body.grounded = false;
            return;
        };
        if body.position.y - rest_y > SNAP_TOLERANCE {
            trace!(drop = body.position.y - rest_y, "snapped to ground");
            body.position.y = rest_y;
        }
        body.grounded = true;
        body.velocity.y = 0.0;
    }
}
