//! Spatial index abstraction
//!
//! The controller never looks at triangles directly; it asks a
//! [`SpatialIndex`] for the push-out contact of a capsule and for the
//! nearest ray hit. [`BruteForceIndex`] tests every triangle and serves as
//! the reference answer for the [`Octree`](super::Octree).

use std::fmt::Debug;

use glam::Vec3;

use super::capsule::Capsule;
use super::collision::{Aabb, Contact, RayHit};
use super::mesh::TriangleMesh;
use super::triangle::Triangle;

/// Queryable static collision geometry.
///
/// Implementations must be `Send + Sync` so they can be built on a loader
/// thread and handed to the simulation.
pub trait SpatialIndex: Send + Sync + Debug {
    /// Combined push-out for `capsule` against all overlapping triangles.
    ///
    /// Returns `None` when the capsule overlaps nothing. The contact depth is
    /// always positive and the normal is unit length.
    fn query_capsule(&self, capsule: &Capsule) -> Option<Contact>;

    /// Nearest hit along a normalized ray within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Total number of triangles stored.
    fn triangle_count(&self) -> usize;

    /// Bounds of all stored geometry.
    fn bounds(&self) -> Aabb;
}

/// Resolve `capsule` against `triangles` one by one, moving a working copy
/// out of each hit, and report the total displacement as one contact.
pub fn accumulate_capsule_contact<'a, I>(capsule: &Capsule, triangles: I) -> Option<Contact>
where
    I: IntoIterator<Item = &'a Triangle>,
{
    let mut moved = *capsule;
    for triangle in triangles {
        if let Some(contact) = triangle.capsule_contact(&moved) {
            moved.translate(contact.normal * contact.depth);
        }
    }

    let push = moved.start - capsule.start;
    let depth = push.length();
    if depth <= f32::EPSILON {
        return None;
    }
    Some(Contact::new(push / depth, depth))
}

/// Nearest ray hit among `triangles` closer than `max_distance`.
pub fn nearest_ray_hit<'a, I>(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    triangles: I,
) -> Option<RayHit>
where
    I: IntoIterator<Item = &'a Triangle>,
{
    triangles
        .into_iter()
        .filter_map(|tri| tri.ray_hit(origin, direction))
        .filter(|hit| hit.distance <= max_distance)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Index that checks every triangle on every query.
#[derive(Debug, Clone, Default)]
pub struct BruteForceIndex {
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
}

impl BruteForceIndex {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bounds = (!triangles.is_empty()).then(|| {
            triangles
                .iter()
                .fold(Aabb::empty(), |acc, tri| acc.union(&tri.bounds()))
        });
        Self { triangles, bounds }
    }

    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::new(mesh.triangles().to_vec())
    }
}

impl SpatialIndex for BruteForceIndex {
    fn query_capsule(&self, capsule: &Capsule) -> Option<Contact> {
        let query = capsule.bounds();
        if !self.bounds.is_some_and(|b| b.intersects(&query)) {
            return None;
        }
        accumulate_capsule_contact(capsule, &self.triangles)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        nearest_ray_hit(origin, direction, max_distance, &self.triangles)
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn bounds(&self) -> Aabb {
        self.bounds.unwrap_or_else(Aabb::empty)
    }
}
