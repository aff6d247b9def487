//! Triangle mesh builder
//!
//! Collects world-space collision triangles from simple primitives (boxes,
//! quads, heightfields) before they are handed to a spatial index.
//!
//! # Example
//!
//! ```rust,ignore
//! use fps_rig_engine::physics::{Octree, TriangleMesh};
//! use glam::Vec3;
//!
//! let mut mesh = TriangleMesh::new();
//! mesh.add_box(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(2.0));
//! let index = Octree::from_mesh(&mesh);
//! ```

use glam::{Vec2, Vec3};
use tracing::trace;

use super::collision::Aabb;
use super::triangle::Triangle;

/// Flat list of world-space collision triangles.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    skipped_degenerate: usize,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            skipped_degenerate: 0,
        }
    }

    /// Add one triangle. Zero-area triangles are dropped.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> &mut Self {
        let triangle = Triangle::new(a, b, c);
        if triangle.is_degenerate() {
            self.skipped_degenerate += 1;
            trace!(?a, ?b, ?c, "skipping degenerate triangle");
        } else {
            self.triangles.push(triangle);
        }
        self
    }

    /// Add a planar quad `a-b-c-d` (counter-clockwise seen from the front).
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> &mut Self {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d)
    }

    /// Add a horizontal floor quad centred on `center` facing up.
    pub fn add_floor(&mut self, center: Vec3, half_size: Vec2) -> &mut Self {
        let (x0, x1) = (center.x - half_size.x, center.x + half_size.x);
        let (z0, z1) = (center.z - half_size.y, center.z + half_size.y);
        let y = center.y;
        self.add_quad(
            Vec3::new(x0, y, z1),
            Vec3::new(x1, y, z1),
            Vec3::new(x1, y, z0),
            Vec3::new(x0, y, z0),
        )
    }

    /// Add an axis-aligned box with outward facing triangles.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> &mut Self {
        let min = center - half_extents;
        let max = center + half_extents;
        self.add_box_bounds(&Aabb::new(min, max))
    }

    /// Add an axis-aligned box given by its bounds.
    pub fn add_box_bounds(&mut self, aabb: &Aabb) -> &mut Self {
        let (min, max) = (aabb.min, aabb.max);
        let v = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

        // +X / -X
        self.add_quad(
            v(max.x, min.y, max.z),
            v(max.x, min.y, min.z),
            v(max.x, max.y, min.z),
            v(max.x, max.y, max.z),
        );
        self.add_quad(
            v(min.x, min.y, min.z),
            v(min.x, min.y, max.z),
            v(min.x, max.y, max.z),
            v(min.x, max.y, min.z),
        );
        // +Y / -Y
        self.add_quad(
            v(min.x, max.y, max.z),
            v(max.x, max.y, max.z),
            v(max.x, max.y, min.z),
            v(min.x, max.y, min.z),
        );
        self.add_quad(
            v(min.x, min.y, min.z),
            v(max.x, min.y, min.z),
            v(max.x, min.y, max.z),
            v(min.x, min.y, max.z),
        );
        // +Z / -Z
        self.add_quad(
            v(min.x, min.y, max.z),
            v(max.x, min.y, max.z),
            v(max.x, max.y, max.z),
            v(min.x, max.y, max.z),
        );
        self.add_quad(
            v(max.x, min.y, min.z),
            v(min.x, min.y, min.z),
            v(min.x, max.y, min.z),
            v(max.x, max.y, min.z),
        )
    }

    /// Add a square heightfield.
    ///
    /// # Arguments
    ///
    /// * `center` - World-space centre of the patch (y is the base height)
    /// * `size` - Edge length of the square patch
    /// * `resolution` - Number of cells per side (clamped to at least 1)
    /// * `height` - Height above `center.y` at world `(x, z)`
    pub fn add_heightfield<F>(
        &mut self,
        center: Vec3,
        size: f32,
        resolution: u32,
        height: F,
    ) -> &mut Self
    where
        F: Fn(f32, f32) -> f32,
    {
        let cells = resolution.max(1);
        let step = size / cells as f32;
        let origin = center - Vec3::new(size * 0.5, 0.0, size * 0.5);
        let vertex = |i: u32, j: u32| {
            let x = origin.x + i as f32 * step;
            let z = origin.z + j as f32 * step;
            Vec3::new(x, center.y + height(x, z), z)
        };

        self.triangles.reserve((cells * cells * 2) as usize);
        for j in 0..cells {
            for i in 0..cells {
                let p00 = vertex(i, j);
                let p10 = vertex(i + 1, j);
                let p11 = vertex(i + 1, j + 1);
                let p01 = vertex(i, j + 1);
                self.add_quad(p01, p11, p10, p00);
            }
        }
        self
    }

    /// Move all triangles of `other` into this mesh.
    pub fn append(&mut self, other: TriangleMesh) -> &mut Self {
        self.triangles.extend(other.triangles);
        self.skipped_degenerate += other.skipped_degenerate;
        self
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of zero-area triangles that were dropped while building.
    pub fn skipped_degenerate(&self) -> usize {
        self.skipped_degenerate
    }

    pub fn bounds(&self) -> Aabb {
        self.triangles
            .iter()
            .fold(Aabb::empty(), |acc, tri| acc.union(&tri.bounds()))
    }
}
