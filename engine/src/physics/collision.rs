//! Collision primitives
//!
//! Narrow-phase building blocks shared by the spatial indices:
//! axis-aligned boxes, ray-AABB slabs, and closest-point queries between
//! points, segments and triangles.
//!
//! ```ignore
//! let crate_box = Aabb::new(Vec3::new(-12.0, 0.0, -2.0), Vec3::new(-8.0, 4.0, 2.0));
//! let eye = Vec3::new(0.0, 1.0, 0.0);
//! if let Some(t) = ray_aabb_intersect(eye, Vec3::NEG_X, &crate_box) {
//!     assert_eq!(eye + Vec3::NEG_X * t, Vec3::new(-8.0, 1.0, 0.0));
//! }
//! ```

use glam::Vec3;

/// Result of a capsule overlap query.
///
/// Moving the capsule by `normal * depth` separates it from the geometry
/// that produced the contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit push-out direction, pointing away from the geometry
    pub normal: Vec3,
    /// Penetration depth along `normal` (always > 0)
    pub depth: f32,
}

impl Contact {
    /// Creates a new contact.
    pub fn new(normal: Vec3, depth: f32) -> Self {
        Self { normal, depth }
    }
}

/// Information about a ray hit against triangle geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray hit
    pub position: Vec3,
    /// Surface normal at the hit point, facing the ray origin
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that contains nothing; expanding it by any point
    /// yields a box around that point.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing all `points`.
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::empty(), |mut aabb, &p| {
            aabb.expand_to_include(p);
            aabb
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Aabb {
        Aabb::new(self.min - Vec3::splat(amount), self.max + Vec3::splat(amount))
    }

    /// Overlap test (touching counts as overlapping).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// Split into the eight octants around the centre.
    pub fn octants(&self) -> [Aabb; 8] {
        let center = self.center();
        std::array::from_fn(|i| {
            let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
                if i & bit == 0 { (lo, mid) } else { (mid, hi) }
            };
            let (x0, x1) = pick(1, self.min.x, center.x, self.max.x);
            let (y0, y1) = pick(2, self.min.y, center.y, self.max.y);
            let (z0, z1) = pick(4, self.min.z, center.z, self.max.z);
            Aabb::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1))
        })
    }
}

/// Slab test of a ray against `aabb`.
///
/// # Arguments
/// * `origin` - Ray start
/// * `dir` - Normalized ray direction
/// * `aabb` - Box to test
///
/// # Returns
/// Distance to the first crossing of the box surface in front of `origin`:
/// the entry point, or the exit point when `origin` is inside. `None` if the
/// box lies entirely behind the ray or is missed.
pub fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb: &Aabb) -> Option<f32> {
    // Axis-parallel rays get a huge reciprocal instead of infinity so a zero
    // offset stays zero rather than NaN
    let recip = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX.copysign(d) };
    let inv = Vec3::new(recip(dir.x), recip(dir.y), recip(dir.z));

    let t_lo = (aabb.min - origin) * inv;
    let t_hi = (aabb.max - origin) * inv;
    let near = t_lo.min(t_hi).max_element();
    let far = t_lo.max(t_hi).min_element();

    if far < near || far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}

/// Distance along the ray at which it enters `aabb`, or 0 if the origin is
/// already inside. Used for pruning during traversal.
pub fn ray_aabb_entry(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    if aabb.contains_point(ray_origin) {
        return Some(0.0);
    }
    ray_aabb_intersect(ray_origin, ray_dir, aabb)
}

/// Closest point on triangle `abc` to point `p` (Voronoi region walk).
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Closest points between segments `p1-q1` and `p2-q2`.
///
/// Returns `(point_on_first, point_on_second)`. Degenerate (zero length)
/// segments are treated as points.
pub fn closest_points_segment_segment(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    const EPSILON: f32 = 1e-10;

    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    let (s, t) = if a <= EPSILON && e <= EPSILON {
        (0.0, 0.0)
    } else if a <= EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // Parallel segments: any s works, pick the start
            let mut s = if denom.abs() > EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_slab_entry_distance() {
        let t = ray_aabb_intersect(Vec3::new(0.3, -0.2, -5.0), Vec3::Z, &unit_box()).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let t = ray_aabb_intersect(Vec3::new(-3.0, -3.0, 0.0), diagonal, &unit_box()).unwrap();
        assert!((t - 2.0 * 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_slab_misses() {
        // Parallel to the box, offset in Y
        assert!(ray_aabb_intersect(Vec3::new(0.0, 5.0, -5.0), Vec3::Z, &unit_box()).is_none());
        // Pointing away
        assert!(ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &unit_box()).is_none());
    }

    #[test]
    fn test_slab_from_inside_reports_exit() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, 0.5), Vec3::Z, &unit_box()).unwrap();
        assert!((t - 0.5).abs() < 1e-5);
        assert_eq!(ray_aabb_entry(Vec3::ZERO, Vec3::Z, &unit_box()), Some(0.0));
    }

    #[test]
    fn test_slab_axis_parallel_ray_is_finite() {
        // Zero X and Y direction components
        let t = ray_aabb_intersect(Vec3::new(0.5, -0.9, -4.0), Vec3::Z, &unit_box()).unwrap();
        assert!(t.is_finite());
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_union_and_contains() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(&b);
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(!a.intersects(&b));
        assert!(u.intersects(&a));
    }

    #[test]
    fn test_empty_aabb_from_points() {
        assert!(Aabb::empty().is_empty());
        let aabb = Aabb::from_points(&[Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 2.0, 3.0)]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_octants_cover_parent() {
        let parent = unit_box();
        let octants = parent.octants();
        for octant in &octants {
            assert!(parent.contains(octant));
            assert_eq!(octant.half_extents(), Vec3::splat(0.5));
        }
        // All eight centres are distinct
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(octants[i].center(), octants[j].center());
            }
        }
    }

    #[test]
    fn test_closest_point_inside_face() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 4.0);
        let p = Vec3::new(1.0, 3.0, 1.0);
        let closest = closest_point_on_triangle(p, a, b, c);
        assert!((closest - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_closest_point_vertex_and_edge_regions() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 4.0);

        let near_a = closest_point_on_triangle(Vec3::new(-1.0, 1.0, -1.0), a, b, c);
        assert!((near_a - a).length() < 1e-5);

        let near_ab = closest_point_on_triangle(Vec3::new(2.0, 1.0, -3.0), a, b, c);
        assert!((near_ab - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_segment_segment_crossing() {
        let (p, q) = closest_points_segment_segment(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert!((p - Vec3::ZERO).length() < 1e-5);
        assert!((q - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_segment_segment_parallel() {
        let (p, q) = closest_points_segment_segment(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        );
        assert!(((p - q).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_segment_degenerate_point() {
        let point = Vec3::new(1.0, 1.0, 0.0);
        let (p, q) = closest_points_segment_segment(
            point,
            point,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(p, point);
        assert!((q - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }
}
