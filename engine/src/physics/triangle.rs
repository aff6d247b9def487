//! World-space triangle with capsule and ray tests.

use glam::Vec3;
use static_assertions::assert_eq_size;

use super::capsule::Capsule;
use super::collision::{
    Aabb, Contact, RayHit, closest_point_on_triangle, closest_points_segment_segment,
};

/// Below this separation the capsule axis is treated as touching the triangle.
const TOUCH_EPSILON: f32 = 1e-6;

/// A single collision triangle with a precomputed unit face normal.
///
/// The face normal follows counter-clockwise winding, but collision treats
/// triangles as two-sided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub normal: Vec3,
}

assert_eq_size!(Triangle, [f32; 12]);

impl Triangle {
    /// Build a triangle from three vertices.
    ///
    /// Degenerate (zero area) triangles get a zero normal; use
    /// [`Triangle::is_degenerate`] to filter them.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self { a, b, c, normal }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }

    /// Closest point on the triangle to `point`.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        closest_point_on_triangle(point, self.a, self.b, self.c)
    }

    /// Closest pair of points between segment `p-q` and this triangle.
    ///
    /// Returns `(point_on_segment, point_on_triangle)`. When the segment
    /// pierces the triangle both points are the piercing point.
    pub fn closest_points_to_segment(&self, p: Vec3, q: Vec3) -> (Vec3, Vec3) {
        if !self.is_degenerate() {
            let dp = (p - self.a).dot(self.normal);
            let dq = (q - self.a).dot(self.normal);
            if dp * dq <= 0.0 && dp != dq {
                let crossing = p + (q - p) * (dp / (dp - dq));
                if (self.closest_point(crossing) - crossing).length_squared()
                    < TOUCH_EPSILON * TOUCH_EPSILON
                {
                    return (crossing, crossing);
                }
            }
        }

        let mut best = (p, self.closest_point(p));
        let mut best_dist = (best.0 - best.1).length_squared();
        let mut consider = |pair: (Vec3, Vec3)| {
            let dist = (pair.0 - pair.1).length_squared();
            if dist < best_dist {
                best = pair;
                best_dist = dist;
            }
        };

        consider((q, self.closest_point(q)));
        for (e0, e1) in [(self.a, self.b), (self.b, self.c), (self.c, self.a)] {
            consider(closest_points_segment_segment(p, q, e0, e1));
        }

        best
    }

    /// Overlap between a capsule and this triangle.
    ///
    /// The returned normal points from the triangle toward the capsule axis.
    /// When the axis itself touches or crosses the triangle, the push-out
    /// follows the face normal on the side of the capsule centre.
    pub fn capsule_contact(&self, capsule: &Capsule) -> Option<Contact> {
        let (on_axis, on_triangle) = self.closest_points_to_segment(capsule.start, capsule.end);
        let offset = on_axis - on_triangle;
        let distance = offset.length();
        if distance >= capsule.radius {
            return None;
        }

        if distance > TOUCH_EPSILON {
            return Some(Contact::new(offset / distance, capsule.radius - distance));
        }

        if self.is_degenerate() {
            return None;
        }

        let normal = if (capsule.center() - self.a).dot(self.normal) >= 0.0 {
            self.normal
        } else {
            -self.normal
        };
        // Deepest axis endpoint below the plane on the push side
        let plane = self.a.dot(normal);
        let deepest = (capsule.start.dot(normal) - plane).min(capsule.end.dot(normal) - plane);
        Some(Contact::new(normal, capsule.radius - deepest.min(0.0)))
    }

    /// Möller-Trumbore ray intersection (two-sided).
    ///
    /// `direction` must be normalized. Returns the distance along the ray.
    pub fn ray_intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let h = direction.cross(edge2);
        let det = edge1.dot(h);
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = origin - self.a;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        (t >= 0.0).then_some(t)
    }

    /// Ray hit with position and a normal facing the ray origin.
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let distance = self.ray_intersect(origin, direction)?;
        let normal = if self.normal.dot(direction) > 0.0 {
            -self.normal
        } else {
            self.normal
        };
        Some(RayHit {
            position: origin + direction * distance,
            normal,
            distance,
        })
    }
}
