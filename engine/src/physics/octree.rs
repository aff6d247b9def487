//! Octree spatial index
//!
//! Loose-fit octree over static triangles. Each node keeps the triangles that
//! do not fit entirely inside one of its octants; the rest are pushed down to
//! children. Capsule queries visit only nodes whose bounds overlap the capsule
//! bounds, ray queries only nodes the ray enters before the best hit so far.
//!
//! Query results match [`BruteForceIndex`](super::BruteForceIndex) for the
//! same triangles up to the order contacts are accumulated in.

use glam::Vec3;
use tracing::debug;

use super::capsule::Capsule;
use super::collision::{Aabb, Contact, RayHit, ray_aabb_entry};
use super::mesh::TriangleMesh;
use super::spatial_index::{SpatialIndex, accumulate_capsule_contact};
use super::triangle::Triangle;

/// Nodes holding more triangles than this are split.
pub const MAX_TRIANGLES_PER_NODE: usize = 8;

/// Maximum subdivision depth.
pub const MAX_DEPTH: u32 = 16;

/// Padding added around the root so flat geometry still has volume.
const ROOT_PADDING: f32 = 0.01;

#[derive(Debug, Clone)]
struct OctreeNode {
    bounds: Aabb,
    triangles: Vec<Triangle>,
    children: Vec<OctreeNode>,
}

impl OctreeNode {
    fn build(bounds: Aabb, triangles: Vec<Triangle>, depth: u32) -> Self {
        if triangles.len() <= MAX_TRIANGLES_PER_NODE || depth >= MAX_DEPTH {
            return Self::leaf(bounds, triangles);
        }

        let octants = bounds.octants();
        let mut buckets: [Vec<Triangle>; 8] = std::array::from_fn(|_| Vec::new());
        let mut straddling = Vec::new();

        for triangle in triangles {
            let tri_bounds = triangle.bounds();
            match octants.iter().position(|octant| octant.contains(&tri_bounds)) {
                Some(i) => buckets[i].push(triangle),
                None => straddling.push(triangle),
            }
        }

        if buckets.iter().all(Vec::is_empty) {
            return Self::leaf(bounds, straddling);
        }

        let children = octants
            .into_iter()
            .zip(buckets)
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(octant, bucket)| OctreeNode::build(octant, bucket, depth + 1))
            .collect();

        Self {
            bounds,
            triangles: straddling,
            children,
        }
    }

    fn leaf(bounds: Aabb, triangles: Vec<Triangle>) -> Self {
        Self {
            bounds,
            triangles,
            children: Vec::new(),
        }
    }

    fn collect_overlapping<'a>(&'a self, query: &Aabb, out: &mut Vec<&'a Triangle>) {
        if !self.bounds.intersects(query) {
            return;
        }
        out.extend(
            self.triangles
                .iter()
                .filter(|tri| tri.bounds().intersects(query)),
        );
        for child in &self.children {
            child.collect_overlapping(query, out);
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, best: &mut Option<RayHit>, max_distance: f32) {
        let limit = best.map_or(max_distance, |hit| hit.distance);
        match ray_aabb_entry(origin, direction, &self.bounds) {
            Some(entry) if entry <= limit => {}
            _ => return,
        }

        for triangle in &self.triangles {
            if let Some(hit) = triangle.ray_hit(origin, direction) {
                let limit = best.map_or(max_distance, |b| b.distance);
                if hit.distance <= limit {
                    *best = Some(hit);
                }
            }
        }
        for child in &self.children {
            child.raycast(origin, direction, best, max_distance);
        }
    }

    fn depth(&self) -> u32 {
        1 + self.children.iter().map(OctreeNode::depth).max().unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(OctreeNode::node_count).sum::<usize>()
    }
}

/// Octree over a fixed set of triangles.
#[derive(Debug, Clone)]
pub struct Octree {
    root: OctreeNode,
    triangle_count: usize,
}

impl Octree {
    /// Build the tree. Building is linear-ish in triangle count and is meant
    /// to happen off the simulation thread for large meshes.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        let triangle_count = triangles.len();
        let bounds = if triangles.is_empty() {
            Aabb::new(Vec3::ZERO, Vec3::ZERO)
        } else {
            triangles
                .iter()
                .fold(Aabb::empty(), |acc, tri| acc.union(&tri.bounds()))
        }
        .inflate(ROOT_PADDING);

        let root = OctreeNode::build(bounds, triangles, 0);
        debug!(
            triangles = triangle_count,
            nodes = root.node_count(),
            depth = root.depth(),
            "built octree"
        );
        Self {
            root,
            triangle_count,
        }
    }

    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::build(mesh.triangles().to_vec())
    }

    /// Number of levels in the tree (a single leaf has depth 1).
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Triangles whose bounds overlap `query`.
    pub fn triangles_near(&self, query: &Aabb) -> Vec<&Triangle> {
        let mut out = Vec::new();
        self.root.collect_overlapping(query, &mut out);
        out
    }
}

impl SpatialIndex for Octree {
    fn query_capsule(&self, capsule: &Capsule) -> Option<Contact> {
        let candidates = self.triangles_near(&capsule.bounds());
        if candidates.is_empty() {
            return None;
        }
        accumulate_capsule_contact(capsule, candidates)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let mut best = None;
        self.root.raycast(origin, direction, &mut best, max_distance);
        best
    }

    fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    fn bounds(&self) -> Aabb {
        self.root.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn grid_mesh() -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        mesh.add_heightfield(Vec3::ZERO, 40.0, 16, |_, _| 0.0);
        mesh
    }

    #[test]
    fn test_small_mesh_stays_leaf() {
        let mut mesh = TriangleMesh::new();
        mesh.add_box(Vec3::ZERO, Vec3::ONE);
        let octree = Octree::from_mesh(&mesh);
        assert_eq!(octree.depth(), 1);
        assert_eq!(octree.triangle_count(), 12);
    }

    #[test]
    fn test_large_mesh_subdivides() {
        let octree = Octree::from_mesh(&grid_mesh());
        assert_eq!(octree.triangle_count(), 16 * 16 * 2);
        assert!(octree.depth() > 1);
        assert!(octree.node_count() > 1);
    }

    #[test]
    fn test_all_triangles_reachable() {
        let mesh = grid_mesh();
        let octree = Octree::from_mesh(&mesh);
        let everything = octree.triangles_near(&octree.bounds());
        assert_eq!(everything.len(), mesh.len());
    }

    #[test]
    fn test_query_culls_distant_triangles() {
        let octree = Octree::from_mesh(&grid_mesh());
        let capsule = Capsule::new(Vec3::new(5.0, 0.2, 5.0), Vec3::new(5.0, 1.0, 5.0), 0.35);
        let near = octree.triangles_near(&capsule.bounds());
        assert!(!near.is_empty());
        assert!(near.len() < 32);

        let contact = octree.query_capsule(&capsule).unwrap();
        assert!((contact.normal - Vec3::Y).length() < 1e-4);
        assert!((contact.depth - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_empty_octree() {
        let octree = Octree::build(Vec::new());
        let capsule = Capsule::new(Vec3::ZERO, Vec3::Y, 0.5);
        assert!(octree.query_capsule(&capsule).is_none());
        assert!(octree.raycast(Vec3::Y, Vec3::NEG_Y, 10.0).is_none());
    }

    #[test]
    fn test_raycast_finds_nearest_across_nodes() {
        let mut mesh = grid_mesh();
        let mut upper = TriangleMesh::new();
        upper.add_floor(Vec3::new(3.0, 4.0, 3.0), Vec2::splat(1.0));
        mesh.append(upper);
        let octree = Octree::from_mesh(&mesh);

        let hit = octree.raycast(Vec3::new(3.0, 10.0, 3.0), Vec3::NEG_Y, 100.0).unwrap();
        assert!((hit.distance - 6.0).abs() < 1e-4);

        let hit = octree.raycast(Vec3::new(-7.0, 10.0, -7.0), Vec3::NEG_Y, 100.0).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-4);
    }
}
