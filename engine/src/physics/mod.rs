//! Physics module
//!
//! Custom capsule-vs-triangle collision for the first-person controller.
//! No external physics library; static level geometry is stored as
//! triangles in a [`SpatialIndex`] and the player is a kinematic capsule.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s² (gravity is signed, negative = down)
//!
//! # Submodules
//!
//! - [`collision`] - Contacts, ray hits, AABBs and closest-point math
//! - [`capsule`] - Capsule volume and the player's capsule shape
//! - [`triangle`] - Triangle vs capsule and triangle vs ray
//! - [`mesh`] - Triangle soup builder (boxes, quads, heightfields)
//! - [`spatial_index`] - The index trait and a brute-force reference index
//! - [`octree`] - Octree index used for level geometry
//! - [`resolver`] - Per-substep push-out and floor/wall classification

pub mod capsule;
pub mod collision;
pub mod mesh;
pub mod octree;
pub mod resolver;
pub mod spatial_index;
pub mod triangle;

// Re-export commonly used types at the physics module level
pub use capsule::{Capsule, CapsuleShape};
pub use collision::{Aabb, Contact, RayHit, ray_aabb_intersect};
pub use mesh::TriangleMesh;
pub use octree::Octree;
pub use resolver::{CollisionConfig, CollisionResolver, ContactKind, Resolution};
pub use spatial_index::{BruteForceIndex, SpatialIndex};
pub use triangle::Triangle;
