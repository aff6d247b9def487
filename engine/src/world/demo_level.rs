//! Demo Level
//!
//! A walled 100 m x 100 m yard with a crate, split in two by a wall with a
//! keycard door. A small rolling terrain patch behind the door is built
//! separately so it can be streamed in from a loader thread.
//!
//! ```text
//!   z = -50 +-----------------------------+
//!           |        terrain patch        |
//!   z = -25 |=============[door]==========|  divider wall, 10 m tall
//!           |                             |
//!           |   [crate]         keycard   |
//!           |          spawn              |
//!   z = +50 +-----------------------------+
//!        x = -50                       x = +50
//! ```

use glam::{Vec2, Vec3};

use super::level::Level;
use crate::physics::{Aabb, Octree, TriangleMesh};

/// Where the player's capsule base starts.
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 2.0, 10.0);

/// Keycard pickup location, within reach of a standing player.
pub const KEYCARD_POSITION: Vec3 = Vec3::new(12.0, 1.0, 10.0);

/// Half the edge length of the square yard.
pub const YARD_HALF_SIZE: f32 = 50.0;

/// Height of the outer walls and the divider.
pub const WALL_HEIGHT: f32 = 10.0;

/// Z of the divider wall's centre plane.
pub const DIVIDER_Z: f32 = -25.0;

/// Doorway opening: x in `[-DOOR_HALF_WIDTH, DOOR_HALF_WIDTH]`, y in `[0, DOOR_HEIGHT]`.
pub const DOOR_HALF_WIDTH: f32 = 2.0;
pub const DOOR_HEIGHT: f32 = 4.0;

const WALL_THICKNESS: f32 = 1.0;

/// Floor, crate, outer walls and the divider (without the door leaf).
pub fn static_geometry() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(64);
    mesh.add_floor(Vec3::ZERO, Vec2::splat(YARD_HALF_SIZE));

    // 4 x 4 x 4 crate sitting on the floor
    mesh.add_box(Vec3::new(-10.0, 2.0, 0.0), Vec3::splat(2.0));

    // Outer walls
    let half = YARD_HALF_SIZE;
    let t = WALL_THICKNESS;
    let h = WALL_HEIGHT;
    mesh.add_box_bounds(&Aabb::new(
        Vec3::new(-half - t, 0.0, -half - t),
        Vec3::new(half + t, h, -half),
    ));
    mesh.add_box_bounds(&Aabb::new(
        Vec3::new(-half - t, 0.0, half),
        Vec3::new(half + t, h, half + t),
    ));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(-half - t, 0.0, -half), Vec3::new(-half, h, half)));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(half, 0.0, -half), Vec3::new(half + t, h, half)));

    // Divider with a doorway and lintel
    let z0 = DIVIDER_Z - t * 0.5;
    let z1 = DIVIDER_Z + t * 0.5;
    let door = DOOR_HALF_WIDTH;
    mesh.add_box_bounds(&Aabb::new(Vec3::new(-half, 0.0, z0), Vec3::new(-door, h, z1)));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(door, 0.0, z0), Vec3::new(half, h, z1)));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(-door, DOOR_HEIGHT, z0), Vec3::new(door, h, z1)));

    mesh
}

/// The door leaf filling the doorway.
pub fn door_geometry() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(12);
    mesh.add_box_bounds(&Aabb::new(
        Vec3::new(-DOOR_HALF_WIDTH, 0.0, DIVIDER_Z - 0.25),
        Vec3::new(DOOR_HALF_WIDTH, DOOR_HEIGHT, DIVIDER_Z + 0.25),
    ));
    mesh
}

/// Gentle hills behind the divider. Heights stay within `[0, 0.6]` so the
/// patch blends into the floor.
pub fn terrain_patch() -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    mesh.add_heightfield(Vec3::new(0.0, 0.0, -38.0), 20.0, 32, |x, z| {
        0.3 * (1.0 + (x * 0.5).sin() * (z * 0.5).cos())
    });
    mesh
}

/// The demo level without the terrain patch.
pub fn build_demo_level() -> Level {
    let mut level = Level::new();
    level.add_layer("yard", Octree::from_mesh(&static_geometry()));
    level.set_door(Octree::from_mesh(&door_geometry()));
    level.set_keycard(KEYCARD_POSITION);
    level
}
