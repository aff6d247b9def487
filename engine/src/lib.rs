//! FPS Rig Engine Library
//!
//! A first-person player rig: pointer-locked mouse look, camera-relative
//! WASD movement with sprint and jump, substepped capsule collision against
//! octree-indexed triangle geometry, and a keycard-gated door.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic keyboard and mouse sampling
//! - [`camera`] - Yaw/pitch orientation, head bob, render camera sync
//! - [`physics`] - Capsules, triangles, spatial indices, collision resolver
//! - [`player`] - Body state, movement integration, the per-tick controller
//! - [`world`] - Level geometry layers, the keycard and door, demo level
//! - [`config`] - Serializable controller tuning
//! - [`game_loop`] - Frame timing and the per-frame simulation update
//! - [`logging`] - `tracing` subscriber setup for binaries
//!
//! # Example
//!
//! ```ignore
//! use fps_rig_engine::{ControllerConfig, FirstPersonController, KeyCode};
//! use fps_rig_engine::camera::CameraTransform;
//! use fps_rig_engine::world::{build_demo_level, demo_level::SPAWN_POINT};
//!
//! let level = build_demo_level();
//! let mut player = FirstPersonController::new(ControllerConfig::default(), SPAWN_POINT);
//! let mut camera = CameraTransform::default();
//!
//! player.input_mut().set_pointer_locked(true);
//! player.input_mut().handle_key(KeyCode::W, true);
//!
//! // every frame
//! player.tick(dt, &level);
//! player.sync_camera(&mut camera);
//! ```

pub mod camera;
pub mod config;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod physics;
pub mod player;
pub mod world;

// Re-export the types most callers touch
pub use config::{ConfigError, ControllerConfig};
pub use game_loop::{FrameDriver, FrameUpdate, Simulation};
pub use input::{InputState, KeyCode, MouseButton};
pub use logging::init_logging;
pub use player::{FirstPersonController, PlayerBody, PlayerMovementController, TickReport};
pub use world::{InteractionOutcome, Level};
