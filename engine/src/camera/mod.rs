//! Camera Module
//!
//! First-person view state: look orientation, head bob, and the hand-off of
//! the eye pose to a renderer. This module is window-system agnostic; it
//! only deals with camera state and math.

pub mod fps_controller;
pub mod head_bob;
pub mod sync;

pub use fps_controller::{FpsOrientation, LookConfig, Viewport};
pub use head_bob::{HeadBob, HeadBobConfig};
pub use sync::{CameraTransform, CameraUniform, RenderCamera};
