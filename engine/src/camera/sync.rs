//! Camera Sync
//!
//! Copies the controller's eye pose onto whatever the renderer uses as its
//! camera. The engine does not render; a renderer implements
//! [`RenderCamera`] for its own camera type, or uploads a [`CameraUniform`]
//! built from a [`CameraTransform`].
//!
//! # Example
//!
//! ```rust,ignore
//! use fps_rig_engine::camera::{CameraTransform, CameraUniform};
//!
//! let mut camera = CameraTransform::default();
//! controller.sync_camera(&mut camera);
//! let uniform = CameraUniform::from_transform(&camera);
//! queue.write_buffer(&buffer, 0, bytemuck::bytes_of(&uniform));
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use static_assertions::assert_eq_size;

/// A camera that can be driven by the first-person controller.
pub trait RenderCamera {
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
}

/// Plain position + rotation camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform {
    /// Unit look direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

impl RenderCamera for CameraTransform {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

/// GPU-ready camera block.
///
/// Layout (96 bytes):
///   offset  0: view (mat4x4<f32>)     = 64 bytes
///   offset 64: eye (vec4<f32>)        = 16 bytes (w = 1)
///   offset 80: rotation (vec4<f32>)   = 16 bytes (xyzw quaternion)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub rotation: [f32; 4],
}

assert_eq_size!(CameraUniform, [f32; 24]);

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from_transform(&CameraTransform::default())
    }
}

impl CameraUniform {
    pub fn from_transform(camera: &CameraTransform) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            eye: camera.position.extend(1.0).to_array(),
            rotation: camera.rotation.to_array(),
        }
    }
}
