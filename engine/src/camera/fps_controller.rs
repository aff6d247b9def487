//! FPS Orientation Module
//!
//! First-person look orientation driven by pointer-locked mouse motion.
//! Mouse deltas are normalized by the viewport size, so the same physical
//! sweep across the window turns the view by the same angle regardless of
//! resolution.
//!
//! Key features:
//! - Yaw about world +Y, unrestricted
//! - Pitch about the local X axis, clamped to ±60 degrees by default
//! - Rotation composed as `yaw * pitch`, which never introduces roll
//! - No smoothing; instant response
//!
//! # Coordinate System
//! - +X = right
//! - +Y = up
//! - -Z = forward at yaw = 0, pitch = 0

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Radians of yaw per full viewport width of horizontal motion.
pub const DEFAULT_YAW_SPEED: f32 = 8.0;

/// Radians of pitch per full viewport height of vertical motion.
pub const DEFAULT_PITCH_SPEED: f32 = 5.0;

/// Pitch limit in degrees (symmetric).
pub const DEFAULT_PITCH_LIMIT_DEGREES: f32 = 60.0;

/// Look sensitivity and limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub pitch_limit_degrees: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            yaw_speed: DEFAULT_YAW_SPEED,
            pitch_speed: DEFAULT_PITCH_SPEED,
            pitch_limit_degrees: DEFAULT_PITCH_LIMIT_DEGREES,
        }
    }
}

impl LookConfig {
    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit_degrees.to_radians()
    }
}

/// Size of the window the mouse deltas are measured in, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width and height with zero or invalid extents replaced by 1.
    pub fn sanitized(&self) -> (f32, f32) {
        let fix = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        (fix(self.width), fix(self.height))
    }
}

/// First-person view orientation.
///
/// ## Usage
/// ```rust,ignore
/// let mut look = FpsOrientation::new();
///
/// // Once per tick, with the consumed mouse delta
/// look.apply_mouse_delta(dx, dy, viewport);
///
/// let rotation = look.rotation();
/// let forward = look.forward();
/// ```
#[derive(Clone, Debug)]
pub struct FpsOrientation {
    /// Horizontal angle (radians), unrestricted
    yaw: f32,
    /// Vertical angle (radians), clamped to `±pitch_limit`
    pitch: f32,
    yaw_speed: f32,
    pitch_speed: f32,
    pitch_limit: f32,
}

impl Default for FpsOrientation {
    fn default() -> Self {
        Self::from_config(&LookConfig::default())
    }
}

impl FpsOrientation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LookConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            yaw_speed: config.yaw_speed,
            pitch_speed: config.pitch_speed,
            pitch_limit: config.pitch_limit().abs(),
        }
    }

    /// Start facing a given yaw (radians).
    pub fn with_yaw(yaw: f32) -> Self {
        Self {
            yaw,
            ..Default::default()
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch (radians, clamped to the limit).
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Apply one tick's worth of mouse motion.
    ///
    /// # Arguments
    /// * `dx` - Horizontal motion in pixels. Positive = mouse right = turn right
    /// * `dy` - Vertical motion in pixels. Positive = mouse down = look down
    /// * `viewport` - Window size the deltas are measured against
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, viewport: Viewport) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let (width, height) = viewport.sanitized();
        let x = dx / width;
        let y = dy / height;

        self.yaw -= x * self.yaw_speed;
        self.set_pitch(self.pitch - y * self.pitch_speed);
    }

    /// Orientation quaternion: yaw about world Y, then pitch about local X.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Yaw-only rotation used for movement.
    #[inline]
    pub fn heading(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Look direction including pitch. Unit length.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Right direction. Always horizontal and unit length.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Forward direction projected onto the XZ plane.
    #[inline]
    pub fn flat_forward(&self) -> Vec3 {
        self.heading() * Vec3::NEG_Z
    }

    /// Right direction on the XZ plane.
    #[inline]
    pub fn flat_right(&self) -> Vec3 {
        self.heading() * Vec3::X
    }

    /// Turn to face `target` as seen from `eye`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        let to_target = target - eye;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = (-to_target.x).atan2(-to_target.z);
            self.set_pitch((to_target.y / distance).asin());
        }
    }

    /// Reset orientation to default (looking toward -Z)
    pub fn reset_orientation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn square_viewport() -> Viewport {
        Viewport::new(1000.0, 1000.0)
    }

    #[test]
    fn test_default_values() {
        let look = FpsOrientation::new();
        assert_eq!(look.yaw(), 0.0);
        assert_eq!(look.pitch(), 0.0);
        assert!((look.pitch_limit() - 60.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(100.0, 0.0, square_viewport());

        // 100 / 1000 * 8 = 0.8 rad, negative yaw turns toward +X
        assert!((look.yaw() + 0.8).abs() < 1e-5);
        assert_eq!(look.pitch(), 0.0);
        assert!(look.forward().x > 0.0);
    }

    #[test]
    fn test_mouse_down_looks_down() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(0.0, 100.0, square_viewport());

        // 100 / 1000 * 5 = 0.5 rad down
        assert!((look.pitch() + 0.5).abs() < 1e-5);
        assert!(look.forward().y < 0.0);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut look = FpsOrientation::new();
        let limit = 60.0_f32.to_radians();

        look.apply_mouse_delta(0.0, -100_000.0, square_viewport());
        assert!((look.pitch() - limit).abs() < 1e-5);

        look.apply_mouse_delta(0.0, 100_000.0, square_viewport());
        assert!((look.pitch() + limit).abs() < 1e-5);
    }

    #[test]
    fn test_zero_viewport_treated_as_one_pixel() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(0.01, 0.0, Viewport::new(0.0, 0.0));
        assert!((look.yaw() + 0.08).abs() < 1e-5);
        assert!(look.yaw().is_finite());
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(f32::NAN, 1.0, square_viewport());
        assert_eq!(look.yaw(), 0.0);
        assert_eq!(look.pitch(), 0.0);
    }

    #[test]
    fn test_forward_at_origin() {
        let forward = FpsOrientation::new().forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_yaw() {
        let look = FpsOrientation::with_yaw(FRAC_PI_2);
        // Positive yaw is counter-clockwise seen from above
        assert!((look.forward() - Vec3::NEG_X).length() < 1e-5);
        assert!((look.right() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_no_roll() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(313.0, -127.0, square_viewport());
        look.apply_mouse_delta(-58.0, 210.0, square_viewport());

        let right = look.right();
        assert!(right.y.abs() < 1e-5, "right vector tilted: {:?}", right);
        assert!(look.up().y > 0.0);
    }

    #[test]
    fn test_direction_vectors_orthonormal() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(100.0, 50.0, square_viewport());

        let (f, r, u) = (look.forward(), look.right(), look.up());
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
    }

    #[test]
    fn test_flat_vectors_ignore_pitch() {
        let mut look = FpsOrientation::with_yaw(PI / 3.0);
        look.set_pitch(0.9);
        assert!(look.flat_forward().y.abs() < 1e-6);
        assert!((look.flat_forward().length() - 1.0).abs() < 1e-5);
        assert!((look.flat_right() - look.right()).length() < 1e-5);
    }

    #[test]
    fn test_look_at() {
        let mut look = FpsOrientation::new();
        look.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 10.0));
        assert!((look.forward() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_reset_orientation() {
        let mut look = FpsOrientation::new();
        look.apply_mouse_delta(500.0, 200.0, square_viewport());
        assert!(look.yaw() != 0.0);
        assert!(look.pitch() != 0.0);

        look.reset_orientation();
        assert_eq!(look.yaw(), 0.0);
        assert_eq!(look.pitch(), 0.0);
    }
}
