//! Player Movement Controller
//!
//! Converts held movement keys into velocity and integrates the body over
//! one substep. Movement direction is relative to the camera heading.
//!
//! # Physics Model
//!
//! - Move speed: 12.0 m/s, doubled while sprinting
//! - Gravity: -64.0 m/s² (signed, negative = down)
//! - Jump height: 2.0 m, launch speed `sqrt(2 * |g| * h)`
//! - Sprint jumps launch 1.7x faster
//! - Vertical motion uses the midpoint of old and new velocity, which is
//!   exact for constant gravity
//!
//! Horizontal velocity is set directly from input each substep; there is no
//! acceleration ramp or air drag.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fps_rig_engine::player::{PlayerBody, PlayerMovementController};
//!
//! let movement = PlayerMovementController::new();
//! let horizontal = movement.horizontal_velocity(&keys, look.yaw(), sprinting);
//! for _ in 0..substeps {
//!     movement.integrate(&mut body, horizontal, dt / substeps as f32);
//!     resolver.resolve(&mut body, &shape, &indices, dt / substeps as f32);
//! }
//! ```

use glam::{Quat, Vec3};

use super::body::PlayerBody;
use crate::config::ControllerConfig;
use crate::input::MovementKeys;

/// Move speed in meters per second
pub const MOVE_SPEED: f32 = 12.0;

/// Speed multiplier while sprinting
pub const SPRINT_MULTIPLIER: f32 = 2.0;

/// Gravity acceleration in meters per second squared (negative = down)
pub const GRAVITY: f32 = -64.0;

/// Target jump apex height in meters
pub const JUMP_HEIGHT: f32 = 2.0;

/// Launch speed multiplier for jumps started while sprinting
pub const SPRINT_JUMP_FACTOR: f32 = 1.7;

/// Substep integrator for the player body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMovementController {
    /// Ground speed in m/s
    move_speed: f32,
    sprint_multiplier: f32,
    /// Signed gravity in m/s² (negative = down)
    gravity: f32,
    jump_height: f32,
    sprint_jump_factor: f32,
}

impl Default for PlayerMovementController {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            gravity: GRAVITY,
            jump_height: JUMP_HEIGHT,
            sprint_jump_factor: SPRINT_JUMP_FACTOR,
        }
    }
}

impl PlayerMovementController {
    /// Create a new movement controller with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a movement controller with custom ground speed.
    ///
    /// # Arguments
    /// * `move_speed` - Walking speed in m/s
    /// * `sprint_multiplier` - Factor applied while sprinting
    pub fn with_speeds(move_speed: f32, sprint_multiplier: f32) -> Self {
        Self {
            move_speed,
            sprint_multiplier,
            ..Default::default()
        }
    }

    /// Create a movement controller with custom jump physics.
    ///
    /// # Arguments
    /// * `gravity` - Signed gravity in m/s²
    /// * `jump_height` - Apex height in meters
    /// * `sprint_jump_factor` - Launch speed factor when sprinting
    pub fn with_jump_physics(gravity: f32, jump_height: f32, sprint_jump_factor: f32) -> Self {
        Self {
            gravity,
            jump_height,
            sprint_jump_factor,
            ..Default::default()
        }
    }

    /// Create a movement controller from the controller tuning.
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            sprint_multiplier: config.sprint_multiplier,
            gravity: config.gravity,
            jump_height: config.jump_height,
            sprint_jump_factor: config.sprint_jump_factor,
        }
    }

    #[inline]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    #[inline]
    pub fn jump_height(&self) -> f32 {
        self.jump_height
    }

    /// Ground speed for the current sprint state.
    pub fn speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        }
    }

    /// Launch speed that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self, sprinting: bool) -> f32 {
        let base = (2.0 * self.gravity.abs() * self.jump_height).sqrt();
        if sprinting {
            base * self.sprint_jump_factor
        } else {
            base
        }
    }

    /// Start a jump if the body is grounded and jump is held.
    ///
    /// # Returns
    /// `true` if a jump was started
    pub fn try_jump(&self, body: &mut PlayerBody, input: &MovementKeys, sprinting: bool) -> bool {
        if body.grounded && input.is_jumping() {
            body.start_jump(self.jump_velocity(sprinting));
            true
        } else {
            false
        }
    }

    /// Unit movement direction on the XZ plane for the held keys.
    ///
    /// Camera yaw: angle in radians where 0 = looking toward -Z and positive
    /// yaw turns left. Diagonals are normalized.
    pub fn wish_direction(input: &MovementKeys, camera_yaw: f32) -> Vec3 {
        let heading = Quat::from_rotation_y(camera_yaw);
        let forward = heading * Vec3::NEG_Z;
        let right = heading * Vec3::X;

        let forward_input = input.forward_axis() as f32;
        let right_input = input.right_axis() as f32;

        (forward * forward_input + right * right_input).normalize_or_zero()
    }

    /// Horizontal velocity for this tick.
    ///
    /// # Arguments
    /// * `input` - Movement input state
    /// * `camera_yaw` - Camera yaw angle in radians
    /// * `sprinting` - Whether sprint is in effect
    pub fn horizontal_velocity(
        &self,
        input: &MovementKeys,
        camera_yaw: f32,
        sprinting: bool,
    ) -> Vec3 {
        Self::wish_direction(input, camera_yaw) * self.speed(sprinting)
    }

    /// Advance the body by one substep.
    ///
    /// Horizontal velocity is replaced by `horizontal`. While airborne,
    /// gravity is applied and the vertical displacement uses the average of
    /// the old and new vertical speed. A grounded body keeps zero vertical
    /// speed.
    pub fn integrate(&self, body: &mut PlayerBody, horizontal: Vec3, dt: f32) {
        body.velocity.x = horizontal.x;
        body.velocity.z = horizontal.z;

        let delta_y = if body.grounded {
            body.velocity.y = 0.0;
            0.0
        } else {
            let previous = body.velocity.y;
            body.velocity.y += self.gravity * dt;
            (previous + body.velocity.y) * 0.5 * dt
        };

        body.position += Vec3::new(horizontal.x * dt, delta_y, horizontal.z * dt);
    }
}
