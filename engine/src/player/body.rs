//! Player rigid body state
//!
//! Kinematic state of the player: position of the capsule's bottom sphere
//! centre, velocity, and the grounded/jumping flags.
//!
//! # State Machine
//!
//! ```text
//! Grounded --jump--> Jumping --floor contact--> Grounded
//! Grounded --probe finds no floor--> Falling --floor contact--> Grounded
//! ```
//!
//! `grounded` and `jumping` are never both true, and a grounded body has zero
//! vertical velocity.

use glam::Vec3;

/// Kinematic player body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    /// Centre of the capsule's bottom sphere (world space, meters)
    pub position: Vec3,
    /// World-space velocity in m/s
    pub velocity: Vec3,
    pub grounded: bool,
    pub jumping: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl PlayerBody {
    /// New body at rest. It starts grounded; the first ground probe clears
    /// that if there is nothing underneath.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: true,
            jumping: false,
        }
    }

    /// Leave the ground with upward speed `vertical_speed`.
    pub fn start_jump(&mut self, vertical_speed: f32) {
        self.velocity.y = vertical_speed;
        self.grounded = false;
        self.jumping = true;
    }

    /// Settle on a floor contact.
    pub fn land(&mut self) {
        self.grounded = true;
        self.jumping = false;
        self.velocity.y = 0.0;
    }

    /// Airborne without having jumped (walked off a ledge).
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.grounded && !self.jumping
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Move the body and clear its velocity.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.jumping = false;
    }
}
