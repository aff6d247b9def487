//! Player Module
//!
//! Provides the first-person player: body state, movement integration,
//! sprint stamina and the controller that ties them to collision.
//!
//! # Components
//!
//! - [`FirstPersonController`] - Per-tick driver: look, jump, substepped
//!   movement and collision, head bob, click interaction, camera sync
//! - [`PlayerMovementController`] - Camera-relative movement and midpoint
//!   gravity integration
//! - [`PlayerBody`] - Position, velocity and grounded/jumping flags
//! - [`SprintCharge`] - Stamina meter gating sprint

pub mod body;
pub mod controller;
pub mod movement_controller;
pub mod sprint_charge;

pub use body::PlayerBody;
pub use controller::{FirstPersonController, TickReport};
pub use movement_controller::{
    PlayerMovementController,
    GRAVITY, JUMP_HEIGHT, MOVE_SPEED, SPRINT_JUMP_FACTOR, SPRINT_MULTIPLIER,
};
pub use sprint_charge::{ChargeConfig, SprintCharge};
