//! World Module
//!
//! Level geometry the player collides with, the keycard and door
//! interaction state, and the built-in demo level.

pub mod demo_level;
pub mod interaction;
pub mod level;

pub use demo_level::build_demo_level;
pub use interaction::{DoorOutcome, InteractionOutcome, InteractionState};
pub use level::{GeometryLayer, GeometrySender, Level, LevelError};
