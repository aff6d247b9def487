//! Controller Configuration
//!
//! Every tunable of the first-person controller in one serde-friendly
//! struct. `Default` returns the stock tuning; a JSON file only needs to
//! name the fields it changes.
//!
//! ```json
//! {
//!   "gravity": -30.0,
//!   "substeps": 8,
//!   "look": { "pitch_limit_degrees": 75.0 },
//!   "head_bob": { "height": 0.05 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use tracing::debug;

use crate::camera::{HeadBobConfig, LookConfig};
use crate::physics::{CapsuleShape, CollisionConfig};
use crate::player::movement_controller::{
    GRAVITY, JUMP_HEIGHT, MOVE_SPEED, SPRINT_JUMP_FACTOR, SPRINT_MULTIPLIER,
};
use crate::player::sprint_charge::ChargeConfig;

/// Collision substeps per tick.
pub const DEFAULT_SUBSTEPS: u32 = 5;

/// Longest tick the simulation will integrate, in seconds.
pub const DEFAULT_MAX_DT: f32 = 0.1;

/// How far the player can reach for clicks, in meters.
pub const DEFAULT_REACH: f32 = 3.0;

const_assert!(DEFAULT_SUBSTEPS >= 1);

/// Errors from loading or validating a [`ControllerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tuning for the first-person controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Signed gravity in m/s² (negative = down)
    pub gravity: f32,
    /// Jump apex height in meters
    pub jump_height: f32,
    /// Ground speed in m/s
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Launch speed factor for jumps started while sprinting
    pub sprint_jump_factor: f32,
    /// Collision substeps per tick (>= 1)
    pub substeps: u32,
    /// Upper clamp for a tick's duration, in seconds
    pub max_dt: f32,
    /// Click interaction distance in meters
    pub reach: f32,
    pub head_bob_enabled: bool,
    pub capsule: CapsuleShape,
    pub look: LookConfig,
    pub head_bob: HeadBobConfig,
    pub charge: ChargeConfig,
    pub collision: CollisionConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_height: JUMP_HEIGHT,
            move_speed: MOVE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            sprint_jump_factor: SPRINT_JUMP_FACTOR,
            substeps: DEFAULT_SUBSTEPS,
            max_dt: DEFAULT_MAX_DT,
            reach: DEFAULT_REACH,
            head_bob_enabled: true,
            capsule: CapsuleShape::default(),
            look: LookConfig::default(),
            head_bob: HeadBobConfig::default(),
            charge: ChargeConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "loaded controller config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }
        fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(invalid(field, format!("{value} is not finite")))
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            finite(field, value)?;
            if value < 0.0 {
                return Err(invalid(field, format!("{value} must be >= 0")));
            }
            Ok(())
        }
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            finite(field, value)?;
            if value <= 0.0 {
                return Err(invalid(field, format!("{value} must be > 0")));
            }
            Ok(())
        }

        finite("gravity", self.gravity)?;
        if self.gravity > 0.0 {
            return Err(invalid("gravity", "must point down (<= 0)"));
        }
        non_negative("jump_height", self.jump_height)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("sprint_multiplier", self.sprint_multiplier)?;
        non_negative("sprint_jump_factor", self.sprint_jump_factor)?;
        if self.substeps == 0 {
            return Err(invalid("substeps", "at least one substep is required"));
        }
        positive("max_dt", self.max_dt)?;
        non_negative("reach", self.reach)?;

        positive("capsule.radius", self.capsule.radius)?;
        non_negative("capsule.segment", self.capsule.segment)?;

        finite("look.yaw_speed", self.look.yaw_speed)?;
        finite("look.pitch_speed", self.look.pitch_speed)?;
        finite("look.pitch_limit_degrees", self.look.pitch_limit_degrees)?;
        if !(0.0..=90.0).contains(&self.look.pitch_limit_degrees) {
            return Err(invalid("look.pitch_limit_degrees", "must be within [0, 90]"));
        }

        positive("head_bob.speed", self.head_bob.speed)?;
        non_negative("head_bob.height", self.head_bob.height)?;
        non_negative("charge.drain_rate", self.charge.drain_rate)?;
        non_negative("charge.recharge_rate", self.charge.recharge_rate)?;

        finite("collision.floor_threshold", self.collision.floor_threshold)?;
        if !(0.0..1.0).contains(&self.collision.floor_threshold) {
            return Err(invalid("collision.floor_threshold", "must be within [0, 1)"));
        }
        non_negative("collision.skin", self.collision.skin)?;

        Ok(())
    }
}
