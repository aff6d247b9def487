//! Sprint charge meter
//!
//! A stamina value in `[0, 1]` that drains while sprinting and refills
//! otherwise. Sprinting is only allowed while some charge remains.

use serde::{Deserialize, Serialize};

/// Charge lost per second of sprinting.
pub const DEFAULT_DRAIN_RATE: f32 = 0.1;

/// Charge regained per second when not sprinting.
pub const DEFAULT_RECHARGE_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    pub enabled: bool,
    pub drain_rate: f32,
    pub recharge_rate: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drain_rate: DEFAULT_DRAIN_RATE,
            recharge_rate: DEFAULT_RECHARGE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintCharge {
    charge: f32,
    drain_rate: f32,
    recharge_rate: f32,
}

impl Default for SprintCharge {
    fn default() -> Self {
        Self::new(&ChargeConfig::default())
    }
}

impl SprintCharge {
    /// Full meter.
    pub fn new(config: &ChargeConfig) -> Self {
        Self {
            charge: 1.0,
            drain_rate: config.drain_rate,
            recharge_rate: config.recharge_rate,
        }
    }

    #[inline]
    pub fn charge(&self) -> f32 {
        self.charge
    }

    #[inline]
    pub fn can_sprint(&self) -> bool {
        self.charge > 0.0
    }

    pub fn update(&mut self, dt: f32, sprinting: bool) {
        let rate = if sprinting {
            -self.drain_rate
        } else {
            self.recharge_rate
        };
        self.charge = (self.charge + rate * dt).clamp(0.0, 1.0);
    }

    pub fn refill(&mut self) {
        self.charge = 1.0;
    }
}
