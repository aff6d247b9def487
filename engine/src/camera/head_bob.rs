//! Head Bob
//!
//! Vertical camera sway while walking on the ground. The sway is a sine wave
//! in time; each half wave is one footstep. When the player stops, the
//! current step is finished so the camera settles back at rest height
//! instead of freezing mid-sway. Leaving the ground resets the wave.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Angular speed of the sway in radians per second.
pub const DEFAULT_BOB_SPEED: f32 = 10.0;

/// Peak vertical offset in meters.
pub const DEFAULT_BOB_HEIGHT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    pub speed: f32,
    pub height: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_BOB_SPEED,
            height: DEFAULT_BOB_HEIGHT,
        }
    }
}

/// Head-bob phase tracker.
#[derive(Debug, Clone)]
pub struct HeadBob {
    config: HeadBobConfig,
    /// Time along the wave in seconds, kept within one full wave
    phase: f32,
    active: bool,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self::new(HeadBobConfig::default())
    }
}

impl HeadBob {
    pub fn new(config: HeadBobConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            active: false,
        }
    }

    /// Duration of one footstep (half a wave) in seconds.
    #[inline]
    pub fn step_duration(&self) -> f32 {
        PI / self.config.speed
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the wave.
    ///
    /// # Arguments
    /// * `dt` - Tick duration in seconds
    /// * `moving` - Player moved horizontally this tick
    /// * `grounded` - Player stands on a floor
    pub fn update(&mut self, dt: f32, moving: bool, grounded: bool) {
        if !grounded {
            self.phase = 0.0;
            self.active = false;
            return;
        }
        if moving {
            self.active = true;
        }
        if !self.active || dt <= 0.0 {
            return;
        }

        let step = self.step_duration();
        if moving {
            self.phase += dt;
        } else {
            let next_step = ((self.phase / step).floor() + 1.0) * step;
            self.phase = (self.phase + dt).min(next_step);
            if self.phase >= next_step {
                self.active = false;
            }
        }

        let wave = 2.0 * step;
        if self.phase >= wave {
            self.phase -= wave;
        }
    }

    /// Current vertical camera offset in meters.
    #[inline]
    pub fn offset(&self) -> f32 {
        (self.phase * self.config.speed).sin() * self.config.height
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_idle_has_no_offset() {
        let mut bob = HeadBob::default();
        for _ in 0..30 {
            bob.update(DT, false, true);
        }
        assert_eq!(bob.offset(), 0.0);
        assert!(!bob.is_active());
    }

    #[test]
    fn test_walking_sways_within_height() {
        let mut bob = HeadBob::default();
        let mut max_offset: f32 = 0.0;
        for _ in 0..120 {
            bob.update(DT, true, true);
            assert!(bob.offset().abs() <= DEFAULT_BOB_HEIGHT + 1e-6);
            max_offset = max_offset.max(bob.offset().abs());
        }
        assert!(max_offset > DEFAULT_BOB_HEIGHT * 0.9);
    }

    #[test]
    fn test_stopping_finishes_the_step() {
        let mut bob = HeadBob::default();
        // Walk into the middle of a step
        for _ in 0..5 {
            bob.update(DT, true, true);
        }
        assert!(bob.offset().abs() > 0.01);

        // One step is ~0.314 s; a second is plenty to settle
        for _ in 0..60 {
            bob.update(DT, false, true);
        }
        assert!(!bob.is_active());
        assert!(bob.offset().abs() < 1e-4);
    }

    #[test]
    fn test_airborne_resets_phase() {
        let mut bob = HeadBob::default();
        for _ in 0..7 {
            bob.update(DT, true, true);
        }
        bob.update(DT, true, false);
        assert_eq!(bob.offset(), 0.0);
        assert!(!bob.is_active());
    }
}
