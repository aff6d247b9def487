//! Pointer-locked mouse
//!
//! Raw motion is summed into one look delta between ticks; the controller
//! takes it once per tick. Buttons are kept as a small bit set, and a left
//! press edge arms a one-shot click.
//!
//! ```rust,ignore
//! let mut pointer = PointerState::new();
//! pointer.set_locked(true);
//! pointer.add_motion(10.0, -5.0);
//! pointer.add_motion(3.0, 2.0);
//! assert_eq!(pointer.take_delta(), Vec2::new(13.0, -3.0));
//! ```

use glam::Vec2;
use tracing::warn;

/// Window-system independent mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Extra buttons by platform index (back, forward, ...)
    Other(u16),
}

impl MouseButton {
    /// Bit for this button. Extra buttons beyond the 16-bit set are untracked.
    fn bit(self) -> Option<u16> {
        let index = match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Other(n) => 3u16.checked_add(n).filter(|i| *i < 16)?,
        };
        Some(1 << index)
    }
}

/// Accumulated look motion, held buttons and the pending click.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    delta: Vec2,
    locked: bool,
    held: u16,
    click_pending: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw motion in device units.
    ///
    /// Dropped while unlocked. A sample with any non-finite component is
    /// dropped whole.
    #[inline]
    pub fn add_motion(&mut self, dx: f32, dy: f32) {
        if !self.locked {
            return;
        }
        let sample = Vec2::new(dx, dy);
        if !sample.is_finite() {
            warn!(dx, dy, "dropping non-finite mouse delta");
            return;
        }
        self.delta += sample;
    }

    /// Take the motion summed since the last call. Zero before any motion.
    #[inline]
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    #[inline]
    pub fn pending_delta(&self) -> Vec2 {
        self.delta
    }

    /// Mirror the platform pointer lock. Unlocking discards pending motion
    /// so re-locking does not snap the view.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.delta = Vec2::ZERO;
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Record a button edge. Only a left press that was not already held
    /// arms the click.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        let Some(bit) = button.bit() else {
            return;
        };
        let was_held = self.held & bit != 0;
        if pressed {
            self.held |= bit;
            if button == MouseButton::Left && !was_held {
                self.click_pending = true;
            }
        } else {
            self.held &= !bit;
        }
    }

    #[inline]
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        button.bit().is_some_and(|bit| self.held & bit != 0)
    }

    #[inline]
    pub fn any_button_held(&self) -> bool {
        self.held != 0
    }

    /// Return and clear the pending click.
    #[inline]
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.click_pending)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
