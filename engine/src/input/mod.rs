//! Input Module
//!
//! Platform-agnostic input sampling for the first-person controller.
//! Raw events (key edges, mouse motion, button edges) mutate an
//! [`InputState`] between ticks; the controller reads held keys and takes
//! the summed mouse delta and pending click once per tick. Missing events
//! mean "no change"; nothing here can fail.
//!
//! # Example
//!
//! ```rust,ignore
//! use fps_rig_engine::input::{InputState, KeyCode, MouseButton};
//!
//! let mut input = InputState::new();
//! input.set_pointer_locked(true);
//!
//! input.handle_key(KeyCode::W, true);
//! input.accumulate_mouse_motion(12.0, -3.0);
//! input.set_button(MouseButton::Left, true);
//!
//! // once per tick
//! let look = input.consume_mouse_delta();
//! let clicked = input.take_click();
//! ```

pub mod handler;
pub mod keyboard;
pub mod pointer;

pub use keyboard::{KeyCode, KeyboardState, MoveAction, MovementKeys};
pub use pointer::{MouseButton, PointerState};

use glam::Vec2;

/// Keyboard and pointer state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub pointer: PointerState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.keyboard.handle_key(key, pressed);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keyboard.is_key_held(key)
    }

    pub fn movement(&self) -> &MovementKeys {
        &self.keyboard.movement
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.pointer.set_button(button, pressed);
    }

    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.pointer.is_button_held(button)
    }

    /// Add raw mouse motion; ignored unless the pointer is locked.
    pub fn accumulate_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.pointer.add_motion(dx, dy);
    }

    /// Take the mouse motion summed since the last tick.
    pub fn consume_mouse_delta(&mut self) -> Vec2 {
        self.pointer.take_delta()
    }

    pub fn take_click(&mut self) -> bool {
        self.pointer.take_click()
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer.set_locked(locked);
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer.is_locked()
    }

    /// Release every key and button and drop the pointer lock.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.pointer.reset();
    }
}
