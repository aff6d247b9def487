//! Keyboard sampling
//!
//! Keys are first mapped to a [`MoveAction`], so WASD and the arrow keys
//! share one binding table, and both shift keys sprint. [`KeyboardState`]
//! additionally remembers every held key for non-movement queries.

use std::collections::HashSet;

/// Window-system independent key codes. Only keys the rig reacts to are
/// named; everything else arrives as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    E,
    Space,
    ShiftLeft,
    ShiftRight,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Unknown,
}

/// What a movement key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Jump,
    Sprint,
}

impl KeyCode {
    /// Movement binding for this key, if any.
    pub fn move_action(self) -> Option<MoveAction> {
        let action = match self {
            KeyCode::W | KeyCode::ArrowUp => MoveAction::Forward,
            KeyCode::S | KeyCode::ArrowDown => MoveAction::Backward,
            KeyCode::A | KeyCode::ArrowLeft => MoveAction::StrafeLeft,
            KeyCode::D | KeyCode::ArrowRight => MoveAction::StrafeRight,
            KeyCode::Space => MoveAction::Jump,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => MoveAction::Sprint,
            _ => return None,
        };
        Some(action)
    }
}

/// Held movement intents, read by the controller once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Acted on only while grounded; holding it re-jumps on landing
    pub jump: bool,
    pub sprint: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key edge.
    ///
    /// # Returns
    /// `true` if `key` is bound to a movement action
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let Some(action) = key.move_action() else {
            return false;
        };
        *self.flag_mut(action) = pressed;
        true
    }

    fn flag_mut(&mut self, action: MoveAction) -> &mut bool {
        match action {
            MoveAction::Forward => &mut self.forward,
            MoveAction::Backward => &mut self.backward,
            MoveAction::StrafeLeft => &mut self.left,
            MoveAction::StrafeRight => &mut self.right,
            MoveAction::Jump => &mut self.jump,
            MoveAction::Sprint => &mut self.sprint,
        }
    }

    /// Any of forward/backward/left/right held (even if they cancel).
    #[inline]
    pub fn any_horizontal(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprint
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// +1 forward, -1 backward, 0 for neither or both.
    #[inline]
    pub fn forward_axis(&self) -> i32 {
        i32::from(self.forward) - i32::from(self.backward)
    }

    /// +1 right, -1 left, 0 for neither or both.
    #[inline]
    pub fn right_axis(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }
}

/// Movement intents plus the raw set of held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub movement: MovementKeys,
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key edge. `Unknown` keys are never tracked as held.
    ///
    /// # Returns
    /// `true` if `key` is bound to a movement action
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match (key, pressed) {
            (KeyCode::Unknown, _) => {}
            (_, true) => {
                self.held.insert(key);
            }
            (_, false) => {
                self.held.remove(&key);
            }
        }
        self.movement.handle_key(key, pressed)
    }

    #[inline]
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn reset(&mut self) {
        self.movement.reset();
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_keys_give_zero_axes() {
        let keys = MovementKeys::new();
        assert!(!keys.any_horizontal());
        assert_eq!((keys.forward_axis(), keys.right_axis()), (0, 0));
    }

    #[test]
    fn test_bindings() {
        assert_eq!(KeyCode::W.move_action(), Some(MoveAction::Forward));
        assert_eq!(KeyCode::ArrowDown.move_action(), Some(MoveAction::Backward));
        assert_eq!(KeyCode::ShiftRight.move_action(), Some(MoveAction::Sprint));
        assert_eq!(KeyCode::E.move_action(), None);
        assert_eq!(KeyCode::Unknown.move_action(), None);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        assert_eq!(keys.forward_axis(), 1);
        keys.handle_key(KeyCode::S, true);
        assert_eq!(keys.forward_axis(), 0);
        assert!(keys.any_horizontal());

        keys.handle_key(KeyCode::D, true);
        keys.handle_key(KeyCode::A, true);
        assert_eq!(keys.right_axis(), 0);
        keys.handle_key(KeyCode::D, false);
        assert_eq!(keys.right_axis(), -1);
    }

    #[test]
    fn test_arrows_share_wasd_flags() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::ArrowUp, true);
        keys.handle_key(KeyCode::ArrowLeft, true);
        assert_eq!((keys.forward_axis(), keys.right_axis()), (1, -1));

        // Releasing the letter key releases the shared flag
        keys.handle_key(KeyCode::W, false);
        assert_eq!(keys.forward_axis(), 0);
    }

    #[test]
    fn test_jump_and_sprint_are_not_horizontal() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::ShiftLeft, true);
        keys.handle_key(KeyCode::Space, true);
        assert!(keys.is_sprinting());
        assert!(keys.is_jumping());
        assert!(!keys.any_horizontal());
    }

    #[test]
    fn test_unbound_key_is_reported() {
        let mut keys = MovementKeys::new();
        assert!(!keys.handle_key(KeyCode::Escape, true));
        assert_eq!(keys, MovementKeys::default());
    }

    #[test]
    fn test_held_set_tracks_any_key() {
        let mut keyboard = KeyboardState::new();
        assert!(!keyboard.handle_key(KeyCode::E, true));
        assert!(keyboard.is_key_held(KeyCode::E));
        keyboard.handle_key(KeyCode::E, false);
        assert!(!keyboard.is_key_held(KeyCode::E));

        keyboard.handle_key(KeyCode::Unknown, true);
        assert!(!keyboard.is_key_held(KeyCode::Unknown));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::W, true);
        keyboard.handle_key(KeyCode::Escape, true);

        keyboard.reset();
        assert!(!keyboard.is_key_held(KeyCode::W));
        assert!(!keyboard.is_key_held(KeyCode::Escape));
        assert!(!keyboard.movement.forward);
    }
}
