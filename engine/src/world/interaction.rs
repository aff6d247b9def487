//! Interaction State
//!
//! Keycard inventory and door state. The door's collision geometry only
//! participates in collision while the door is closed; opening it requires
//! holding the keycard.

use tracing::info;

/// Result of clicking the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorOutcome {
    Opened,
    Closed,
    /// Door is closed and the player has no keycard
    Locked,
}

/// Result of one click interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    PickedUpKeycard,
    Door(DoorOutcome),
}

/// Mutable gameplay flags shared by the controller and the level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    has_keycard: bool,
    door_open: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has_keycard(&self) -> bool {
        self.has_keycard
    }

    #[inline]
    pub fn is_door_open(&self) -> bool {
        self.door_open
    }

    /// Take the keycard. Returns `false` if it was already held.
    pub fn pick_up_keycard(&mut self) -> bool {
        if self.has_keycard {
            return false;
        }
        self.has_keycard = true;
        info!("picked up keycard");
        true
    }

    /// Toggle the door. Opening needs the keycard; closing never does.
    pub fn use_door(&mut self) -> DoorOutcome {
        if self.door_open {
            self.door_open = false;
            info!("door closed");
            DoorOutcome::Closed
        } else if self.has_keycard {
            self.door_open = true;
            info!("door opened");
            DoorOutcome::Opened
        } else {
            info!("door is locked, keycard required");
            DoorOutcome::Locked
        }
    }
}
