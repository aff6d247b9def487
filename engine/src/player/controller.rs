//! First-Person Controller
//!
//! Ties input, look, movement, collision, head bob and interaction together.
//! One call to [`FirstPersonController::tick`] advances the player by one
//! frame:
//!
//! 1. Consume the mouse delta and update the look orientation
//! 2. Handle a pending click (keycard pickup or door)
//! 3. Decide sprint and update the sprint charge
//! 4. Start a jump if grounded and jump is held
//! 5. Run `substeps` rounds of integrate + resolve against the level
//! 6. Advance the head bob if the player actually moved
//!
//! The camera is never driven from inside `tick`; call
//! [`FirstPersonController::sync_camera`] after ticking.

use glam::Vec3;
use tracing::{debug, info, trace, warn};

use super::body::PlayerBody;
use super::movement_controller::PlayerMovementController;
use super::sprint_charge::SprintCharge;
use crate::camera::{FpsOrientation, HeadBob, RenderCamera, Viewport};
use crate::config::ControllerConfig;
use crate::input::InputState;
use crate::physics::{CollisionResolver, Contact, ContactKind};
use crate::world::{InteractionOutcome, InteractionState, Level};

/// Cosine of the widest angle between the view direction and the keycard at
/// which a click still picks it up.
const KEYCARD_VIEW_COS: f32 = 0.9;

/// Horizontal travel per tick below which the player counts as standing
/// still for head bob.
const BOB_MIN_TRAVEL: f32 = 1e-4;

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Duration actually simulated after clamping
    pub dt: f32,
    /// Last contact found during the substeps
    pub contact: Option<Contact>,
    pub contact_kind: Option<ContactKind>,
    pub jumped: bool,
    pub landed: bool,
    pub interaction: Option<InteractionOutcome>,
}

/// First-person player controller.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    config: ControllerConfig,
    input: InputState,
    orientation: FpsOrientation,
    body: PlayerBody,
    movement: PlayerMovementController,
    resolver: CollisionResolver,
    head_bob: HeadBob,
    charge: SprintCharge,
    interaction: InteractionState,
    viewport: Viewport,
    sprinting: bool,
}

impl FirstPersonController {
    /// Create a controller with its capsule base at `spawn`.
    ///
    /// `config` is assumed valid; see [`ControllerConfig::validate`].
    pub fn new(config: ControllerConfig, spawn: Vec3) -> Self {
        Self {
            orientation: FpsOrientation::from_config(&config.look),
            body: PlayerBody::new(spawn),
            movement: PlayerMovementController::from_config(&config),
            resolver: CollisionResolver::new(config.collision),
            head_bob: HeadBob::new(config.head_bob),
            charge: SprintCharge::new(&config.charge),
            interaction: InteractionState::new(),
            input: InputState::new(),
            viewport: Viewport::default(),
            sprinting: false,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input sink for window events between ticks.
    #[inline]
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    #[inline]
    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    /// Direct access to the body, e.g. for respawning.
    #[inline]
    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    #[inline]
    pub fn orientation(&self) -> &FpsOrientation {
        &self.orientation
    }

    #[inline]
    pub fn orientation_mut(&mut self) -> &mut FpsOrientation {
        &mut self.orientation
    }

    #[inline]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[inline]
    pub fn sprint_charge(&self) -> f32 {
        self.charge.charge()
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    #[inline]
    pub fn head_bob_offset(&self) -> f32 {
        if self.config.head_bob_enabled {
            self.head_bob.offset()
        } else {
            0.0
        }
    }

    /// Window size used to normalize mouse deltas.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Eye position without head bob: the top sphere centre.
    pub fn eye_position(&self) -> Vec3 {
        self.body.position + Vec3::Y * self.config.capsule.segment
    }

    /// Advance the player by `dt` seconds against `level`.
    ///
    /// `dt` is clamped to `[0, max_dt]`. A non-finite `dt` skips the tick.
    pub fn tick(&mut self, dt: f32, level: &Level) -> TickReport {
        if !dt.is_finite() {
            warn!(dt, "skipping tick with non-finite dt");
            return TickReport::default();
        }
        let dt = dt.clamp(0.0, self.config.max_dt);
        let mut report = TickReport {
            dt,
            ..Default::default()
        };

        let look = self.input.consume_mouse_delta();
        self.orientation.apply_mouse_delta(look.x, look.y, self.viewport);

        if self.input.take_click() {
            report.interaction = self.interact(level);
        }

        if dt <= 0.0 {
            return report;
        }

        let keys = *self.input.movement();
        let wants_sprint = keys.is_sprinting() && !self.body.jumping;
        self.sprinting = wants_sprint && (!self.config.charge.enabled || self.charge.can_sprint());
        if self.config.charge.enabled {
            self.charge.update(dt, self.sprinting);
        }

        if self.movement.try_jump(&mut self.body, &keys, self.sprinting) {
            report.jumped = true;
            info!(
                vertical_speed = self.body.velocity.y,
                sprinting = self.sprinting,
                "jump"
            );
        }

        let horizontal =
            self.movement
                .horizontal_velocity(&keys, self.orientation.yaw(), self.sprinting);
        let indices = level.active_indices(&self.interaction);
        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f32;
        let start = self.body.position;

        for _ in 0..substeps {
            self.movement.integrate(&mut self.body, horizontal, sub_dt);
            let resolution = self
                .resolver
                .resolve(&mut self.body, &self.config.capsule, &indices, sub_dt);
            if resolution.contact.is_some() {
                report.contact = resolution.contact;
                report.contact_kind = resolution.kind;
            }
            if resolution.landed {
                report.landed = true;
                info!(position = ?self.body.position, "landed");
            }
            if resolution.left_ground {
                debug!(position = ?self.body.position, "left the ground");
            }
        }

        let travel = self.body.position - start;
        let moved = Vec3::new(travel.x, 0.0, travel.z).length() > BOB_MIN_TRAVEL;
        self.head_bob.update(dt, moved, self.body.grounded);

        trace!(
            position = ?self.body.position,
            velocity = ?self.body.velocity,
            grounded = self.body.grounded,
            yaw = self.orientation.yaw(),
            pitch = self.orientation.pitch(),
            "tick"
        );
        report
    }

    /// Resolve a click: pick up the keycard when it is in reach and roughly
    /// in view, otherwise toggle the door if the view ray hits it.
    pub fn interact(&mut self, level: &Level) -> Option<InteractionOutcome> {
        let eye = self.eye_position();
        let look = self.orientation.forward();
        let reach = self.config.reach;

        if !self.interaction.has_keycard() {
            if let Some(card) = level.keycard() {
                let to_card = card - eye;
                let distance = to_card.length();
                let in_view = distance < 1e-3 || to_card.dot(look) / distance >= KEYCARD_VIEW_COS;
                if distance <= reach && in_view {
                    self.interaction.pick_up_keycard();
                    return Some(InteractionOutcome::PickedUpKeycard);
                }
            }
        }

        let Some(door) = level.door() else {
            debug!("click ignored, level has no door");
            return None;
        };
        match door.raycast(eye, look, reach) {
            Some(hit) => {
                debug!(distance = hit.distance, "clicked door");
                Some(InteractionOutcome::Door(self.interaction.use_door()))
            }
            None => {
                debug!("click hit nothing interactive");
                None
            }
        }
    }

    /// Copy the eye pose (with head bob) to a render camera.
    pub fn sync_camera(&self, camera: &mut impl RenderCamera) {
        let eye = self.eye_position() + Vec3::Y * self.head_bob_offset();
        camera.set_position(eye);
        camera.set_rotation(self.orientation.rotation());
    }
}
