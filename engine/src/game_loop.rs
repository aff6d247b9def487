//! Frame Driver
//!
//! Turns wall-clock frame timestamps into clamped tick durations and hands
//! them to anything implementing [`FrameUpdate`]. [`Simulation`] is the
//! standard update target: it commits streamed geometry, ticks the
//! controller and syncs the camera, in that order, once per frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use fps_rig_engine::game_loop::{FrameDriver, Simulation};
//!
//! let mut driver = FrameDriver::new(config.max_dt);
//! let mut sim = Simulation::new(controller, level);
//!
//! // every redraw
//! driver.run_frame(start.elapsed().as_secs_f64(), &mut sim);
//! renderer.draw(sim.camera());
//! ```

use tracing::trace;

use crate::camera::CameraTransform;
use crate::player::{FirstPersonController, TickReport};
use crate::world::Level;

/// Something advanced once per frame.
pub trait FrameUpdate {
    fn update(&mut self, dt: f32);
}

/// Converts frame timestamps into tick durations.
///
/// The first frame ticks with `dt = 0`. Later frames use the time since the
/// previous frame, clamped to `[0, max_dt]` so a stall (debugger, window
/// drag) cannot tunnel the player through geometry.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    last_frame: Option<f64>,
    max_dt: f32,
    frames: u64,
}

impl FrameDriver {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_frame: None,
            max_dt,
            frames: 0,
        }
    }

    /// Number of frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tick `target` for a frame that started at `now_seconds`.
    ///
    /// # Returns
    /// The `dt` passed to `target`
    pub fn run_frame(&mut self, now_seconds: f64, target: &mut impl FrameUpdate) -> f32 {
        let dt = match self.last_frame {
            Some(previous) => ((now_seconds - previous) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_frame = Some(now_seconds);
        self.frames += 1;
        target.update(dt);
        dt
    }

    /// Forget the previous timestamp so the next frame ticks with `dt = 0`.
    pub fn reset_clock(&mut self) {
        self.last_frame = None;
    }
}

/// Controller + level + camera, updated together each frame.
#[derive(Debug)]
pub struct Simulation {
    controller: FirstPersonController,
    level: Level,
    camera: CameraTransform,
    last_report: TickReport,
}

impl Simulation {
    pub fn new(controller: FirstPersonController, level: Level) -> Self {
        let mut camera = CameraTransform::default();
        controller.sync_camera(&mut camera);
        Self {
            controller,
            level,
            camera,
            last_report: TickReport::default(),
        }
    }

    #[inline]
    pub fn controller(&self) -> &FirstPersonController {
        &self.controller
    }

    /// Mutable controller access, e.g. to feed input between frames.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut FirstPersonController {
        &mut self.controller
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    #[inline]
    pub fn camera(&self) -> &CameraTransform {
        &self.camera
    }

    #[inline]
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }
}

impl FrameUpdate for Simulation {
    fn update(&mut self, dt: f32) {
        let committed = self.level.commit_pending();
        if committed > 0 {
            trace!(committed, "committed streamed layers before tick");
        }
        self.last_report = self.controller.tick(dt, &self.level);
        self.controller.sync_camera(&mut self.camera);
    }
}
