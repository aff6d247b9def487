//! Walkthrough - headless scripted run of the demo level
//!
//! Drives the first-person controller through the demo level with a fixed
//! 60 Hz clock and logs what happens:
//! 1. settle on the floor and jump once
//! 2. walk to the door and find it locked
//! 3. fetch the keycard
//! 4. return, open the door and step through
//!
//! Run with: `cargo run --bin walkthrough [config.json]`
//! Set `RUST_LOG=fps_rig_engine=debug` for per-event detail.

use anyhow::{Context, Result, bail, ensure};
use glam::Vec3;
use tracing::info;

use fps_rig_engine::config::ControllerConfig;
use fps_rig_engine::game_loop::{FrameDriver, Simulation};
use fps_rig_engine::input::{KeyCode, MouseButton};
use fps_rig_engine::physics::Octree;
use fps_rig_engine::world::demo_level::{self, DIVIDER_Z, KEYCARD_POSITION, SPAWN_POINT};
use fps_rig_engine::world::{DoorOutcome, InteractionOutcome};
use fps_rig_engine::{FirstPersonController, init_logging};

const FRAME: f64 = 1.0 / 60.0;

/// Fixed-rate clock feeding the frame driver.
struct Script {
    sim: Simulation,
    driver: FrameDriver,
    now: f64,
}

impl Script {
    fn frame(&mut self) {
        self.driver.run_frame(self.now, &mut self.sim);
        self.now += FRAME;
    }

    fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    fn player(&mut self) -> &mut FirstPersonController {
        self.sim.controller_mut()
    }

    /// Hold W while steering toward `target` on the XZ plane.
    fn walk_to(&mut self, target: Vec3, tolerance: f32) -> Result<()> {
        self.player().input_mut().handle_key(KeyCode::W, true);
        for _ in 0..1200 {
            let eye = self.sim.controller().eye_position();
            let flat = Vec3::new(target.x - eye.x, 0.0, target.z - eye.z);
            if flat.length() <= tolerance {
                self.player().input_mut().handle_key(KeyCode::W, false);
                self.frames(5);
                return Ok(());
            }
            self.player()
                .orientation_mut()
                .look_at(eye, Vec3::new(target.x, eye.y, target.z));
            self.frame();
        }
        self.player().input_mut().handle_key(KeyCode::W, false);
        bail!(
            "did not reach {target} (stuck at {})",
            self.sim.controller().body().position
        )
    }

    /// Look at `target` and click once.
    fn click_at(&mut self, target: Vec3) -> Option<InteractionOutcome> {
        let eye = self.sim.controller().eye_position();
        self.player().orientation_mut().look_at(eye, target);
        self.player().input_mut().set_button(MouseButton::Left, true);
        self.frame();
        let outcome = self.sim.last_report().interaction;
        self.player().input_mut().set_button(MouseButton::Left, false);
        outcome
    }

    fn jump(&mut self) -> Result<()> {
        self.player().input_mut().handle_key(KeyCode::Space, true);
        self.frame();
        ensure!(self.sim.last_report().jumped, "jump did not start");
        self.player().input_mut().handle_key(KeyCode::Space, false);

        let mut apex = self.sim.controller().body().position.y;
        for _ in 0..240 {
            self.frame();
            apex = apex.max(self.sim.controller().body().position.y);
            if self.sim.last_report().landed {
                info!(apex, "jump finished");
                return Ok(());
            }
        }
        bail!("never landed after jumping")
    }
}

fn main() -> Result<()> {
    init_logging("info");

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(&path)
            .with_context(|| format!("loading controller config from {path}"))?,
        None => ControllerConfig::default(),
    };
    let max_dt = config.max_dt;

    let level = demo_level::build_demo_level();
    info!(triangles = level.triangle_count(), "demo level built");

    // Terrain behind the door arrives from a loader thread
    let sender = level.geometry_sender();
    let loader = std::thread::spawn(move || {
        sender.send("terrain", Octree::from_mesh(&demo_level::terrain_patch()))
    });

    let mut controller = FirstPersonController::new(config, SPAWN_POINT);
    controller.input_mut().set_pointer_locked(true);
    // A small glance to the left before anything scripted
    controller.input_mut().accumulate_mouse_motion(-120.0, 0.0);

    let mut script = Script {
        sim: Simulation::new(controller, level),
        driver: FrameDriver::new(max_dt),
        now: 0.0,
    };

    loader
        .join()
        .map_err(|_| anyhow::anyhow!("terrain loader thread panicked"))?
        .context("streaming terrain patch")?;

    script.frames(60);
    ensure!(
        script.sim.controller().body().grounded,
        "player did not settle after spawning"
    );
    info!(
        position = %script.sim.controller().body().position,
        layers = script.sim.level().layers().len(),
        "settled"
    );

    script.jump()?;

    let door_center = Vec3::new(0.0, 2.0, DIVIDER_Z);
    let door_approach = Vec3::new(0.0, 0.0, DIVIDER_Z + 2.0);

    script.walk_to(door_approach, 0.3)?;
    let outcome = script.click_at(door_center);
    info!(?outcome, "tried the door without the keycard");
    ensure!(
        outcome == Some(InteractionOutcome::Door(DoorOutcome::Locked)),
        "expected a locked door, got {outcome:?}"
    );

    script.walk_to(KEYCARD_POSITION, 1.5)?;
    let outcome = script.click_at(KEYCARD_POSITION);
    info!(?outcome, "reached for the keycard");
    ensure!(
        script.sim.controller().interaction().has_keycard(),
        "keycard was not picked up"
    );

    script.walk_to(door_approach, 0.3)?;
    let outcome = script.click_at(door_center);
    info!(?outcome, "used the keycard on the door");
    ensure!(
        script.sim.controller().interaction().is_door_open(),
        "door did not open"
    );

    script.walk_to(Vec3::new(0.0, 0.0, DIVIDER_Z - 2.0), 0.3)?;
    let camera = script.sim.camera();
    info!(
        position = %script.sim.controller().body().position,
        eye = %camera.position,
        forward = %camera.forward(),
        frames = script.driver.frames(),
        "walked through the doorway"
    );

    Ok(())
}
