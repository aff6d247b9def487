//! Controller Tests - Movement, Gravity, Jumping and Look
//!
//! Drives `FirstPersonController` through whole ticks against simple levels.

use fps_rig_engine::camera::CameraTransform;
use fps_rig_engine::config::ControllerConfig;
use fps_rig_engine::input::KeyCode;
use fps_rig_engine::physics::{Aabb, BruteForceIndex, Octree, TriangleMesh};
use fps_rig_engine::player::FirstPersonController;
use fps_rig_engine::world::Level;
use glam::{Vec2, Vec3};

const DT: f32 = 1.0 / 60.0;

fn flat_level() -> Level {
    let mut mesh = TriangleMesh::new();
    mesh.add_floor(Vec3::ZERO, Vec2::splat(60.0));
    let mut level = Level::new();
    level.add_layer("floor", Octree::from_mesh(&mesh));
    level
}

fn rest_height(config: &ControllerConfig) -> f32 {
    config.capsule.radius + config.collision.skin
}

fn spawn_at_rest(config: ControllerConfig) -> FirstPersonController {
    let rest = rest_height(&config);
    let mut player = FirstPersonController::new(config, Vec3::new(0.0, rest, 0.0));
    player.input_mut().set_pointer_locked(true);
    player
}

fn run(player: &mut FirstPersonController, level: &Level, ticks: usize) {
    for _ in 0..ticks {
        player.tick(DT, level);
        let body = player.body();
        assert!(
            !body.grounded || body.velocity.y == 0.0,
            "grounded body with vertical speed {}",
            body.velocity.y
        );
    }
}

// ============================================================================
// Gravity and Ground Tests
// ============================================================================

#[test]
fn test_fall_and_settle_on_floor() {
    let level = flat_level();
    let config = ControllerConfig::default();
    let rest = rest_height(&config);
    let mut player = FirstPersonController::new(config, Vec3::new(0.0, 2.0, 0.0));

    player.tick(DT, &level);
    assert!(!player.body().grounded, "nothing below the spawn point");

    // A 1.64 m drop under -64 m/s² takes about 14 ticks
    run(&mut player, &level, 20);

    let body = player.body();
    assert!(body.grounded);
    assert!(!body.jumping);
    assert_eq!(body.velocity.y, 0.0);
    assert!((body.position.y - rest).abs() < 0.02, "rest height {}", body.position.y);
}

#[test]
fn test_resting_is_stable() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    let start = player.body().position;

    run(&mut player, &level, 300);

    assert!(player.body().grounded);
    assert!((player.body().position - start).length() < 1e-4);
}

#[test]
fn test_walk_off_ledge_starts_falling() {
    let mut mesh = TriangleMesh::new();
    mesh.add_box_bounds(&Aabb::new(Vec3::new(-2.0, -1.0, -2.0), Vec3::new(2.0, 0.0, 2.0)));
    let mut level = Level::new();
    level.add_layer("ledge", BruteForceIndex::from_mesh(&mesh));

    let mut player = spawn_at_rest(ControllerConfig::default());
    player.input_mut().handle_key(KeyCode::W, true);
    run(&mut player, &level, 30);

    let body = player.body();
    assert!(!body.grounded);
    assert!(body.is_falling());
    assert!(body.position.y < 0.0);
}

/// Plane rising 0.3 m per meter toward +Z, so walking forward goes downhill.
fn ramp_level() -> Level {
    let mut mesh = TriangleMesh::new();
    mesh.add_heightfield(Vec3::ZERO, 80.0, 40, |_, z| 0.3 * z + 20.0);
    let mut level = Level::new();
    level.add_layer("ramp", Octree::from_mesh(&mesh));
    level
}

/// Settle on the ramp, then hold W (and shift if `sprint`) for `ticks`
/// ticks. The player must stay grounded throughout and still be able to
/// jump at the end.
fn walk_down_ramp(sprint: bool, ticks: usize) {
    let level = ramp_level();
    let mut player = FirstPersonController::new(
        ControllerConfig::default(),
        Vec3::new(0.0, 21.0, 0.0),
    );
    run(&mut player, &level, 60);
    assert!(player.body().grounded, "did not settle on the ramp");
    let start_y = player.body().position.y;

    player.input_mut().handle_key(KeyCode::W, true);
    if sprint {
        player.input_mut().handle_key(KeyCode::ShiftLeft, true);
    }
    for tick in 0..ticks {
        player.tick(DT, &level);
        let body = player.body();
        assert!(body.grounded, "airborne on tick {tick} at {}", body.position);
        assert_eq!(body.velocity.y, 0.0);
    }
    assert!(player.body().position.y < start_y - 1.0);

    player.input_mut().handle_key(KeyCode::Space, true);
    let report = player.tick(DT, &level);
    assert!(report.jumped);
    assert!(player.body().velocity.y > 0.0);
}

#[test]
fn test_walking_downhill_stays_grounded() {
    walk_down_ramp(false, 30);
}

#[test]
fn test_sprinting_downhill_stays_grounded() {
    walk_down_ramp(true, 40);
}

// ============================================================================
// Jump Tests
// ============================================================================

#[test]
fn test_jump_reaches_configured_height() {
    let level = flat_level();
    let config = ControllerConfig::default();
    let rest = rest_height(&config);
    let jump_height = config.jump_height;
    let mut player = spawn_at_rest(config);

    player.input_mut().handle_key(KeyCode::Space, true);
    let report = player.tick(DT, &level);
    assert!(report.jumped);
    assert!(player.body().jumping);
    player.input_mut().handle_key(KeyCode::Space, false);

    let mut apex = player.body().position.y;
    let mut landed = false;
    for _ in 0..120 {
        let report = player.tick(DT, &level);
        apex = apex.max(player.body().position.y);
        if report.landed {
            landed = true;
            break;
        }
    }

    assert!(landed);
    assert!(((apex - rest) - jump_height).abs() < 0.02, "apex {}", apex - rest);
    assert!(!player.body().jumping);
    assert!((player.body().position.y - rest).abs() < 0.02);
}

#[test]
fn test_no_double_jump() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());

    player.input_mut().handle_key(KeyCode::Space, true);
    assert!(player.tick(DT, &level).jumped);
    for _ in 0..5 {
        assert!(!player.tick(DT, &level).jumped);
    }
}

#[test]
fn test_sprint_jump_goes_higher() {
    let level = flat_level();
    let config = ControllerConfig::default();
    let rest = rest_height(&config);

    let apex_for = |sprint: bool| {
        let mut player = spawn_at_rest(config.clone());
        if sprint {
            player.input_mut().handle_key(KeyCode::ShiftLeft, true);
        }
        player.input_mut().handle_key(KeyCode::Space, true);
        player.tick(DT, &level);
        player.input_mut().handle_key(KeyCode::Space, false);
        let mut apex = 0.0_f32;
        for _ in 0..60 {
            player.tick(DT, &level);
            apex = apex.max(player.body().position.y - rest);
        }
        apex
    };

    let walk = apex_for(false);
    let sprint = apex_for(true);
    // Launch speed scales by 1.7, apex by 1.7²
    assert!((sprint / walk - 1.7 * 1.7).abs() < 0.1);
}

// ============================================================================
// Horizontal Movement Tests
// ============================================================================

#[test]
fn test_walk_speed_and_direction() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    player.input_mut().handle_key(KeyCode::W, true);

    run(&mut player, &level, 30);

    let body = player.body();
    // Yaw 0 looks down -Z
    assert!((body.position.z + 12.0 * 0.5).abs() < 1e-3);
    assert!(body.position.x.abs() < 1e-4);
    assert!((body.horizontal_speed() - 12.0).abs() < 1e-4);
}

#[test]
fn test_sprint_doubles_speed() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    player.input_mut().handle_key(KeyCode::W, true);
    player.input_mut().handle_key(KeyCode::ShiftLeft, true);

    run(&mut player, &level, 30);

    assert!(player.is_sprinting());
    assert!((player.body().horizontal_speed() - 24.0).abs() < 1e-4);
    assert!(player.sprint_charge() < 1.0);
}

#[test]
fn test_wall_slide_keeps_tangential_motion() {
    let mut mesh = TriangleMesh::new();
    mesh.add_floor(Vec3::ZERO, Vec2::splat(60.0));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(2.0, 0.0, -50.0), Vec3::new(3.0, 5.0, 50.0)));
    let mut level = Level::new();
    level.add_layer("room", Octree::from_mesh(&mesh));

    let config = ControllerConfig::default();
    let radius = config.capsule.radius;
    let mut player = spawn_at_rest(config);
    player.input_mut().handle_key(KeyCode::W, true);
    player.input_mut().handle_key(KeyCode::D, true);

    let mut touched_wall = false;
    for _ in 0..60 {
        let report = player.tick(DT, &level);
        touched_wall |= report.contact.is_some_and(|c| c.normal.x < -0.9);
        assert!(player.body().position.x <= 2.0 - radius + 0.02);
    }

    assert!(touched_wall);
    let body = player.body();
    assert!(body.grounded);
    // Into-wall component removed, tangential component kept
    let tangential = -12.0 / 2.0_f32.sqrt();
    assert!(body.velocity.x.abs() < 1e-4);
    assert!((body.velocity.z - tangential).abs() < 1e-4);
    // One second of sliding
    assert!((body.position.z - tangential).abs() < 0.05);
}

// ============================================================================
// Look and Camera Tests
// ============================================================================

#[test]
fn test_mouse_look_yaw_and_pitch_clamp() {
    let level = flat_level();
    let config = ControllerConfig::default();
    let limit = config.look.pitch_limit();
    let mut player = spawn_at_rest(config);

    player.input_mut().accumulate_mouse_motion(192.0, 0.0);
    player.tick(DT, &level);
    assert!((player.orientation().yaw() + 0.8).abs() < 1e-5);

    player.input_mut().accumulate_mouse_motion(0.0, 5000.0);
    player.tick(DT, &level);
    assert!((player.orientation().pitch() + limit).abs() < 1e-5);

    player.input_mut().accumulate_mouse_motion(0.0, -50000.0);
    player.tick(DT, &level);
    assert!((player.orientation().pitch() - limit).abs() < 1e-5);
}

#[test]
fn test_mouse_ignored_without_pointer_lock() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    player.input_mut().set_pointer_locked(false);

    player.input_mut().accumulate_mouse_motion(500.0, 500.0);
    player.tick(DT, &level);

    assert_eq!(player.orientation().yaw(), 0.0);
    assert_eq!(player.orientation().pitch(), 0.0);
}

#[test]
fn test_camera_follows_eye_with_head_bob() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    let mut camera = CameraTransform::default();

    player.sync_camera(&mut camera);
    assert!((camera.position - player.eye_position()).length() < 1e-6);

    player.input_mut().handle_key(KeyCode::W, true);
    run(&mut player, &level, 6);
    player.sync_camera(&mut camera);
    assert!(camera.position.y > player.eye_position().y);
    assert!((camera.forward() - player.orientation().forward()).length() < 1e-5);

    // Stopping lets the bob finish its step and settle back to the eye
    player.input_mut().handle_key(KeyCode::W, false);
    run(&mut player, &level, 30);
    player.sync_camera(&mut camera);
    assert!((camera.position - player.eye_position()).length() < 1e-4);
}

#[test]
fn test_head_bob_can_be_disabled() {
    let level = flat_level();
    let config = ControllerConfig {
        head_bob_enabled: false,
        ..Default::default()
    };
    let mut player = spawn_at_rest(config);
    player.input_mut().handle_key(KeyCode::W, true);
    run(&mut player, &level, 6);

    let mut camera = CameraTransform::default();
    player.sync_camera(&mut camera);
    assert_eq!(camera.position, player.eye_position());
}

#[test]
fn test_head_bob_still_when_keys_cancel() {
    let level = flat_level();
    let mut player = spawn_at_rest(ControllerConfig::default());
    let start = player.body().position;
    player.input_mut().handle_key(KeyCode::W, true);
    player.input_mut().handle_key(KeyCode::S, true);

    for _ in 0..60 {
        player.tick(DT, &level);
        assert_eq!(player.head_bob_offset(), 0.0);
    }
    assert_eq!(player.body().position, start);
}

#[test]
fn test_head_bob_settles_when_walking_into_wall() {
    let mut mesh = TriangleMesh::new();
    mesh.add_floor(Vec3::ZERO, Vec2::splat(60.0));
    mesh.add_box_bounds(&Aabb::new(Vec3::new(2.0, 0.0, -50.0), Vec3::new(3.0, 5.0, 50.0)));
    let mut level = Level::new();
    level.add_layer("room", Octree::from_mesh(&mesh));

    let mut player = spawn_at_rest(ControllerConfig::default());
    // Face +X, straight at the wall
    player.orientation_mut().set_yaw(-std::f32::consts::FRAC_PI_2);
    player.input_mut().handle_key(KeyCode::W, true);

    // Reach the wall and let the last step finish
    run(&mut player, &level, 40);

    for _ in 0..60 {
        player.tick(DT, &level);
        assert!(player.head_bob_offset().abs() < 1e-4);
    }
}
