// hoopshot_sim/src/simulation/plugins/camera/rig.rs

//! The simulated device camera: spawned from `[camera]`, walked around with
//! the keyboard, and sampled into a `CameraFrame` whenever the session needs
//! one.

use bevy::ecs::system::SystemParam;
use bevy::window::PrimaryWindow;
use hoopshot_core::placement::{CameraFrame, Viewport};

use crate::prelude::*;
use crate::simulation::core::transforms::bevy_global_transform_to_nalgebra_isometry;

/// Marks the camera that stands in for the handheld device.
#[derive(Component, Debug)]
pub struct ArCamera {
    /// Meters per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_rate: f32,
}

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), spawn_ar_camera)
            .add_systems(Update, keyboard_rig_system.in_set(ArSet::Input));
    }
}

fn spawn_ar_camera(mut commands: Commands, config: Res<ScenarioConfig>) {
    let camera = &config.camera;
    let transform = camera.starting_pose.to_bevy_transform();
    info!(
        "[CAMERA] Spawning AR camera at {:?}, vertical FOV {:.0} deg.",
        transform.translation, camera.vertical_fov_deg
    );

    commands.spawn((
        Name::new("ArCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.vertical_fov_deg.to_radians(),
            ..default()
        }),
        transform,
        ArCamera {
            move_speed: camera.move_speed,
            turn_rate: camera.turn_rate_deg.to_radians(),
        },
    ));
}

/// WASD walks on the horizontal plane, Q/E rise and sink, the arrow keys turn
/// and tilt. Stands in for the user moving their phone.
fn keyboard_rig_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&ArCamera, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (rig, mut transform) in &mut query {
        let mut walk = Vec3::ZERO;
        if keyboard_input.pressed(KeyCode::KeyW) {
            walk.z -= 1.0;
        }
        if keyboard_input.pressed(KeyCode::KeyS) {
            walk.z += 1.0;
        }
        if keyboard_input.pressed(KeyCode::KeyA) {
            walk.x -= 1.0;
        }
        if keyboard_input.pressed(KeyCode::KeyD) {
            walk.x += 1.0;
        }
        if keyboard_input.pressed(KeyCode::KeyE) {
            walk.y += 1.0;
        }
        if keyboard_input.pressed(KeyCode::KeyQ) {
            walk.y -= 1.0;
        }

        if walk != Vec3::ZERO {
            // Walking ignores pitch so looking down does not sink the camera.
            let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
            let heading = Quat::from_rotation_y(yaw);
            let step = heading * Vec3::new(walk.x, 0.0, walk.z) + Vec3::Y * walk.y;
            transform.translation += step.normalize_or_zero() * rig.move_speed * dt;
        }

        let mut yaw = 0.0;
        let mut pitch = 0.0;
        if keyboard_input.pressed(KeyCode::ArrowLeft) {
            yaw += 1.0;
        }
        if keyboard_input.pressed(KeyCode::ArrowRight) {
            yaw -= 1.0;
        }
        if keyboard_input.pressed(KeyCode::ArrowUp) {
            pitch += 1.0;
        }
        if keyboard_input.pressed(KeyCode::ArrowDown) {
            pitch -= 1.0;
        }
        if yaw != 0.0 {
            transform.rotate_y(yaw * rig.turn_rate * dt);
        }
        if pitch != 0.0 {
            transform.rotate_local_x(pitch * rig.turn_rate * dt);
        }
    }
}

/// Samples the AR camera into the core's `CameraFrame`.
///
/// The viewport is the primary window's logical size; without a window (headless
/// runs) it falls back to `[camera].viewport`.
#[derive(SystemParam)]
pub struct CameraFrameQuery<'w, 's> {
    cameras: Query<'w, 's, (&'static GlobalTransform, &'static Projection), With<ArCamera>>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    config: Res<'w, ScenarioConfig>,
}

impl CameraFrameQuery<'_, '_> {
    pub fn frame(&self) -> Option<CameraFrame> {
        let (transform, projection) = self.cameras.single().ok()?;
        let vertical_fov = match projection {
            Projection::Perspective(perspective) => perspective.fov as f64,
            _ => self.config.camera.vertical_fov_deg.to_radians() as f64,
        };
        let (width, height) = match self.windows.single() {
            Ok(window) => (window.width() as f64, window.height() as f64),
            Err(_) => {
                let [w, h] = self.config.camera.viewport;
                (w as f64, h as f64)
            }
        };

        Some(CameraFrame {
            pose: bevy_global_transform_to_nalgebra_isometry(transform),
            viewport: Viewport {
                width,
                height,
                vertical_fov,
            },
        })
    }

    /// The viewport center, where the crosshair is drawn.
    pub fn center(&self) -> Option<ScreenPoint> {
        self.frame()
            .map(|frame| ScreenPoint::new(frame.viewport.width / 2.0, frame.viewport.height / 2.0))
    }
}
