// hoopshot_sim/src/simulation/plugins/input/tap.rs

//! Turns raw pointer input into `TapEvent`s. Left click and touch stand in for
//! a finger, Space taps the crosshair, and `[[taps]]` fire on a timer.

use bevy::input::touch::Touches;
use bevy::window::PrimaryWindow;

use crate::prelude::*;
use crate::simulation::core::events::TapEvent;
use crate::simulation::plugins::camera::rig::CameraFrameQuery;

/// Scripted taps not yet fired, earliest first.
#[derive(Resource, Debug, Default)]
pub struct ScriptedTaps {
    pending: Vec<ScriptedTap>,
}

impl ScriptedTaps {
    pub fn new(mut taps: Vec<ScriptedTap>) -> Self {
        taps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { pending: taps }
    }

    /// Removes and returns every tap due at `elapsed` seconds.
    pub fn take_due(&mut self, elapsed: f32) -> Vec<ScriptedTap> {
        let due = self.pending.partition_point(|tap| tap.at <= elapsed);
        self.pending.drain(..due).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

pub struct TapInputPlugin;

impl Plugin for TapInputPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");
        let scripted = ScriptedTaps::new(config.taps.clone());
        if !scripted.is_empty() {
            info!("[INPUT] {} scripted taps queued.", config.taps.len());
        }

        app.insert_resource(scripted).add_systems(
            Update,
            (pointer_tap_system, crosshair_tap_system, scripted_tap_system).in_set(ArSet::Input),
        );
    }
}

fn pointer_tap_system(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut taps: EventWriter<TapEvent>,
) {
    if let (Some(mouse), Ok(window)) = (mouse, windows.single()) {
        if mouse.just_pressed(MouseButton::Left) {
            // Logical pixels, origin top-left: the same convention as `ScreenPoint`.
            if let Some(cursor) = window.cursor_position() {
                taps.write(TapEvent(ScreenPoint::new(cursor.x as f64, cursor.y as f64)));
            }
        }
    }

    if let Some(touches) = touches {
        for touch in touches.iter_just_pressed() {
            let position = touch.position();
            taps.write(TapEvent(ScreenPoint::new(position.x as f64, position.y as f64)));
        }
    }
}

fn crosshair_tap_system(
    keyboard_input: Option<Res<ButtonInput<KeyCode>>>,
    camera: CameraFrameQuery,
    mut taps: EventWriter<TapEvent>,
) {
    let Some(keyboard_input) = keyboard_input else {
        return;
    };
    if keyboard_input.just_pressed(KeyCode::Space) {
        if let Some(center) = camera.center() {
            taps.write(TapEvent(center));
        }
    }
}

fn scripted_tap_system(
    time: Res<Time>,
    mut scripted: ResMut<ScriptedTaps>,
    mut taps: EventWriter<TapEvent>,
) {
    if scripted.is_empty() {
        return;
    }
    for tap in scripted.take_due(time.elapsed_secs()) {
        debug!(
            "[INPUT] Scripted tap at ({:.0}, {:.0}), t = {:.2}s.",
            tap.point.x, tap.point.y, tap.at
        );
        taps.write(TapEvent(tap.point));
    }
}
