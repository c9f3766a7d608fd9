// hoopshot_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::session_setup::SessionSetupPlugin;
use crate::simulation::plugins::camera::rig::CameraRigPlugin;
use crate::simulation::plugins::input::tap::TapInputPlugin;
use crate::simulation::plugins::sensors::plane_detection::PlaneDetectionPlugin;
use crate::simulation::plugins::world::spawner::WorldSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the hoopshot_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// Expects `ScenarioConfig` to be inserted and `AppState` to be initialised.
pub struct HoopshotPlugin;

impl Plugin for HoopshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // The session, its events, and the frame ordering.
            SessionSetupPlugin,
            // Loads the hoop, lights the room, draws the scripted surfaces.
            WorldSpawnerPlugin,
            // The handheld camera.
            CameraRigPlugin,
            // The world tracker.
            PlaneDetectionPlugin,
            // Mouse, touch and scripted taps.
            TapInputPlugin,
        ));
    }
}
