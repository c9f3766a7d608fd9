// hoopshot_sim/examples/01_basketball.rs

//! The full AR basketball loop against a simulated room.
//!
//! Walk with WASD (Q/E for height), look around with the arrow keys. Planes
//! appear as translucent overlays while the tracker finds them. Click or tap
//! a wall overlay (or press Space to tap the crosshair) to hang the hoop, then
//! every further tap throws a ball straight ahead.
//!
//! To run this example from the `hoopshot_sim` directory:
//! `cargo run --example 01_basketball -- --scenario assets/scenarios/living_room.toml`

use std::time::Duration;

// --- Bevy Imports ---
use avian3d::prelude::*;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, winit::WinitPlugin};
use clap::Parser;

// --- Project-Specific Imports ---
use hoopshot_sim::cli::Cli;
use hoopshot_sim::prelude::AppState;
use hoopshot_sim::simulation::config::load_scenario;
use hoopshot_sim::HoopshotPlugin;

fn main() {
    // --- 1. Load Scenario Configuration ---
    let cli = Cli::parse();
    println!("Loading scenario from: {}", cli.scenario.display());

    // A missing file would silently yield an empty room.
    if !cli.scenario.is_file() {
        panic!(
            "Could not find scenario file at '{}'",
            cli.scenario.display()
        );
    }
    let mut config = load_scenario(&cli.scenario).unwrap_or_else(|err| {
        panic!(
            "Failed to load or parse scenario file at {}: {}",
            cli.scenario.display(),
            err
        );
    });
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    let gravity = Vec3::from_array(config.simulation.gravity);

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    let log_plugin = LogPlugin {
        level: bevy::log::Level::INFO,
        // A good filter for focusing on our crate's logs during development.
        filter: "info,wgpu_core=error,wgpu_hal=error,hoopshot_sim=debug,hoopshot_core=debug"
            .to_string(),
        ..default()
    };

    if cli.headless {
        // No window and no event loop: drive the schedule at 60 Hz ourselves.
        app.add_plugins(
            DefaultPlugins
                .set(log_plugin)
                .set(WindowPlugin {
                    primary_window: None,
                    exit_condition: bevy::window::ExitCondition::DontExit,
                    ..default()
                })
                .disable::<WinitPlugin>(),
        )
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )));
    } else {
        app.add_plugins(DefaultPlugins.set(log_plugin));
    }

    app
        // The Avian3D physics plugins.
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(gravity))
        // Insert the loaded configuration as a Bevy resource so all systems can access it.
        .insert_resource(config);

    app.init_state::<AppState>();

    // --- 3. Add the Main Hoopshot Plugin ---
    app.add_plugins(HoopshotPlugin);

    // --- 4. Run the App ---
    println!("Starting Hoopshot...");
    app.run();
}
