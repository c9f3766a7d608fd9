// hoopshot_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The hoop model and other assets are loading.
    #[default]
    AssetLoading,

    /// Assets are ready. The session is live and reacting to anchors and taps.
    Running,
}

// =========================================================================
// == Main Frame Sets (The "Data Flow Graph") ==
// =========================================================================

/// Per-frame ordering while `Running`. Configured as a chain.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArSet {
    /// The simulated tracker publishes anchor events.
    Sensors,
    /// The camera rig moves and taps are recognised.
    Input,
    /// Anchor events and taps are fed to the `ArSession`. Its scene-graph
    /// commands are flushed when these systems finish.
    Session,
}
