// hoopshot_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod events;
pub mod prng;
pub mod scene_graph;
pub mod session_setup;
pub mod transforms;
