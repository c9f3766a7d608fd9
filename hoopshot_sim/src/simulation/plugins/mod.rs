// hoopshot_sim/src/simulation/plugins/mod.rs

pub mod camera;
pub mod input;
pub mod sensors;
pub mod world;
