// hoopshot_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire hoopshot_core prelude so you can easily access
// pure types like `AnchorId`, `PlaneAnchor`, `ArSession`, etc.
pub use hoopshot_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, ArSet};
pub use crate::simulation::core::transforms::{
    bevy_global_transform_to_nalgebra_isometry, nalgebra_isometry_to_bevy_transform,
};
