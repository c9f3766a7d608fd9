// hoopshot_core/src/lib.rs

// This file defines the public modules of the library.
pub mod anchors;
pub mod config;
pub mod decoration;
pub mod error;
pub mod launcher;
pub mod messages;
pub mod placement;
pub mod prelude;
pub mod registry;
pub mod scene;
pub mod session;
pub mod types;
