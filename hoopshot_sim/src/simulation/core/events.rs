// hoopshot_sim/src/simulation/core/events.rs
use bevy::prelude::Event;
// Import the pure data types from the core library
use hoopshot_core::prelude::{AnchorEvent, ScreenPoint};

// This is the Bevy-specific event. It can derive `Event`.
#[derive(Event, Clone, Debug)]
pub struct AnchorEventMessage(pub AnchorEvent); // It's a simple "tuple-struct" wrapper

/// A recognised single tap, in logical window pixels with the origin top-left.
#[derive(Event, Clone, Copy, Debug)]
pub struct TapEvent(pub ScreenPoint);
