// hoopshot_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::messages::{AnchorEvent, RawAnchor};
pub use crate::scene::{ColliderShape, NodeKind, NodeSpec, SceneCommand, SceneGraph};
pub use crate::types::{AnchorId, DetectionConfig, NodeId, PlaneAlignment, PlaneDetection};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::anchors::PlaneAnchor;
pub use crate::config::{PlayModeDetection, SessionConfig};
pub use crate::error::SessionError;
pub use crate::launcher::BallObject;
pub use crate::placement::{CameraFrame, Placement, ScreenPoint, Viewport};
pub use crate::registry::PlaneEntry;
pub use crate::session::{HoopObject, InteractionState, TapOutcome};

// --- The Components ---
pub use crate::launcher::ProjectileLauncher;
pub use crate::registry::AnchorRegistry;
pub use crate::session::ArSession;
