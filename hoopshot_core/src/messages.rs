use crate::anchors::PlaneAnchor;
use crate::types::AnchorId;
use nalgebra::Isometry3;

// =========================================================================
// == Sensor Pipeline Messages ==
// =========================================================================

/// An anchor as the sensor pipeline reports it, before we know it is a plane.
#[derive(Clone, Debug)]
pub enum RawAnchor {
    Plane(PlaneAnchor),
    /// A bare feature point or user-placed anchor.
    Point { id: AnchorId, transform: Isometry3<f64> },
    /// A recognised reference image.
    Image { id: AnchorId, transform: Isometry3<f64> },
}

impl RawAnchor {
    pub fn id(&self) -> AnchorId {
        match self {
            RawAnchor::Plane(plane) => plane.id,
            RawAnchor::Point { id, .. } | RawAnchor::Image { id, .. } => *id,
        }
    }

    /// The plane cast. Every other anchor kind is dropped here.
    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            RawAnchor::Plane(plane) => Some(plane),
            _ => None,
        }
    }
}

/// The anchor lifecycle events the sensor pipeline publishes.
#[derive(Clone, Debug)]
pub enum AnchorEvent {
    Added(RawAnchor),
    Updated(RawAnchor),
    Removed(AnchorId),
}

impl AnchorEvent {
    pub fn anchor_id(&self) -> AnchorId {
        match self {
            AnchorEvent::Added(raw) | AnchorEvent::Updated(raw) => raw.id(),
            AnchorEvent::Removed(id) => *id,
        }
    }
}
