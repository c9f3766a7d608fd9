// hoopshot_core/src/types.rs

use serde::Deserialize;

// --- Core Identifiers ---

/// The opaque identity the sensor pipeline assigns to a tracked anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl AnchorId {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// Identity of a scene-graph node. Allocated by the core, mapped to whatever
/// the rendering engine uses on the other side of the `SceneGraph` seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Hands out increasing `NodeId`s. Ids are never reused within a session.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: u64,
}

impl NodeIdAllocator {
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

// --- Plane Classification ---

/// Whether a detected surface is wall-like or floor/ceiling-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PlaneAlignment {
    Vertical,
    Horizontal,
}

/// The set of plane classes the sensor pipeline is asked to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaneDetection {
    pub vertical: bool,
    pub horizontal: bool,
}

impl PlaneDetection {
    pub const NONE: Self = Self {
        vertical: false,
        horizontal: false,
    };
    pub const VERTICAL: Self = Self {
        vertical: true,
        horizontal: false,
    };
    pub const VERTICAL_AND_HORIZONTAL: Self = Self {
        vertical: true,
        horizontal: true,
    };

    pub fn accepts(&self, alignment: PlaneAlignment) -> bool {
        match alignment {
            PlaneAlignment::Vertical => self.vertical,
            PlaneAlignment::Horizontal => self.horizontal,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.vertical && !self.horizontal
    }
}

impl<'de> Deserialize<'de> for PlaneDetection {
    /// Deserializes from a list such as `["Vertical", "Horizontal"]`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let classes = Vec::<PlaneAlignment>::deserialize(deserializer)?;
        Ok(classes
            .into_iter()
            .fold(PlaneDetection::NONE, |mut acc, alignment| {
                match alignment {
                    PlaneAlignment::Vertical => acc.vertical = true,
                    PlaneAlignment::Horizontal => acc.horizontal = true,
                }
                acc
            }))
    }
}

/// What the sensor pipeline should currently be doing. Read by the sensor adapter
/// every frame; `occlusion` is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionConfig {
    pub planes: PlaneDetection,
    pub occlusion: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_accepts_only_enabled_classes() {
        assert!(PlaneDetection::VERTICAL.accepts(PlaneAlignment::Vertical));
        assert!(!PlaneDetection::VERTICAL.accepts(PlaneAlignment::Horizontal));
        assert!(PlaneDetection::VERTICAL_AND_HORIZONTAL.accepts(PlaneAlignment::Horizontal));
        assert!(PlaneDetection::NONE.is_empty());
    }

    #[test]
    fn allocator_never_repeats() {
        let mut ids = NodeIdAllocator::default();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_ne!(a, b);
        assert_eq!(b, NodeId(1));
    }
}
