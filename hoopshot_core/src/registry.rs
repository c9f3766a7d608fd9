// hoopshot_core/src/registry.rs

use std::collections::HashMap;

use crate::anchors::PlaneAnchor;
use crate::decoration;
use crate::scene::SceneGraph;
use crate::types::{AnchorId, NodeId, NodeIdAllocator, PlaneDetection};

/// A tracked plane and the overlay node that represents it.
#[derive(Debug, Clone)]
pub struct PlaneEntry {
    /// The latest geometry reported for this anchor.
    pub anchor: PlaneAnchor,
    pub node: NodeId,
    pub opacity: f32,
}

/// The set of plane anchors currently tracked, keyed by anchor identity.
///
/// The registry is the only thing that creates or destroys plane overlay nodes.
/// Every entry owns exactly one node and the node goes away with the entry.
#[derive(Debug)]
pub struct AnchorRegistry {
    entries: HashMap<AnchorId, PlaneEntry>,
    /// Classes accepted for *new* anchors. Already tracked anchors keep
    /// receiving updates unless an update moves them into a rejected class.
    accepting: PlaneDetection,
    overlay_opacity: f32,
    /// The anchor whose overlay must stay invisible (the hoop's wall).
    hidden: Option<AnchorId>,
}

impl AnchorRegistry {
    pub fn new(accepting: PlaneDetection, overlay_opacity: f32) -> Self {
        Self {
            entries: HashMap::new(),
            accepting,
            overlay_opacity,
            hidden: None,
        }
    }

    pub fn set_accepting(&mut self, accepting: PlaneDetection) {
        self.accepting = accepting;
    }

    /// Starts tracking `anchor` and creates its overlay.
    ///
    /// Returns `false` if the anchor's class is filtered out. An add for an id
    /// that is already tracked is applied as an update.
    pub fn on_anchor_added(
        &mut self,
        anchor: PlaneAnchor,
        ids: &mut NodeIdAllocator,
        scene: &mut dyn SceneGraph,
    ) -> bool {
        if self.entries.contains_key(&anchor.id) {
            self.on_anchor_updated(anchor, scene);
            return true;
        }
        if !self.accepting.accepts(anchor.alignment) {
            return false;
        }

        let node = ids.allocate();
        let opacity = if self.hidden == Some(anchor.id) {
            0.0
        } else {
            self.overlay_opacity
        };
        let (spec, shape) = decoration::plane_overlay(&anchor, opacity);
        scene.add_node(node, spec);
        scene.attach_static_collider(node, shape);

        self.entries.insert(
            anchor.id,
            PlaneEntry {
                anchor,
                node,
                opacity,
            },
        );
        true
    }

    /// Moves and resizes the overlay to follow the anchor's latest geometry.
    ///
    /// Only what actually changed is sent to the scene, so repeating the same
    /// update is silent. Unknown anchors (e.g. filtered out at add time) are
    /// ignored. An anchor reclassified into a class the filter rejects is
    /// dropped along with its overlay. Returns `true` if anything was sent.
    pub fn on_anchor_updated(&mut self, anchor: PlaneAnchor, scene: &mut dyn SceneGraph) -> bool {
        let hidden = self.hidden;
        let Some(entry) = self.entries.get_mut(&anchor.id) else {
            return false;
        };

        if entry.anchor.alignment != anchor.alignment && !self.accepting.accepts(anchor.alignment) {
            self.on_anchor_removed(anchor.id, scene);
            return true;
        }

        let mut changed = false;
        if entry.anchor.transform != anchor.transform || entry.anchor.center != anchor.center {
            scene.set_transform(entry.node, anchor.center_pose());
            changed = true;
        }
        if entry.anchor.extent != anchor.extent {
            scene.set_extent(entry.node, anchor.extent);
            changed = true;
        }
        if hidden == Some(anchor.id) && entry.opacity != 0.0 {
            entry.opacity = 0.0;
            scene.set_opacity(entry.node, 0.0);
            changed = true;
        }

        entry.anchor = anchor;
        changed
    }

    /// Stops tracking the anchor and releases its overlay node.
    pub fn on_anchor_removed(
        &mut self,
        id: AnchorId,
        scene: &mut dyn SceneGraph,
    ) -> Option<PlaneEntry> {
        let entry = self.entries.remove(&id)?;
        scene.remove_node(entry.node);
        Some(entry)
    }

    /// Makes the overlay of `id` invisible, now and on every later update.
    pub fn hide_overlay(&mut self, id: AnchorId, scene: &mut dyn SceneGraph) {
        self.hidden = Some(id);
        if let Some(entry) = self.entries.get_mut(&id) {
            if entry.opacity != 0.0 {
                entry.opacity = 0.0;
                scene.set_opacity(entry.node, 0.0);
            }
        }
    }

    pub fn get(&self, id: AnchorId) -> Option<&PlaneEntry> {
        self.entries.get(&id)
    }

    pub fn node_for(&self, id: AnchorId) -> Option<NodeId> {
        self.entries.get(&id).map(|entry| entry.node)
    }

    pub fn anchors(&self) -> impl Iterator<Item = &PlaneAnchor> {
        self.entries.values().map(|entry| &entry.anchor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneCommand;
    use crate::types::PlaneAlignment;
    use nalgebra::{Isometry3, Point3, Vector2};

    fn plane(id: u64, alignment: PlaneAlignment) -> PlaneAnchor {
        PlaneAnchor::new(
            AnchorId(id),
            alignment,
            Isometry3::translation(0.0, 0.0, -1.0),
            Vector2::new(1.0, 1.0),
        )
    }

    fn live_nodes(scene: &[SceneCommand]) -> usize {
        let added = scene
            .iter()
            .filter(|c| matches!(c, SceneCommand::AddNode(..)))
            .count();
        let removed = scene
            .iter()
            .filter(|c| matches!(c, SceneCommand::RemoveNode(..)))
            .count();
        added - removed
    }

    #[test]
    fn filters_anchors_by_class() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        assert!(registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene));
        assert!(!registry.on_anchor_added(
            plane(2, PlaneAlignment::Horizontal),
            &mut ids,
            &mut scene
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(live_nodes(&scene), 1);
        // Overlay plus its static collider.
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn updates_for_filtered_anchors_are_ignored() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        registry.on_anchor_added(plane(2, PlaneAlignment::Horizontal), &mut ids, &mut scene);
        let mut grown = plane(2, PlaneAlignment::Horizontal);
        grown.extent = Vector2::new(3.0, 3.0);
        assert!(!registry.on_anchor_updated(grown, &mut scene));
        assert!(scene.is_empty());
    }

    #[test]
    fn reclassified_into_rejected_class_drops_the_overlay() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        let node = registry.node_for(AnchorId(1)).unwrap();

        assert!(registry.on_anchor_updated(plane(1, PlaneAlignment::Horizontal), &mut scene));
        assert!(registry.is_empty());
        assert_eq!(scene.last(), Some(&SceneCommand::RemoveNode(node)));
        assert_eq!(live_nodes(&scene), 0);

        // Later updates for the dropped anchor are ignored like any unknown one.
        scene.clear();
        assert!(!registry.on_anchor_updated(plane(1, PlaneAlignment::Horizontal), &mut scene));
        assert!(scene.is_empty());
    }

    #[test]
    fn reclassified_into_accepted_class_stays_tracked() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL_AND_HORIZONTAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        registry.on_anchor_updated(plane(1, PlaneAlignment::Horizontal), &mut scene);
        assert_eq!(
            registry.get(AnchorId(1)).unwrap().anchor.alignment,
            PlaneAlignment::Horizontal
        );
        assert_eq!(live_nodes(&scene), 1);
    }

    #[test]
    fn repeated_updates_are_silent() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();
        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        scene.clear();

        let mut grown = plane(1, PlaneAlignment::Vertical);
        grown.extent = Vector2::new(2.0, 1.5);
        grown.center = Point3::new(0.5, 0.0, 0.25);

        assert!(registry.on_anchor_updated(grown.clone(), &mut scene));
        assert_eq!(scene.len(), 2);
        assert!(matches!(scene[0], SceneCommand::SetTransform(..)));
        assert_eq!(scene[1], SceneCommand::SetExtent(NodeId(0), Vector2::new(2.0, 1.5)));

        scene.clear();
        assert!(!registry.on_anchor_updated(grown.clone(), &mut scene));
        assert!(!registry.on_anchor_updated(grown, &mut scene));
        assert!(scene.is_empty());
    }

    #[test]
    fn removal_releases_the_node() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL_AND_HORIZONTAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        registry.on_anchor_added(plane(2, PlaneAlignment::Horizontal), &mut ids, &mut scene);
        let node = registry.node_for(AnchorId(1)).unwrap();

        let removed = registry.on_anchor_removed(AnchorId(1), &mut scene).unwrap();
        assert_eq!(removed.node, node);
        assert_eq!(scene.last(), Some(&SceneCommand::RemoveNode(node)));
        assert!(registry.on_anchor_removed(AnchorId(1), &mut scene).is_none());
        assert!(registry.on_anchor_removed(AnchorId(99), &mut scene).is_none());

        assert_eq!(registry.len(), 1);
        assert_eq!(live_nodes(&scene), registry.len());
    }

    #[test]
    fn node_count_tracks_anchor_count_over_a_long_sequence() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        for round in 0..5u64 {
            for id in 0..6u64 {
                let alignment = if id % 2 == 0 {
                    PlaneAlignment::Vertical
                } else {
                    PlaneAlignment::Horizontal
                };
                let mut anchor = plane(id, alignment);
                anchor.extent = Vector2::new(1.0 + round as f64, 1.0);
                if round == 0 {
                    registry.on_anchor_added(anchor, &mut ids, &mut scene);
                } else {
                    registry.on_anchor_updated(anchor, &mut scene);
                }
            }
            if round == 3 {
                registry.on_anchor_removed(AnchorId(2), &mut scene);
                registry.on_anchor_removed(AnchorId(3), &mut scene);
            }
            let expected = registry
                .anchors()
                .filter(|a| a.alignment == PlaneAlignment::Vertical)
                .count();
            assert_eq!(registry.len(), expected);
            assert_eq!(live_nodes(&scene), expected);
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_add_is_an_update() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();

        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        assert_eq!(registry.len(), 1);
        assert_eq!(live_nodes(&scene), 1);
    }

    #[test]
    fn hidden_overlay_goes_transparent_once() {
        let mut registry = AnchorRegistry::new(PlaneDetection::VERTICAL, 0.25);
        let mut ids = NodeIdAllocator::default();
        let mut scene: Vec<SceneCommand> = Vec::new();
        registry.on_anchor_added(plane(1, PlaneAlignment::Vertical), &mut ids, &mut scene);
        registry.on_anchor_added(plane(2, PlaneAlignment::Vertical), &mut ids, &mut scene);
        let hoop_wall = registry.node_for(AnchorId(1)).unwrap();
        scene.clear();

        registry.hide_overlay(AnchorId(1), &mut scene);
        assert_eq!(scene, vec![SceneCommand::SetOpacity(hoop_wall, 0.0)]);

        scene.clear();
        registry.on_anchor_updated(plane(1, PlaneAlignment::Vertical), &mut scene);
        registry.on_anchor_updated(plane(2, PlaneAlignment::Vertical), &mut scene);
        assert!(scene.is_empty());
        assert_eq!(registry.get(AnchorId(2)).unwrap().opacity, 0.25);
    }
}
