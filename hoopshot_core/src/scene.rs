// hoopshot_core/src/scene.rs

//! The seam between the core and the rendering/physics engine.
//!
//! The core never touches an engine directly. Every visible or simulated change
//! goes through `SceneGraph`. The Bevy adapter implements it on `Commands`;
//! tests use the recording implementation on `Vec<SceneCommand>`.

use crate::types::NodeId;
use nalgebra::{Isometry3, Vector2, Vector3};

/// What a node looks like. The engine decides how to draw each kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A flat rectangle drawn over a detected plane.
    PlaneOverlay {
        width: f64,
        height: f64,
        opacity: f32,
    },
    /// The pre-authored hoop model, loaded from `asset`.
    Hoop { asset: String },
    Ball { radius: f64 },
}

/// Everything the engine needs to create a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    /// World pose of the node.
    pub pose: Isometry3<f64>,
}

/// Collision shapes handed to the physics engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// Full side lengths along local X, Y and Z.
    Cuboid { size: Vector3<f64> },
    Sphere { radius: f64 },
    /// A concave triangle mesh built from the node's own render mesh.
    ConcaveMesh,
}

/// The contract for any engine that can display and simulate the scene.
pub trait SceneGraph {
    fn add_node(&mut self, id: NodeId, spec: NodeSpec);
    fn remove_node(&mut self, id: NodeId);
    fn set_opacity(&mut self, id: NodeId, opacity: f32);
    fn set_transform(&mut self, id: NodeId, pose: Isometry3<f64>);
    /// Resizes a plane overlay. `extent` is width by height.
    fn set_extent(&mut self, id: NodeId, extent: Vector2<f64>);

    fn attach_static_collider(&mut self, id: NodeId, shape: ColliderShape);
    fn attach_dynamic_collider(&mut self, id: NodeId, shape: ColliderShape);
    /// Applies an instantaneous change in momentum, once.
    fn apply_impulse(&mut self, id: NodeId, impulse: Vector3<f64>);
}

/// One recorded `SceneGraph` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    AddNode(NodeId, NodeSpec),
    RemoveNode(NodeId),
    SetOpacity(NodeId, f32),
    SetTransform(NodeId, Isometry3<f64>),
    SetExtent(NodeId, Vector2<f64>),
    AttachStaticCollider(NodeId, ColliderShape),
    AttachDynamicCollider(NodeId, ColliderShape),
    ApplyImpulse(NodeId, Vector3<f64>),
}

impl SceneCommand {
    pub fn node(&self) -> NodeId {
        match self {
            SceneCommand::AddNode(id, _)
            | SceneCommand::RemoveNode(id)
            | SceneCommand::SetOpacity(id, _)
            | SceneCommand::SetTransform(id, _)
            | SceneCommand::SetExtent(id, _)
            | SceneCommand::AttachStaticCollider(id, _)
            | SceneCommand::AttachDynamicCollider(id, _)
            | SceneCommand::ApplyImpulse(id, _) => *id,
        }
    }
}

// Records every call in order. Tests observe the core through it.
impl SceneGraph for Vec<SceneCommand> {
    fn add_node(&mut self, id: NodeId, spec: NodeSpec) {
        self.push(SceneCommand::AddNode(id, spec));
    }

    fn remove_node(&mut self, id: NodeId) {
        self.push(SceneCommand::RemoveNode(id));
    }

    fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        self.push(SceneCommand::SetOpacity(id, opacity));
    }

    fn set_transform(&mut self, id: NodeId, pose: Isometry3<f64>) {
        self.push(SceneCommand::SetTransform(id, pose));
    }

    fn set_extent(&mut self, id: NodeId, extent: Vector2<f64>) {
        self.push(SceneCommand::SetExtent(id, extent));
    }

    fn attach_static_collider(&mut self, id: NodeId, shape: ColliderShape) {
        self.push(SceneCommand::AttachStaticCollider(id, shape));
    }

    fn attach_dynamic_collider(&mut self, id: NodeId, shape: ColliderShape) {
        self.push(SceneCommand::AttachDynamicCollider(id, shape));
    }

    fn apply_impulse(&mut self, id: NodeId, impulse: Vector3<f64>) {
        self.push(SceneCommand::ApplyImpulse(id, impulse));
    }
}
