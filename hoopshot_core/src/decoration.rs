// hoopshot_core/src/decoration.rs

//! Builders for the nodes the session puts into the scene.

use crate::anchors::PlaneAnchor;
use crate::placement::Placement;
use crate::scene::{ColliderShape, NodeKind, NodeSpec};
use nalgebra::{Isometry3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Thickness of the collision slab behind a plane overlay, in meters.
pub const OVERLAY_THICKNESS: f64 = 0.01;

/// A translucent rectangle covering the anchor's current extent.
pub fn plane_overlay(anchor: &PlaneAnchor, opacity: f32) -> (NodeSpec, ColliderShape) {
    let spec = NodeSpec {
        kind: NodeKind::PlaneOverlay {
            width: anchor.extent.x,
            height: anchor.extent.y,
            opacity,
        },
        pose: anchor.center_pose(),
    };
    let shape = ColliderShape::Cuboid {
        size: Vector3::new(anchor.extent.x, OVERLAY_THICKNESS, anchor.extent.y),
    };
    (spec, shape)
}

/// The hoop, standing against the wall it was placed on.
///
/// The model is authored lying in the plane's local XZ plane, so it is tipped
/// a quarter turn about local X to face out of the wall.
pub fn hoop(placement: &Placement, asset: &str) -> (NodeSpec, ColliderShape) {
    let upright = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
    let spec = NodeSpec {
        kind: NodeKind::Hoop {
            asset: asset.to_string(),
        },
        pose: placement.pose * upright,
    };
    (spec, ColliderShape::ConcaveMesh)
}

pub fn ball(pose: Isometry3<f64>, radius: f64) -> (NodeSpec, ColliderShape) {
    let spec = NodeSpec {
        kind: NodeKind::Ball { radius },
        pose,
    };
    (spec, ColliderShape::Sphere { radius })
}
