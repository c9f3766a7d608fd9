// hoopshot_core/src/placement.rs

//! Resolves a 2D tap into a 3D placement pose by hit-testing the tracked planes.

use crate::anchors::PlaneAnchor;
use crate::registry::AnchorRegistry;
use crate::types::{AnchorId, PlaneAlignment};
use nalgebra::{Isometry3, Point2, Point3, Translation3, Unit, Vector3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f64 = 1e-9;

/// A pixel position on screen. Origin is the top-left corner, +y points down.
pub type ScreenPoint = Point2<f64>;

/// The part of the camera image the user can tap on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical field of view, in radians.
    pub vertical_fov: f64,
}

impl Viewport {
    pub fn contains(&self, point: &ScreenPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Unprojects a screen point into a world-space ray through a pinhole camera
    /// that looks down its local -Z with +Y up.
    pub fn ray_through(&self, camera_pose: &Isometry3<f64>, point: &ScreenPoint) -> Option<Ray> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(point) {
            return None;
        }

        let ndc_x = 2.0 * point.x / self.width - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / self.height;
        let tan_half_fov = (self.vertical_fov / 2.0).tan();
        let aspect = self.width / self.height;

        let local = Vector3::new(ndc_x * tan_half_fov * aspect, ndc_y * tan_half_fov, -1.0);
        Some(Ray {
            origin: Point3::from(camera_pose.translation.vector),
            direction: Unit::new_normalize(camera_pose.rotation * local),
        })
    }
}

/// A snapshot of the camera for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World pose of the camera.
    pub pose: Isometry3<f64>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

/// One intersection between a ray and a tracked plane's extent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneHit {
    pub anchor: AnchorId,
    pub alignment: PlaneAlignment,
    /// Distance along the ray, in meters.
    pub distance: f64,
    /// World pose at the hit point, oriented like the anchor.
    pub world_pose: Isometry3<f64>,
}

/// A resolved placement: where the hoop goes and which anchor it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub anchor: AnchorId,
    pub pose: Isometry3<f64>,
    pub distance: f64,
}

/// Intersects `ray` with the current extent of every given plane.
/// Results are sorted nearest first.
pub fn hit_test<'a>(ray: &Ray, planes: impl IntoIterator<Item = &'a PlaneAnchor>) -> Vec<PlaneHit> {
    let mut hits: Vec<PlaneHit> = planes
        .into_iter()
        .filter_map(|plane| intersect_plane(ray, plane))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn intersect_plane(ray: &Ray, plane: &PlaneAnchor) -> Option<PlaneHit> {
    // Work in the anchor's frame, where the plane is `y = center.y`.
    let to_local = plane.transform.inverse();
    let local_origin = to_local * ray.origin;
    let local_direction = to_local.rotation * ray.direction.into_inner();

    if local_direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane.center.y - local_origin.y) / local_direction.y;
    if t <= 0.0 {
        return None;
    }

    let local_hit = local_origin + local_direction * t;
    if !plane.contains_local(&local_hit) {
        return None;
    }

    let world_hit = plane.transform * local_hit;
    Some(PlaneHit {
        anchor: plane.id,
        alignment: plane.alignment,
        distance: t,
        world_pose: Isometry3::from_parts(
            Translation3::from(world_hit.coords),
            plane.transform.rotation,
        ),
    })
}

/// Turns a tap into a placement pose.
///
/// Only the nearest hit is considered, and it is accepted only when its plane
/// is vertical. Misses, taps outside the viewport and horizontal nearest hits
/// all return `None`.
pub fn resolve(
    point: &ScreenPoint,
    frame: &CameraFrame,
    registry: &AnchorRegistry,
) -> Option<Placement> {
    let ray = frame.viewport.ray_through(&frame.pose, point)?;
    let nearest = hit_test(&ray, registry.anchors()).into_iter().next()?;

    (nearest.alignment == PlaneAlignment::Vertical).then(|| Placement {
        anchor: nearest.anchor,
        pose: nearest.world_pose,
        distance: nearest.distance,
    })
}
