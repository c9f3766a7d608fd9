// hoopshot_core/src/anchors.rs

use crate::types::{AnchorId, PlaneAlignment};
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector2};

/// A real-world plane reported by the sensor pipeline.
///
/// The plane lies in the anchor's local XZ plane, with local +Y as its normal.
/// `center` and `extent` are expressed in that local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// Center of the detected extent, in plane-local coordinates.
    pub center: Point3<f64>,
    /// Width (local X) by depth (local Z), in meters.
    pub extent: Vector2<f64>,
    pub alignment: PlaneAlignment,
    /// World pose of the anchor.
    pub transform: Isometry3<f64>,
}

impl PlaneAnchor {
    pub fn new(
        id: AnchorId,
        alignment: PlaneAlignment,
        transform: Isometry3<f64>,
        extent: Vector2<f64>,
    ) -> Self {
        Self {
            id,
            center: Point3::origin(),
            extent,
            alignment,
            transform,
        }
    }

    pub fn with_center(mut self, center: Point3<f64>) -> Self {
        self.center = center;
        self
    }

    /// Builds the world pose from a homogeneous 4x4 matrix, as the tracking
    /// pipeline reports it. Any scale or shear in the upper 3x3 block is
    /// discarded by re-orthonormalizing it.
    pub fn pose_from_matrix(matrix: &Matrix4<f64>) -> Isometry3<f64> {
        let block: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix(&block));
        let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        Isometry3::from_parts(translation, rotation)
    }

    /// World pose of the extent's center (anchor pose offset by `center`).
    pub fn center_pose(&self) -> Isometry3<f64> {
        self.transform * Translation3::from(self.center.coords)
    }

    /// True if a point in plane-local coordinates falls inside the current extent.
    /// Boundary points count as inside.
    pub fn contains_local(&self, local: &Point3<f64>) -> bool {
        let half_width = self.extent.x / 2.0;
        let half_depth = self.extent.y / 2.0;
        (local.x - self.center.x).abs() <= half_width
            && (local.z - self.center.z).abs() <= half_depth
    }

    /// True if `other` describes the same geometry (pose, center and extent).
    pub fn same_geometry(&self, other: &PlaneAnchor) -> bool {
        self.center == other.center
            && self.extent == other.extent
            && self.transform == other.transform
    }
}
