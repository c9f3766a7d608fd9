// hoopshot_sim/src/simulation/core/transforms.rs

//! Conversions between Bevy transforms and the `nalgebra` poses used by the
//! session logic.
//!
//! Both sides share one convention: +Y is up and a camera looks down its
//! local -Z. No axis swap happens here, only a change of scalar type.

use bevy::prelude::{GlobalTransform, Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};

/// Converts a Bevy `Transform` into a `nalgebra::Isometry3<f64>`.
/// Scale is dropped.
pub fn bevy_transform_to_nalgebra_isometry(transform: &BevyTransform) -> Isometry3<f64> {
    let t = transform.translation;
    let r = transform.rotation;
    Isometry3::from_parts(
        Translation3::new(t.x as f64, t.y as f64, t.z as f64),
        UnitQuaternion::from_quaternion(Quaternion::new(
            r.w as f64, r.x as f64, r.y as f64, r.z as f64,
        )),
    )
}

/// Converts a Bevy `GlobalTransform` into a `nalgebra::Isometry3<f64>`.
pub fn bevy_global_transform_to_nalgebra_isometry(transform: &GlobalTransform) -> Isometry3<f64> {
    bevy_transform_to_nalgebra_isometry(&transform.compute_transform())
}

/// Converts a pose into a unit-scale Bevy `Transform`.
pub fn nalgebra_isometry_to_bevy_transform(pose: &Isometry3<f64>) -> BevyTransform {
    let q = pose.rotation.coords;
    BevyTransform {
        translation: nalgebra_vector_to_bevy_vec3(&pose.translation.vector),
        // `coords` is stored as [i, j, k, w].
        rotation: BevyQuat::from_xyzw(q.x as f32, q.y as f32, q.z as f32, q.w as f32)
            .normalize(),
        scale: BevyVec3::ONE,
    }
}

pub fn nalgebra_vector_to_bevy_vec3(v: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(v.x as f32, v.y as f32, v.z as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI as PI_F32;
    use std::f64::consts::PI as PI_F64;

    const F64_EPSILON: f64 = 1e-6;
    const F32_EPSILON: f32 = 1e-5;

    fn assert_bevy_quat_approx_eq(q1: &BevyQuat, q2: &BevyQuat, epsilon: f32) {
        // q and -q are the same rotation.
        let dot_product = q1.dot(*q2);
        assert!(
            dot_product.abs() > 1.0 - epsilon,
            "BevyQuats not approx equal: {:?} vs {:?}, dot: {}",
            q1,
            q2,
            dot_product
        );
    }

    fn assert_nalgebra_quat_approx_eq(
        q1: &UnitQuaternion<f64>,
        q2: &UnitQuaternion<f64>,
        epsilon: f64,
    ) {
        let angle_diff = q1.angle_to(q2);
        assert!(
            angle_diff.abs() < epsilon,
            "Nalgebra UnitQuaternions not approx equal. q1: {:?}, q2: {:?}, angle_diff: {}",
            q1.coords,
            q2.coords,
            angle_diff
        );
    }

    fn assert_bevy_vec3_approx_eq(v1: &BevyVec3, v2: &BevyVec3, epsilon: f32) {
        assert_abs_diff_eq!(v1.x, v2.x, epsilon = epsilon);
        assert_abs_diff_eq!(v1.y, v2.y, epsilon = epsilon);
        assert_abs_diff_eq!(v1.z, v2.z, epsilon = epsilon);
    }

    #[test]
    fn test_bevy_transform_to_nalgebra_isometry_identity() {
        let iso = bevy_transform_to_nalgebra_isometry(&BevyTransform::IDENTITY);
        assert_abs_diff_eq!(iso.translation.vector, Vector3::zeros(), epsilon = F64_EPSILON);
        assert_nalgebra_quat_approx_eq(&iso.rotation, &UnitQuaternion::identity(), F64_EPSILON);
    }

    #[test]
    fn test_bevy_transform_to_nalgebra_isometry_general() {
        let bevy_tf = BevyTransform::from_xyz(1.0, 2.0, 3.0)
            .with_rotation(BevyQuat::from_rotation_y(PI_F32 / 2.0));
        let iso = bevy_transform_to_nalgebra_isometry(&bevy_tf);

        assert_abs_diff_eq!(
            iso.translation.vector,
            Vector3::new(1.0, 2.0, 3.0),
            epsilon = F64_EPSILON
        );
        let expected_rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI_F64 / 2.0);
        assert_nalgebra_quat_approx_eq(&iso.rotation, &expected_rotation, F64_EPSILON);
    }

    #[test]
    fn test_nalgebra_isometry_to_bevy_transform_and_back() {
        let pose = Isometry3::from_parts(
            Translation3::new(0.5, 1.5, -2.0),
            UnitQuaternion::from_euler_angles(0.3, -0.7, 1.1),
        );
        let bevy_tf = nalgebra_isometry_to_bevy_transform(&pose);
        assert_bevy_vec3_approx_eq(&bevy_tf.translation, &BevyVec3::new(0.5, 1.5, -2.0), F32_EPSILON);
        assert_eq!(bevy_tf.scale, BevyVec3::ONE);

        let back = bevy_transform_to_nalgebra_isometry(&bevy_tf);
        assert_abs_diff_eq!(back.translation.vector, pose.translation.vector, epsilon = F64_EPSILON);
        assert_nalgebra_quat_approx_eq(&back.rotation, &pose.rotation, 1e-5);
    }

    #[test]
    fn test_forward_axis_agrees_on_both_sides() {
        // A camera yawed 90 degrees left looks down world -X in both libraries.
        let pose = Isometry3::rotation(Vector3::y() * (PI_F64 / 2.0));
        let bevy_tf = nalgebra_isometry_to_bevy_transform(&pose);

        let nalgebra_forward = pose.rotation * -Vector3::z();
        let bevy_forward = bevy_tf.forward().as_vec3();

        assert_abs_diff_eq!(nalgebra_forward, -Vector3::x(), epsilon = F64_EPSILON);
        assert_bevy_vec3_approx_eq(&bevy_forward, &BevyVec3::NEG_X, F32_EPSILON);
        assert_bevy_quat_approx_eq(
            &bevy_tf.rotation,
            &BevyQuat::from_rotation_y(PI_F32 / 2.0),
            F32_EPSILON,
        );
    }
}
