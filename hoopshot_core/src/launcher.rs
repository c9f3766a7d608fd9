// hoopshot_core/src/launcher.rs

use crate::config::DEFAULT_LAUNCH_POWER;
use crate::decoration;
use crate::placement::CameraFrame;
use crate::scene::SceneGraph;
use crate::types::NodeId;
use nalgebra::{Isometry3, Vector3};

/// A ball in flight. Once spawned it belongs to the physics engine; the
/// launcher keeps no reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BallObject {
    pub node: NodeId,
    /// Where the ball was spawned (the camera pose at launch time).
    pub pose: Isometry3<f64>,
    pub impulse: Vector3<f64>,
}

/// Throws balls from the camera into the scene.
#[derive(Debug, Clone)]
pub struct ProjectileLauncher {
    pub power: f64,
    pub ball_radius: f64,
}

impl Default for ProjectileLauncher {
    fn default() -> Self {
        Self {
            power: DEFAULT_LAUNCH_POWER,
            ball_radius: crate::config::DEFAULT_BALL_RADIUS,
        }
    }
}

impl ProjectileLauncher {
    pub fn new(power: f64, ball_radius: f64) -> Self {
        Self { power, ball_radius }
    }

    /// The launch impulse for a camera at `camera_pose`.
    ///
    /// The camera's third rotation axis (its local +Z in world space) points
    /// back out of the screen, so it is negated to aim into the scene. Only
    /// the orientation matters, never the position.
    pub fn launch_impulse(&self, camera_pose: &Isometry3<f64>) -> Vector3<f64> {
        let back = camera_pose.rotation * Vector3::z();
        -back * self.power
    }

    /// Spawns a ball at the camera with the launch impulse applied once.
    /// Without a camera frame nothing is spawned.
    pub fn launch(
        &self,
        frame: Option<&CameraFrame>,
        node: NodeId,
        scene: &mut dyn SceneGraph,
    ) -> Option<BallObject> {
        let frame = frame?;
        let impulse = self.launch_impulse(&frame.pose);

        let (spec, shape) = decoration::ball(frame.pose, self.ball_radius);
        scene.add_node(node, spec);
        scene.attach_dynamic_collider(node, shape);
        scene.apply_impulse(node, impulse);

        Some(BallObject {
            node,
            pose: frame.pose,
            impulse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Viewport;
    use crate::scene::SceneCommand;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Translation3, UnitQuaternion};
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    fn frame(pose: Isometry3<f64>) -> CameraFrame {
        CameraFrame {
            pose,
            viewport: Viewport {
                width: 800.0,
                height: 600.0,
                vertical_fov: 1.0,
            },
        }
    }

    #[test]
    fn identity_camera_throws_down_negative_z() {
        let launcher = ProjectileLauncher::default();
        let impulse = launcher.launch_impulse(&Isometry3::identity());
        assert_abs_diff_eq!(impulse, Vector3::new(0.0, 0.0, -5.0), epsilon = EPS);
    }

    #[test]
    fn impulse_ignores_position() {
        let launcher = ProjectileLauncher::default();
        let rotation = UnitQuaternion::from_euler_angles(0.3, -1.1, 0.7);
        let here = Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.0), rotation);
        let there = Isometry3::from_parts(Translation3::new(40.0, -3.0, 12.5), rotation);
        assert_abs_diff_eq!(
            launcher.launch_impulse(&here),
            launcher.launch_impulse(&there),
            epsilon = EPS
        );
        assert_abs_diff_eq!(launcher.launch_impulse(&here).norm(), 5.0, epsilon = EPS);
    }

    #[test]
    fn impulse_follows_camera_yaw() {
        let launcher = ProjectileLauncher::new(2.0, 0.25);
        // Turned a quarter to the left, the camera looks down world -X.
        let pose = Isometry3::rotation(Vector3::y() * FRAC_PI_2);
        assert_abs_diff_eq!(
            launcher.launch_impulse(&pose),
            Vector3::new(-2.0, 0.0, 0.0),
            epsilon = EPS
        );
    }

    #[test]
    fn launch_spawns_at_camera_with_one_impulse() {
        let launcher = ProjectileLauncher::default();
        let pose = Isometry3::translation(0.5, 1.5, 0.0);
        let mut scene: Vec<SceneCommand> = Vec::new();

        let ball = launcher
            .launch(Some(&frame(pose)), NodeId(9), &mut scene)
            .unwrap();
        assert_eq!(ball.pose, pose);
        assert_eq!(scene.len(), 3);
        assert!(matches!(&scene[0], SceneCommand::AddNode(NodeId(9), spec) if spec.pose == pose));
        assert_eq!(
            scene[1],
            SceneCommand::AttachDynamicCollider(
                NodeId(9),
                crate::scene::ColliderShape::Sphere { radius: 0.25 }
            )
        );
        assert_eq!(scene[2], SceneCommand::ApplyImpulse(NodeId(9), ball.impulse));
    }

    #[test]
    fn launch_without_frame_does_nothing() {
        let launcher = ProjectileLauncher::default();
        let mut scene: Vec<SceneCommand> = Vec::new();
        assert!(launcher.launch(None, NodeId(0), &mut scene).is_none());
        assert!(scene.is_empty());
    }
}
