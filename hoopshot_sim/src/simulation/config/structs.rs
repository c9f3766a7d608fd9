// hoopshot_sim/src/simulation/config/structs.rs

use bevy::prelude::{Resource, Transform};
use hoopshot_core::prelude::{PlaneAlignment, SessionConfig};
use nalgebra::{Isometry3, Point2, Translation3, UnitQuaternion, Vector2, Vector3};
use serde::Deserialize;

use crate::simulation::core::transforms::nalgebra_isometry_to_bevy_transform;
use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a run.
/// This struct is the root of the data parsed from a scenario TOML file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    /// The core session settings, passed to `ArSession` untouched.
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub sensor: SensorConfig,

    // The TOML has `[[planes]]`, which becomes a Vec of ScriptedPlane structs.
    #[serde(default)]
    pub planes: Vec<ScriptedPlane>,

    /// Anchors that are not planes. The session must ignore them.
    #[serde(default)]
    pub feature_points: Vec<ScriptedFeaturePoint>,

    /// Taps fired on a timer, for headless runs and demos.
    #[serde(default)]
    pub taps: Vec<ScriptedTap>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Stop the app after this many seconds. Runs forever if absent.
    pub duration_seconds: Option<f32>,
    /// Global gravity vector in m/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: None,
            gravity: default_gravity(),
        }
    }
}

fn default_gravity() -> [f32; 3] {
    [0.0, -9.81, 0.0]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    #[serde(default = "default_camera_pose")]
    pub starting_pose: Pose,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov_deg")]
    pub vertical_fov_deg: f32,
    /// Viewport size in logical pixels, used when there is no window.
    #[serde(default = "default_viewport")]
    pub viewport: [f32; 2],
    /// Walking speed of the keyboard rig, in m/s.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Turning speed of the keyboard rig, in deg/s.
    #[serde(default = "default_turn_rate_deg")]
    pub turn_rate_deg: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            starting_pose: default_camera_pose(),
            vertical_fov_deg: default_fov_deg(),
            viewport: default_viewport(),
            move_speed: default_move_speed(),
            turn_rate_deg: default_turn_rate_deg(),
        }
    }
}

fn default_camera_pose() -> Pose {
    Pose {
        translation: Vector3::new(0.0, 1.5, 0.0),
        rotation: UnitQuaternion::identity(),
    }
}
fn default_fov_deg() -> f32 {
    60.0
}
fn default_viewport() -> [f32; 2] {
    [1280.0, 720.0]
}
fn default_move_speed() -> f32 {
    1.5
}
fn default_turn_rate_deg() -> f32 {
    60.0
}

/// Behaviour of the simulated plane-detection pipeline.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    /// Update events per second for every tracked plane.
    #[serde(default = "default_update_rate")]
    pub update_rate: f32,
    /// Seconds a plane takes to grow from its initial to its final extent.
    #[serde(default = "default_growth_time")]
    pub growth_time: f32,
    /// Gaussian jitter on the extent while a plane is still growing, in meters.
    #[serde(default = "default_extent_noise")]
    pub extent_noise_stddev: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            update_rate: default_update_rate(),
            growth_time: default_growth_time(),
            extent_noise_stddev: default_extent_noise(),
        }
    }
}

fn default_update_rate() -> f32 {
    10.0
}
fn default_growth_time() -> f32 {
    3.0
}
fn default_extent_noise() -> f32 {
    0.02
}

/// A real-world plane the simulated sensor will "discover".
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScriptedPlane {
    pub name: String,
    pub alignment: PlaneAlignment,
    /// World pose of the plane. Local +Y is its normal.
    pub pose: Pose,
    #[serde(with = "serde_helpers::vec2_f64_from_f32_array")]
    pub initial_extent: Vector2<f64>,
    #[serde(with = "serde_helpers::vec2_f64_from_f32_array")]
    pub final_extent: Vector2<f64>,
    /// Seconds after start-up at which the plane is first detected.
    #[serde(default)]
    pub appear_at: f32,
    /// Seconds after start-up at which tracking is lost for good.
    pub remove_at: Option<f32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScriptedFeaturePoint {
    pub name: String,
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array")]
    pub translation: Vector3<f64>,
    #[serde(default)]
    pub appear_at: f32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScriptedTap {
    /// Seconds after start-up.
    pub at: f32,
    /// Screen point in logical pixels, origin top-left.
    #[serde(with = "serde_helpers::point2_f64_from_f32_array")]
    pub point: Point2<f64>,
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Pose {
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array", default)]
    pub translation: Vector3<f64>,

    #[serde(with = "serde_helpers::quat_f64_from_euler_deg_f32", default)]
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    pub fn to_bevy_transform(&self) -> Transform {
        nalgebra_isometry_to_bevy_transform(&self.to_isometry())
    }
}
