// hoopshot_core/src/config.rs

use serde::Deserialize;

use crate::error::SessionError;
use crate::types::{DetectionConfig, PlaneDetection};

/// Power applied to the negated camera forward axis when a ball is launched.
pub const DEFAULT_LAUNCH_POWER: f64 = 5.0;
pub const DEFAULT_BALL_RADIUS: f64 = 0.25;
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.25;

/// What happens to plane detection once the hoop is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PlayModeDetection {
    /// Keep detecting whatever classes were configured.
    KeepScanning,
    /// Narrow detection down to vertical planes only.
    VerticalOnly,
    /// Stop detecting new planes altogether.
    #[default]
    Stop,
}

/// # SessionConfig
/// Everything that tunes an `ArSession`. Usually the `[session]` table of a
/// scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct SessionConfig {
    /// Plane classes detected while searching, e.g. `["Vertical"]`.
    #[serde(default = "default_plane_detection")]
    pub plane_detection: PlaneDetection,
    /// Depth-based occlusion. Not interpreted here, only passed to the sensor.
    #[serde(default)]
    pub occlusion: bool,
    #[serde(default)]
    pub play_mode_detection: PlayModeDetection,
    /// Fade the hoop's plane overlay out once play starts.
    #[serde(default = "default_true")]
    pub hide_overlay_on_play: bool,
    #[serde(default = "default_launch_power")]
    pub launch_power: f64,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f64,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f32,
    /// Asset path of the hoop model, relative to the asset root.
    #[serde(default = "default_hoop_asset")]
    pub hoop_asset: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plane_detection: default_plane_detection(),
            occlusion: false,
            play_mode_detection: PlayModeDetection::default(),
            hide_overlay_on_play: true,
            launch_power: DEFAULT_LAUNCH_POWER,
            ball_radius: DEFAULT_BALL_RADIUS,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            hoop_asset: default_hoop_asset(),
        }
    }
}

impl SessionConfig {
    /// Checks the values a session cannot run without.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.plane_detection.vertical {
            return Err(SessionError::InvalidConfig(
                "plane_detection must include Vertical, the hoop can only go on walls".into(),
            ));
        }
        if !self.launch_power.is_finite() || self.launch_power <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "launch_power must be positive and finite, got {}",
                self.launch_power
            )));
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "ball_radius must be positive and finite, got {}",
                self.ball_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(SessionError::InvalidConfig(format!(
                "overlay_opacity must be within [0, 1], got {}",
                self.overlay_opacity
            )));
        }
        Ok(())
    }

    /// The detection request while searching for a wall.
    pub fn searching_detection(&self) -> DetectionConfig {
        DetectionConfig {
            planes: self.plane_detection,
            occlusion: self.occlusion,
        }
    }

    /// The detection request once the hoop is up.
    pub fn play_detection(&self) -> DetectionConfig {
        let planes = match self.play_mode_detection {
            PlayModeDetection::KeepScanning => self.plane_detection,
            PlayModeDetection::VerticalOnly => PlaneDetection::VERTICAL,
            PlayModeDetection::Stop => PlaneDetection::NONE,
        };
        DetectionConfig {
            planes,
            occlusion: self.occlusion,
        }
    }
}

fn default_plane_detection() -> PlaneDetection {
    PlaneDetection::VERTICAL
}

fn default_true() -> bool {
    true
}

fn default_launch_power() -> f64 {
    DEFAULT_LAUNCH_POWER
}
fn default_ball_radius() -> f64 {
    DEFAULT_BALL_RADIUS
}
fn default_overlay_opacity() -> f32 {
    DEFAULT_OVERLAY_OPACITY
}

fn default_hoop_asset() -> String {
    "models/hoop.glb".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_detection_without_vertical() {
        let config = SessionConfig {
            plane_detection: PlaneDetection {
                vertical: false,
                horizontal: true,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_positive_power() {
        let config = SessionConfig {
            launch_power: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            launch_power: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn play_detection_follows_policy() {
        let mut config = SessionConfig {
            plane_detection: PlaneDetection::VERTICAL_AND_HORIZONTAL,
            occlusion: true,
            ..Default::default()
        };

        config.play_mode_detection = PlayModeDetection::KeepScanning;
        assert_eq!(
            config.play_detection().planes,
            PlaneDetection::VERTICAL_AND_HORIZONTAL
        );

        config.play_mode_detection = PlayModeDetection::VerticalOnly;
        assert_eq!(config.play_detection().planes, PlaneDetection::VERTICAL);

        config.play_mode_detection = PlayModeDetection::Stop;
        assert!(config.play_detection().planes.is_empty());
        // Occlusion is passed through in every phase.
        assert!(config.play_detection().occlusion);
    }
}
