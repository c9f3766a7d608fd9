// hoopshot_sim/src/simulation/utils/serde_helpers.rs

//! `#[serde(with = ...)]` adapters so scenario files can stay in plain arrays.

pub mod vec3_f64_from_f32_array {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f32; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::new(arr[0] as f64, arr[1] as f64, arr[2] as f64))
    }
}

pub mod vec2_f64_from_f32_array {
    use nalgebra::Vector2;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector2<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y]: [f32; 2] = Deserialize::deserialize(deserializer)?;
        Ok(Vector2::new(x as f64, y as f64))
    }
}

pub mod point2_f64_from_f32_array {
    use nalgebra::Point2;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Point2<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y]: [f32; 2] = Deserialize::deserialize(deserializer)?;
        Ok(Point2::new(x as f64, y as f64))
    }
}

/// Roll, pitch, yaw in degrees, about X, Y and Z respectively.
pub mod quat_f64_from_euler_deg_f32 {
    use nalgebra::UnitQuaternion;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<UnitQuaternion<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f32; 3] = Deserialize::deserialize(deserializer)?;
        Ok(UnitQuaternion::from_euler_angles(
            (arr[0] as f64).to_radians(), // Roll
            (arr[1] as f64).to_radians(), // Pitch
            (arr[2] as f64).to_radians(), // Yaw
        ))
    }
}
