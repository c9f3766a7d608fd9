// hoopshot_sim/src/simulation/config/mod.rs

//! This module handles loading the scenario configuration from disk.

pub mod structs;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};

// Re-export public types
pub use structs::ScenarioConfig;

/// Loads a scenario file. `HOOPSHOT_`-prefixed environment variables override
/// single keys, with `__` between table and key (`HOOPSHOT_SESSION__LAUNCH_POWER=7`).
pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, figment::Error> {
    scenario_figment(path).extract()
}

fn scenario_figment(path: impl AsRef<Path>) -> Figment {
    Figment::new()
        .merge(Toml::file(path.as_ref()))
        .merge(Env::prefixed("HOOPSHOT_").split("__"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_overrides_from_the_environment() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "scenario.toml",
                r#"
                [session]
                launch_power = 4.0

                [[planes]]
                name = "wall"
                alignment = "Vertical"
                pose = { translation = [0.0, 1.5, -2.0], rotation = [90.0, 0.0, 0.0] }
                initial_extent = [0.5, 0.5]
                final_extent = [2.0, 2.0]
                "#,
            )?;
            jail.set_env("HOOPSHOT_SESSION__BALL_RADIUS", "0.12");

            let config = load_scenario("scenario.toml")?;
            assert_eq!(config.session.launch_power, 4.0);
            assert_eq!(config.session.ball_radius, 0.12);
            assert_eq!(config.planes.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_| {
            let config = load_scenario("does_not_exist.toml")?;
            assert!(config.planes.is_empty());
            Ok(())
        });
    }
}
