// hoopshot_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Hoopshot: place a basketball hoop on a detected wall and shoot at it.
///
/// This struct defines the command-line arguments accepted by any binary
/// built on the hoopshot simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/living_room.toml")]
    pub scenario: PathBuf,

    /// Run without a window. Taps then only come from `[[taps]]`.
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Overrides `[simulation].seed` for the simulated tracker's noise.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let cli = Cli::parse_from(["hoopshot"]);
        assert_eq!(cli.scenario, PathBuf::from("assets/scenarios/living_room.toml"));
        assert!(!cli.headless);
        assert_eq!(cli.seed, None);

        let cli = Cli::parse_from(["hoopshot", "-s", "other.toml", "--headless", "--seed", "9"]);
        assert_eq!(cli.scenario, PathBuf::from("other.toml"));
        assert!(cli.headless);
        assert_eq!(cli.seed, Some(9));
    }
}
