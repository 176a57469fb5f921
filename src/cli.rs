//! Command-line options.

use crate::build_info::BUILD_VERSION;
use crate::config::GameConfig;
use crate::error::Result;
use crate::snake::CollisionPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Snake on a wrap-around grid, with a starfield behind it.
#[derive(Debug, Parser)]
#[command(name = "snake-arcade", version = BUILD_VERSION)]
pub struct Cli {
    /// JSON config file (default: ~/.snake-arcade/config.json if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Level width in cells
    #[arg(long)]
    pub width: Option<u16>,

    /// Level height in cells
    #[arg(long)]
    pub height: Option<u16>,

    /// Milliseconds between steps (clamped to 5..=1000)
    #[arg(long, value_name = "MS")]
    pub speed: Option<u64>,

    /// Seed for food placement and stars
    #[arg(long)]
    pub seed: Option<u64>,

    /// Self-collision rule
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,

    /// Hide the starfield
    #[arg(long)]
    pub no_stars: bool,

    /// Append tracing output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply flag overrides on top.
    pub fn resolve_config(&self) -> Result<GameConfig> {
        let base = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::load_default()?,
        };
        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(speed) = self.speed {
            config.cadence_ms = speed;
        }
        if let Some(collision) = self.collision {
            config.collision_policy = collision;
        }
        if self.no_stars {
            config.starfield.enabled = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "snake-arcade",
            "--width",
            "40",
            "--speed",
            "90",
            "--collision",
            "check-before-release",
            "--no-stars",
        ]);
        let config = cli.apply_overrides(GameConfig::default());
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 25);
        assert_eq!(config.cadence_ms, 90);
        assert_eq!(config.collision_policy, CollisionPolicy::CheckBeforeRelease);
        assert!(!config.starfield.enabled);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["snake-arcade"]);
        let config = cli.apply_overrides(GameConfig::default());
        assert_eq!(config, GameConfig::default());
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_oversized_level_flags_fail_validation() {
        let cli = Cli::parse_from(["snake-arcade", "--width", "50000", "--height", "50000"]);
        let config = cli.apply_overrides(GameConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_flag_matches_config_spelling() {
        for policy in [CollisionPolicy::ReleaseTailFirst, CollisionPolicy::CheckBeforeRelease] {
            let cli = Cli::parse_from(["snake-arcade", "--collision", policy.name()]);
            assert_eq!(cli.collision, Some(policy));
        }
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["snake-arcade", "--collision", "sideways"]).is_err());
    }
}
