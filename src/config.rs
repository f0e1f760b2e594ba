/// Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::compute::RuleOptions;
use crate::error::{GameError, Result};

#[derive(Parser, Debug, Clone)]
#[command(name = "ship_duel", about = "Two-ship arcade duel in the terminal")]
pub struct Config {
    /// Frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for the enemy AI; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop shots that have left the screen
    #[arg(long)]
    pub cull_offscreen: bool,

    /// Surface units covered by one terminal column
    #[arg(long, default_value_t = 10)]
    pub cell_width: i32,

    /// Surface units covered by one terminal row
    #[arg(long, default_value_t = 20)]
    pub cell_height: i32,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "ship_duel=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(GameError::Config("fps must be at least 1".into()));
        }
        if self.cell_width <= 0 || self.cell_height <= 0 {
            return Err(GameError::Config(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            cull_offscreen: self.cull_offscreen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["ship_duel"]);
        assert_eq!(cfg.fps, 60);
        assert_eq!(cfg.seed, None);
        assert!(!cfg.cull_offscreen);
        assert_eq!((cfg.cell_width, cfg.cell_height), (10, 20));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_fps() {
        let cfg = Config::parse_from(["ship_duel", "--fps", "0"]);
        assert!(matches!(cfg.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_cells() {
        let cfg = Config::parse_from(["ship_duel", "--cell-width", "0"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn cull_flag_reaches_rules() {
        let cfg = Config::parse_from(["ship_duel", "--cull-offscreen", "--seed", "7"]);
        assert!(cfg.rule_options().cull_offscreen);
        assert_eq!(cfg.seed, Some(7));
    }
}
