//! Command-line interface for tennis_scorer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tennis_scorer::{MatchConfig, MatchType};

/// Tennis Scorer - point-by-point match scoring with undo and sync
#[derive(Parser, Debug)]
#[command(name = "tennis_scorer")]
#[command(about = "Score tennis matches from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Rule overrides for a new match
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Sets needed to win (2 = best of three)
    #[arg(long)]
    pub sets_to_win: Option<u8>,

    /// Points needed to win a tiebreak
    #[arg(long)]
    pub tiebreak_points: Option<u8>,

    /// Play the deciding set out to a two-game margin
    #[arg(long)]
    pub no_final_set_tiebreak: bool,

    /// Deciding point at 40-40
    #[arg(long)]
    pub no_ad: bool,

    /// Record the match as doubles
    #[arg(long)]
    pub doubles: bool,
}

impl RuleArgs {
    /// Applies the overrides on top of `base`.
    pub fn apply(&self, base: &MatchConfig) -> MatchConfig {
        let mut rules = base.clone();
        if let Some(sets) = self.sets_to_win {
            rules.sets_to_win = sets;
        }
        if let Some(points) = self.tiebreak_points {
            rules.tiebreak_points = points;
        }
        if self.no_final_set_tiebreak {
            rules.final_set_tiebreak = false;
        }
        if self.no_ad {
            rules.no_ad_scoring = true;
        }
        if self.doubles {
            rules.match_type = MatchType::Doubles;
        }
        rules
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a match interactively from stdin
    Play {
        /// Rule overrides
        #[command(flatten)]
        rules: RuleArgs,

        /// Do not save the match when it ends
        #[arg(long)]
        no_save: bool,
    },

    /// List stored matches, or analyze one
    History {
        /// Match id to analyze
        #[arg(long)]
        id: Option<String>,
    },

    /// Log in to the sync API
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "TENNIS_SCORER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Create the account first
        #[arg(long)]
        register: bool,
    },

    /// Forget stored API tokens
    Logout,

    /// Upload unsynced matches
    Sync,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_rules() {
        let cli = Cli::parse_from(["tennis_scorer", "play", "--sets-to-win", "3", "--no-ad"]);
        match cli.command {
            Command::Play { rules, no_save } => {
                assert!(!no_save);
                let config = rules.apply(&MatchConfig::default());
                assert_eq!(config.sets_to_win, 3);
                assert!(config.no_ad_scoring);
                assert!(config.final_set_tiebreak);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["tennis_scorer", "sync", "--config", "scorer.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("scorer.toml")));
        assert!(matches!(cli.command, Command::Sync));
    }
}
