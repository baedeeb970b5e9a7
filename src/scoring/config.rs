//! Match rule configuration.

use crate::scoring::Side;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Singles or doubles. Stored with the match; not used by the scoring rules.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchType {
    /// One player per side.
    #[default]
    Singles,
    /// Two players per side.
    Doubles,
}

/// Rules a match is scored under. Fixed for the lifetime of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Sets a side must win to take the match (2 = best of three).
    pub sets_to_win: u8,
    /// Points needed to win a tiebreak, with a two-point margin.
    pub tiebreak_points: u8,
    /// Whether the deciding set is also resolved by a tiebreak at games-all.
    pub final_set_tiebreak: bool,
    /// Whether a point at 40-40 decides the game outright.
    pub no_ad_scoring: bool,
    /// Games needed to win a set, with a two-game margin.
    #[serde(default = "default_games_per_set")]
    pub games_per_set: u8,
    /// Singles or doubles.
    #[serde(default)]
    pub match_type: MatchType,
    /// Team serving first in doubles.
    #[serde(default)]
    #[setters(strip_option)]
    pub first_server_team: Option<Side>,
}

fn default_games_per_set() -> u8 {
    6
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sets_to_win: 2,
            tiebreak_points: 7,
            final_set_tiebreak: true,
            no_ad_scoring: false,
            games_per_set: default_games_per_set(),
            match_type: MatchType::Singles,
            first_server_team: None,
        }
    }
}

impl MatchConfig {
    /// Best-of-five with standard tiebreaks.
    pub fn best_of_five() -> Self {
        Self::default().with_sets_to_win(3)
    }

    /// Returns true when this is a doubles match.
    pub fn is_doubles(&self) -> bool {
        self.match_type == MatchType::Doubles
    }

    /// Checks that every count is at least one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first field that is zero.
    #[instrument(skip(self), fields(sets_to_win = self.sets_to_win, tiebreak_points = self.tiebreak_points))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating match config");
        if self.sets_to_win == 0 {
            return Err(ConfigError::new("sets_to_win must be at least 1".to_string()));
        }
        if self.tiebreak_points == 0 {
            return Err(ConfigError::new(
                "tiebreak_points must be at least 1".to_string(),
            ));
        }
        if self.games_per_set == 0 {
            return Err(ConfigError::new(
                "games_per_set must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the config to the JSON form stored with each match.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize match config: {}", e)))
    }

    /// Parses a config from its stored JSON form.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::new(format!("Failed to parse match config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
