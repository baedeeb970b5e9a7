//! Application configuration.

use crate::scoring::{ConfigError, MatchConfig};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`AppConfig::api_base_url`].
pub const API_URL_ENV: &str = "TENNIS_SCORER_API_URL";
/// Environment variable overriding [`AppConfig::database_path`].
pub const DATABASE_ENV: &str = "TENNIS_SCORER_DB";

/// Settings for the command-line scorer.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the sync API.
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    /// SQLite database file for completed matches.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// TOML file holding API tokens.
    #[serde(default = "default_credentials_path")]
    credentials_path: PathBuf,

    /// Rules for new matches.
    #[serde(default, rename = "match")]
    match_rules: MatchConfig,
}

fn default_api_base_url() -> String {
    "https://tennis-scorer-api.shuttle.app/api".to_string()
}

fn default_database_path() -> String {
    "tennis_scorer.db".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("tennis_scorer_credentials.toml")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            database_path: default_database_path(),
            credentials_path: default_credentials_path(),
            match_rules: MatchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or the
    /// match rules are invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(database = %config.database_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid or the match rules are invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.match_rules.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise defaults, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file cannot be loaded.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides looked up by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            debug!(url = %url, "API URL overridden from environment");
            self.api_base_url = url;
        }
        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.is_empty()) {
            debug!(path = %path, "Database path overridden from environment");
            self.database_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").expect("Parse failed");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_match_table() {
        let toml = r#"
            database_path = "/tmp/matches.db"

            [match]
            sets_to_win = 3
            tiebreak_points = 10
            final_set_tiebreak = false
            no_ad_scoring = true
            match_type = "doubles"
        "#;
        let config = AppConfig::from_toml(toml).expect("Parse failed");
        assert_eq!(config.database_path(), "/tmp/matches.db");
        assert_eq!(config.match_rules().sets_to_win, 3);
        assert!(config.match_rules().is_doubles());
        assert_eq!(config.match_rules().games_per_set, 6);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let toml = r#"
            [match]
            sets_to_win = 0
            tiebreak_points = 7
            final_set_tiebreak = true
            no_ad_scoring = false
        "#;
        assert!(AppConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(|key| match key {
            API_URL_ENV => Some("http://localhost:9000".to_string()),
            DATABASE_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_base_url(), "http://localhost:9000");
        assert_eq!(config.database_path(), "tennis_scorer.db");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = AppConfig::from_file(dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
