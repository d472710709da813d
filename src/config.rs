use crate::constants::{DEFAULT_FETCH_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECONDS, REGULAR_SEASON};
use crate::error::{FirstPitchError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub start_date: NaiveDate,
    /// Defaults to today when omitted.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_game_types")]
    pub game_types: Vec<String>,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_backoff")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_FETCH_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// A pitcher to report on. `name` doubles as the output file prefix; `id`
/// skips the name lookup when already known.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectConfig {
    pub name: String,
    #[serde(default)]
    pub id: Option<u64>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_game_types() -> Vec<String> {
    vec![REGULAR_SEASON.to_string()]
}

fn default_attempts() -> u32 {
    DEFAULT_FETCH_ATTEMPTS
}

fn default_backoff() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FirstPitchError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.attempts == 0 {
            return Err(FirstPitchError::Config("fetch.attempts must be at least 1".into()));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(FirstPitchError::Config(format!(
                    "end_date {} is before start_date {}",
                    end, self.start_date
                )));
            }
        }
        Ok(())
    }

    pub fn end_date_or_today(&self) -> NaiveDate {
        self.end_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            start_date = "2025-03-01"

            [[subjects]]
            name = "Zack_Wheeler"
            id = 554430
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.game_types, vec!["R".to_string()]);
        assert_eq!(config.fetch.attempts, 2);
        assert_eq!(config.subjects.len(), 1);
        assert_eq!(config.subjects[0].id, Some(554430));
        assert!(config.end_date.is_none());
    }

    #[test]
    fn test_subject_without_id() {
        let config = Config::from_toml(
            r#"
            start_date = "2025-03-01"
            end_date = "2025-09-30"

            [[subjects]]
            name = "Aaron Nola"
            "#,
        )
        .unwrap();

        assert_eq!(config.subjects[0].id, None);
        assert_eq!(config.end_date_or_today().to_string(), "2025-09-30");
    }

    #[test]
    fn test_rejects_inverted_date_range() {
        let err = Config::from_toml(
            r#"
            start_date = "2025-09-01"
            end_date = "2025-03-01"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FirstPitchError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let err = Config::from_toml(
            r#"
            start_date = "2025-03-01"
            [fetch]
            attempts = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FirstPitchError::Config(_)));
    }
}
