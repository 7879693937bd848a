use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://api.tvmaze.com";
pub const DEFAULT_LIST_LIMIT: usize = 24;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Presentation limits for the summary cards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardLimits {
    pub genre_badges: usize,
    pub summary_chars: usize,
    pub title_chars: usize,
}

impl Default for CardLimits {
    fn default() -> Self {
        Self {
            genre_badges: 2,
            summary_chars: 110,
            title_chars: 36,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub api_base_url: String,
    pub list_limit: usize,
    pub log_level: String,
    pub card: CardLimits,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            list_limit: DEFAULT_LIST_LIMIT,
            log_level: String::from("info"),
            card: CardLimits::default(),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("movie-explorer")
                .join("config.json")
        })
    }

    /// Reads the config file if there is one. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, SettingsError> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&content)
            .map(Some)
            .map_err(|source| SettingsError::Parse { path, source })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(content).map(Self::normalized)
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            String::from(DEFAULT_API_BASE_URL)
        } else {
            trimmed.to_string()
        };
        if self.log_level.trim().is_empty() {
            self.log_level = String::from("info");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_base_url, "https://api.tvmaze.com");
        assert_eq!(settings.list_limit, 24);
        assert_eq!(settings.card.genre_badges, 2);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings = AppSettings::from_json(r#"{"card": {"summary_chars": 80}}"#).unwrap();
        assert_eq!(settings.list_limit, 24);
        assert_eq!(settings.card.summary_chars, 80);
        assert_eq!(settings.card.genre_badges, 2);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let settings =
            AppSettings::from_json(r#"{"api_base_url": "http://localhost:8080/ "}"#).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:8080");

        let settings = AppSettings::from_json(r#"{"api_base_url": "  "}"#).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(AppSettings::from_json("{ not json").is_err());
    }
}
