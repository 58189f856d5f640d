//! Application configuration loaded from TOML, with environment overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DATABASE_URL_ENV: &str = "MATJIP_DATABASE_URL";
pub const LOG_FILTER_ENV: &str = "MATJIP_LOG";
pub const DEFAULT_LOG_FILTER: &str = "matjip=info,report_service=info,database=info";

/// Tunables for the consensus analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Characters kept on each side of a menu keyword.
    pub menu_window: usize,
    /// Characters kept on each side of a personal-preference keyword.
    pub preference_window: usize,
    /// Batches with fewer posts than this get a low-sample warning.
    pub min_posts: usize,
    /// How many reviewed posts contribute evaluation-criteria points.
    pub criteria_posts: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            menu_window: 50,
            preference_window: 30,
            min_posts: 3,
            criteria_posts: 2,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("analysis.menu_window", self.menu_window),
            ("analysis.preference_window", self.preference_window),
            ("analysis.min_posts", self.min_posts),
            ("analysis.criteria_posts", self.criteria_posts),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub log_filter: String,
    pub analysis: AnalysisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.database_url {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "database_url".to_string(),
                    value: url.clone(),
                });
            }
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidFormat {
                details: "log_filter must not be empty".to_string(),
            });
        }
        self.analysis.validate()
    }

    /// Overlay `MATJIP_DATABASE_URL` and `MATJIP_LOG` when they are set.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(url) = non_empty_env(DATABASE_URL_ENV) {
            self.database_url = Some(url);
        }
        if let Some(filter) = non_empty_env(LOG_FILTER_ENV) {
            self.log_filter = filter;
        }
        self
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvironmentVariable {
                var_name: DATABASE_URL_ENV.to_string(),
            })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
