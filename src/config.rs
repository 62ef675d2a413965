//! TOML settings for the pager and the period rules.
//!
//! ```toml
//! [pager]
//! left_current = 2
//! right_current = 3
//! per_page = 10
//!
//! [periods]
//! reject_duplicate_names = true
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LEFT_CURRENT, DEFAULT_PER_PAGE, DEFAULT_RIGHT_CURRENT, PageWindow, PeriodRules, PeriodValidator};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub left_current:  u32,
    pub right_current: u32,
    pub per_page:      u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            left_current:  DEFAULT_LEFT_CURRENT,
            right_current: DEFAULT_RIGHT_CURRENT,
            per_page:      DEFAULT_PER_PAGE,
        }
    }
}

impl PagerConfig {
    pub const fn window(&self) -> PageWindow {
        PageWindow::new(self.left_current, self.right_current)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pager:   PagerConfig,
    pub periods: PeriodRules,
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Invalid` when `per_page` is 0.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`Settings::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading settings");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validator configured with these period rules.
    pub const fn validator(&self) -> PeriodValidator {
        PeriodValidator::new(self.periods)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pager.per_page == 0 {
            return Err(ConfigError::Invalid("pager.per_page must be at least 1".to_owned()));
        }
        Ok(())
    }
}
