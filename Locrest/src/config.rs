//! User configuration (`config.toml`)
//!
//! Optional defaults read from `<config dir>/Locrest/config.toml`, or from the
//! file named by `LOCREST_CONFIG`. Every field is optional:
//!
//! ```toml
//! [defaults]
//! variables = true
//! normalize_newlines = true
//! escape_newlines = true
//!
//! [u4pak]
//! path = "/opt/u4pak/u4pak"
//! assume_yes = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::archive::U4pakSource;
use crate::error::{Error, Result};
use crate::translation::TranslationOptions;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "LOCREST_CONFIG";

/// Persisted defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flags applied to every decode/encode
    pub defaults: TranslationDefaults,
    /// Where u4pak comes from
    pub u4pak: U4pakConfig,
}

/// Default decode/encode flags; command-line flags can only turn them on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslationDefaults {
    pub variables: bool,
    pub normalize_newlines: bool,
    pub escape_newlines: bool,
}

/// u4pak settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct U4pakConfig {
    /// Local executable; skips the download entirely
    pub path: Option<PathBuf>,
    /// Alternative release zip URL
    pub url: Option<String>,
    /// Skip the download confirmation prompt
    pub assume_yes: bool,
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|p| p.join("Locrest").join("config.toml")))
    }

    /// Load config from the default location, or return defaults
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`; a missing file yields defaults
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let config_err = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let config = toml::from_str(&content).map_err(|e| config_err(e.to_string()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Combine the configured defaults with command-line flags
    ///
    /// `Some` is an explicit flag (`--x` or `--no-x`) and wins over the
    /// configured default; `None` falls back to it.
    #[must_use]
    pub fn translation_options(
        &self,
        variables: Option<bool>,
        normalize_newlines: Option<bool>,
        escape_newlines: Option<bool>,
    ) -> TranslationOptions {
        TranslationOptions::new()
            .with_variables(variables.unwrap_or(self.defaults.variables))
            .with_normalize_newlines(normalize_newlines.unwrap_or(self.defaults.normalize_newlines))
            .with_escape_newlines(escape_newlines.unwrap_or(self.defaults.escape_newlines))
    }

    /// Resolve the u4pak source; an explicit path wins over the config
    #[must_use]
    pub fn u4pak_source(&self, explicit_path: Option<&Path>) -> U4pakSource {
        if let Some(path) = explicit_path.or(self.u4pak.path.as_deref()) {
            return U4pakSource::Path(path.to_path_buf());
        }
        match &self.u4pak.url {
            Some(url) => U4pakSource::Download { url: url.clone() },
            None => U4pakSource::default(),
        }
    }
}
