//! Configuration for the dial and its hooks.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Full-scale range of the dial, in minutes.
    pub dial_minutes: u64,
    /// Remaining time the dial starts at, in minutes.
    pub default_minutes: u64,
    pub tick_interval_ms: u64,
    /// Ring the terminal bell on boundary hits.
    pub bell: bool,
    pub hooks: Hooks,
}

/// Shell commands run on timer events. Entries starting with `#` are disabled.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Hooks {
    pub start: Option<String>,
    pub pause: Option<String>,
    pub complete: Option<String>,
    pub boundary: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dial_minutes: 60,
            default_minutes: 25,
            tick_interval_ms: 1000,
            bell: true,
            hooks: Hooks::default(),
        }
    }
}

impl Config {
    /// Defaults written to a fresh config file, with example hooks commented out.
    pub fn template() -> Self {
        Self {
            hooks: Hooks {
                start: Some("# afplay ~/music/focus.mp3 &".to_string()),
                pause: Some("# pkill afplay".to_string()),
                complete: Some("# pkill afplay".to_string()),
                boundary: None,
            },
            ..Self::default()
        }
    }

    pub fn total(&self) -> Duration {
        Duration::from_secs(self.dial_minutes.saturating_mul(60))
    }

    pub fn default_remaining(&self) -> Duration {
        Duration::from_secs(self.default_minutes.saturating_mul(60))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dial_minutes == 0 {
            return Err(Error::InvalidConfig("dial_minutes must be greater than 0".to_string()));
        }
        if self.dial_minutes.checked_mul(60).is_none() {
            return Err(Error::InvalidConfig("dial_minutes is too large".to_string()));
        }
        if self.default_minutes.checked_mul(60).is_none() {
            return Err(Error::InvalidConfig("default_minutes is too large".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Strict load: any I/O or format problem is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|source| Error::ConfigFormat {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, creating it from the template when it does not exist.
    ///
    /// Unreadable or malformed files fall back to defaults with a warning;
    /// only semantically invalid values are an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config not found, writing template");
            let config = Self::template();
            if let Err(error) = config.save(path) {
                warn!(%error, "could not write default config");
            }
            return Ok(config);
        }

        match Self::from_file(path) {
            Ok(config) => Ok(config),
            Err(error @ Error::InvalidConfig(_)) => Err(error),
            Err(error) => {
                warn!(%error, "using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_error)
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".config").join("pomo").join("config.json")
    } else {
        PathBuf::from("pomo-config.json")
    }
}
