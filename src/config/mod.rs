//! Engine configuration.
//!
//! The configuration surface is deliberately small: where icons live, and
//! whether failures swallowed by the controls are written to the log.
//! Everything is serializable to/from TOML.

mod loading;
mod log_level;

#[cfg(test)]
mod tests;

pub use log_level::LogLevel;

use serde::{Deserialize, Serialize};

/// Default location of icon assets, used when no base path is configured.
pub const DEFAULT_ICON_BASE_PATH: &str = "/assets/icons/";

/// Configuration for a controlbar engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path prefix prepended to every icon name when resolving assets.
    pub icon_base_path: String,

    /// Emit log lines for swallowed failures (asset loads, platform
    /// rejections, click handlers).
    pub log: bool,

    /// Verbosity used when the engine installs its own tracing subscriber.
    pub log_level: LogLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            icon_base_path: DEFAULT_ICON_BASE_PATH.to_string(),
            log: false,
            log_level: LogLevel::default(),
        }
    }
}

impl EngineConfig {
    /// Returns a copy with the icon base path replaced.
    pub fn with_icon_base_path(mut self, path: impl Into<String>) -> Self {
        self.icon_base_path = path.into();
        self.normalize();
        self
    }

    /// Returns a copy with diagnostic logging switched on or off.
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Ensures the icon base path ends with a separator so names can be
    /// appended directly.
    pub(crate) fn normalize(&mut self) {
        if !self.icon_base_path.is_empty() && !self.icon_base_path.ends_with('/') {
            self.icon_base_path.push('/');
        }
    }
}
