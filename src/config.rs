//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Environment variables: `FAMTREE_*` prefix
//!
//! The `--data-dir` CLI flag overrides all of these at the call site.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_WINDOW_DAYS;

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one TOML file per family (default: ~/.famtree)
    pub data_dir: PathBuf,
    /// Days separating "upcoming" from "later" alerts
    pub alert_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            alert_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not
/// specified" during layered merging).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    data_dir: Option<PathBuf>,
    alert_window_days: Option<i64>,
}

/// Get the default data directory (~/.famtree).
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".famtree"))
        .unwrap_or_else(|| PathBuf::from("~/.famtree"))
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Apply global config file if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Apply environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            alert_window_days: overlay.alert_window_days.unwrap_or(self.alert_window_days),
        }
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(Environment::with_prefix("FAMTREE"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_int("alert_window_days") {
            settings.alert_window_days = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# famtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/famtree/famtree.toml
#   Env:    FAMTREE_* environment variables (explicit overrides)

# Directory holding one TOML file per family
# data_dir = "~/.famtree"

# Days separating "upcoming" from "later" alerts
# alert_window_days = 7
"#
        .to_string()
    }
}

/// Expand environment variables and `~` in a path string.
///
/// Supports `$VAR`, `${VAR}`, and `~` via the shellexpand crate.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert!(!settings.data_dir.as_os_str().is_empty());
        assert!(settings.alert_window_days > 0);
    }

    #[test]
    fn given_tilde_in_data_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_dir: PathBuf::from("~/.famtree"),
            alert_window_days: 7,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let dir_str = settings.data_dir.to_string_lossy();
        assert!(
            dir_str.starts_with(&home),
            "data_dir should start with home dir: {}",
            dir_str
        );
        assert!(
            !dir_str.contains('~'),
            "data_dir should not contain tilde: {}",
            dir_str
        );
    }

    #[test]
    fn given_overlay_without_values_when_merging_then_keeps_base() {
        let base = Settings {
            data_dir: PathBuf::from("/data"),
            alert_window_days: 14,
        };

        let merged = base.merge_with(&RawSettings::default());

        assert_eq!(merged, base);
    }
}
