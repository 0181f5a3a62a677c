//! # Pager Configuration
//!
//! [PagerConfig] holds the style metrics and behaviour switches of a pager.
//! It can be built programmatically, loaded from TOML, or taken from the
//! environment.
//!
//! ## Environment Variables
//!
//! - `NPAGER_CONFIG`: Path to a TOML configuration file
//! - `NPAGER_TRANSITION_MS`: Transition duration in milliseconds
//! - `NPAGER_LIFECYCLE`: Lifecycle propagation (`true`/`false`/`1`/`0`)
//!
//! ## Configuration File Format
//!
//! ```toml
//! [pager]
//! tab_strip_height = 44.0
//! indicator_height = 2.0
//! transition_duration_ms = 300
//! easing = "ease-in-out"
//! lifecycle_propagation = true
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use crate::animation::Easing;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default height of the tab strip.
pub const DEFAULT_TAB_STRIP_HEIGHT: f64 = 44.0;
/// Default height of the indicator bar.
pub const DEFAULT_INDICATOR_HEIGHT: f64 = 2.0;
/// Default duration of an animated page change.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Pager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Preferred tab strip height. Reported as 0 while the pager has at most one page.
    pub tab_strip_height: f64,
    /// Preferred indicator height. Reported as 0 while the pager has at most one page.
    pub indicator_height: f64,
    /// Duration of animated page changes in milliseconds.
    pub transition_duration_ms: u64,
    /// Easing of animated page changes.
    pub easing: Easing,
    /// Whether pages receive appearance and attach/detach callbacks on page changes.
    pub lifecycle_propagation: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            tab_strip_height: DEFAULT_TAB_STRIP_HEIGHT,
            indicator_height: DEFAULT_INDICATOR_HEIGHT,
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::default(),
            lifecycle_propagation: true,
        }
    }
}

/// Partial configuration, as read from a file. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PagerOverrides {
    /// See [PagerConfig::tab_strip_height].
    pub tab_strip_height: Option<f64>,
    /// See [PagerConfig::indicator_height].
    pub indicator_height: Option<f64>,
    /// See [PagerConfig::transition_duration_ms].
    pub transition_duration_ms: Option<u64>,
    /// See [PagerConfig::easing].
    pub easing: Option<Easing>,
    /// See [PagerConfig::lifecycle_propagation].
    pub lifecycle_propagation: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pager: PagerOverrides,
}

impl PagerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(path) = lookup("NPAGER_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Failed to load pager config {:?}: {}", path, e),
            }
        }

        if let Some(ms) = lookup("NPAGER_TRANSITION_MS") {
            match ms.trim().parse::<u64>() {
                Ok(ms) => config.transition_duration_ms = ms,
                Err(e) => log::warn!("Ignoring NPAGER_TRANSITION_MS={:?}: {}", ms, e),
            }
        }

        if let Some(flag) = lookup("NPAGER_LIFECYCLE") {
            match parse_flag(&flag) {
                Some(enabled) => config.lifecycle_propagation = enabled,
                None => log::warn!("Ignoring NPAGER_LIFECYCLE={:?}: expected a boolean", flag),
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { details, .. } => ConfigError::parse_error(Some(path.to_path_buf()), details),
            other => other,
        })
    }

    /// Load a configuration from TOML content.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Self::parse(content)
    }

    fn parse(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::parse_error(None, e.to_string()))?;
        let mut config = Self::new();
        config.merge(file.pager);
        config.validate()?;
        Ok(config)
    }

    /// Apply every value present in `overrides`.
    pub fn merge(&mut self, overrides: PagerOverrides) {
        if let Some(height) = overrides.tab_strip_height {
            self.tab_strip_height = height;
        }
        if let Some(height) = overrides.indicator_height {
            self.indicator_height = height;
        }
        if let Some(ms) = overrides.transition_duration_ms {
            self.transition_duration_ms = ms;
        }
        if let Some(easing) = overrides.easing {
            self.easing = easing;
        }
        if let Some(enabled) = overrides.lifecycle_propagation {
            self.lifecycle_propagation = enabled;
        }
    }

    /// Check that all metrics are finite and non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        check_metric("tab_strip_height", self.tab_strip_height)?;
        check_metric("indicator_height", self.indicator_height)?;
        if self.indicator_height > self.tab_strip_height {
            return Err(ConfigError::invalid(
                "indicator_height",
                format!("{} exceeds tab_strip_height {}", self.indicator_height, self.tab_strip_height),
            ));
        }
        Ok(())
    }

    /// Set the preferred tab strip height.
    pub fn with_tab_strip_height(mut self, height: f64) -> Self {
        self.tab_strip_height = height;
        self
    }

    /// Set the preferred indicator height.
    pub fn with_indicator_height(mut self, height: f64) -> Self {
        self.indicator_height = height;
        self
    }

    /// Set the transition duration.
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the transition easing.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Enable or disable lifecycle propagation.
    pub fn with_lifecycle_propagation(mut self, enabled: bool) -> Self {
        self.lifecycle_propagation = enabled;
        self
    }

    /// Get the transition duration.
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

fn check_metric(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() {
        Err(ConfigError::invalid(field, "must be finite"))
    } else if value < 0.0 {
        Err(ConfigError::invalid(field, "must not be negative"))
    } else {
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_toml_partial() {
        let config = PagerConfig::from_toml(
            r#"
[pager]
tab_strip_height = 48.0
easing = "linear"
"#,
        )
        .unwrap();

        assert_eq!(config.tab_strip_height, 48.0);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.indicator_height, DEFAULT_INDICATOR_HEIGHT);
        assert!(config.lifecycle_propagation);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(PagerConfig::from_toml("").unwrap(), PagerConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_negative_height() {
        let err = PagerConfig::from_toml("[pager]\ntab_strip_height = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tab_strip_height", .. }));
    }

    #[test]
    fn test_from_toml_reports_syntax_errors() {
        let err = PagerConfig::from_toml("[pager\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("NPAGER_TRANSITION_MS", "120"), ("NPAGER_LIFECYCLE", "off")]);
        let config = PagerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.transition_duration(), Duration::from_millis(120));
        assert!(!config.lifecycle_propagation);
    }

    #[test]
    fn test_transition_duration_saturates() {
        let config = PagerConfig::new().with_transition_duration(Duration::MAX);
        assert_eq!(config.transition_duration_ms, u64::MAX);

        let config = config.with_transition_duration(Duration::from_millis(250));
        assert_eq!(config.transition_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_env_ignores_garbage() {
        let config = PagerConfig::from_lookup(|key| match key {
            "NPAGER_TRANSITION_MS" => Some("soon".to_string()),
            "NPAGER_LIFECYCLE" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, PagerConfig::default());
    }
}
