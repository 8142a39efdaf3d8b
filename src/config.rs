//! Configuration loading for MargaNav

use crate::error::{MargaError, Result};
use crate::grid::Cell;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct MargaConfig {
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Optional target cell; the CLI `--target` flag overrides it
    #[serde(default)]
    pub target: Option<TargetConfig>,
}

/// Driver loop settings
#[derive(Clone, Debug, Deserialize)]
pub struct DriverConfig {
    /// Pause between protocol turns in milliseconds (default: 100)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Navigation settings
#[derive(Clone, Debug, Deserialize)]
pub struct NavigationConfig {
    /// Maximum confirmed steps before giving up (default: 2000)
    #[serde(default = "default_step_budget")]
    pub step_budget: u32,

    /// Arrival tolerance in cells on each horizontal axis (default: 2)
    #[serde(default = "default_target_tolerance")]
    pub target_tolerance: i32,

    /// Node expansion budget per planner run (default: 10000)
    #[serde(default = "default_max_search_nodes")]
    pub max_search_nodes: usize,
}

/// Target cell coordinates
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TargetConfig {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl From<TargetConfig> for Cell {
    fn from(t: TargetConfig) -> Self {
        Cell::new(t.x, t.y, t.z)
    }
}

// Default value functions
fn default_poll_interval() -> u64 {
    100
}
fn default_step_budget() -> u32 {
    2000
}
fn default_target_tolerance() -> i32 {
    2
}
fn default_max_search_nodes() -> usize {
    10_000
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step_budget: default_step_budget(),
            target_tolerance: default_target_tolerance(),
            max_search_nodes: default_max_search_nodes(),
        }
    }
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MargaConfig::default();
        assert_eq!(config.driver.poll_interval_ms, 100);
        assert_eq!(config.navigation.step_budget, 2000);
        assert_eq!(config.navigation.target_tolerance, 2);
        assert_eq!(config.navigation.max_search_nodes, 10_000);
        assert!(config.target.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: MargaConfig = toml::from_str(
            r#"
            [navigation]
            step_budget = 500

            [target]
            x = 10
            y = 64
            z = -5
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.step_budget, 500);
        // Unset fields keep their defaults
        assert_eq!(config.navigation.target_tolerance, 2);
        assert_eq!(config.driver.poll_interval_ms, 100);

        let target: Cell = config.target.unwrap().into();
        assert_eq!(target, Cell::new(10, 64, -5));
    }
}
