//! Static tunables
use crate::constants::{
    DEFAULT_CATEGORY, DEFAULT_MAP_ZOOM, DEFAULT_SEARCH_RADIUS_DEG, DEFAULT_TOP_N,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ranked set size must be at least 1")]
    NullRankedSetSize,
    #[error("search radius must not exceed 90°")]
    SearchRadius,
}

/// Map rendition preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Base tile layer style
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_zoom() -> u8 {
    DEFAULT_MAP_ZOOM
}

fn default_style() -> String {
    "carto-darkmatter".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            style: default_style(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of satellites retained after ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Relay search radius, in degrees above the horizon
    #[serde(default = "default_search_radius")]
    pub search_radius_deg: u16,
    /// Relay category filter
    #[serde(default = "default_category")]
    pub category: u16,
    #[serde(default)]
    pub map: MapConfig,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_search_radius() -> u16 {
    DEFAULT_SEARCH_RADIUS_DEG
}

fn default_category() -> u16 {
    DEFAULT_CATEGORY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            search_radius_deg: default_search_radius(),
            category: default_category(),
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with custom ranked set size
    pub fn with_top_n(&self, top_n: usize) -> Self {
        let mut s = self.clone();
        s.top_n = top_n;
        s
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::NullRankedSetSize);
        }
        if self.search_radius_deg > 90 {
            return Err(ConfigError::SearchRadius);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.search_radius_deg, 90);
        assert_eq!(cfg.category, 52);
        assert_eq!(cfg.map.zoom, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_parsing() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());

        let cfg: Config = serde_json::from_str(r#"{"top_n": 5, "map": {"zoom": 4}}"#).unwrap();
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.map.zoom, 4);
        assert_eq!(cfg.map.style, "carto-darkmatter");
        assert_eq!(cfg.category, 52);
    }

    #[test]
    fn invalid_config() {
        let cfg = Config::default().with_top_n(0);
        assert_eq!(cfg.validate(), Err(ConfigError::NullRankedSetSize));

        let mut cfg = Config::default();
        cfg.search_radius_deg = 91;
        assert_eq!(cfg.validate(), Err(ConfigError::SearchRadius));
    }
}
