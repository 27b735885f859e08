//! Application settings
//!
//! Settings come from an optional JSON file. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::model::{FIRST_YEAR, LAST_YEAR};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "WORLDVIZ_CONFIG";

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "worldviz.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Delay between a scene switch and its initialization
    pub scene_init_delay_ms: u64,

    /// Period of the year animation
    pub animation_interval_ms: u64,

    /// Fixed height of every chart surface, margins included
    pub chart_height: f32,

    /// Year every slider starts at and resets to
    pub default_year: i32,

    /// Seed for the dataset generator; entropy when unset
    pub seed: Option<u64>,

    pub dark_mode: bool,

    pub window_size: [f32; 2],
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            scene_init_delay_ms: 100,
            animation_interval_ms: 800,
            chart_height: 600.0,
            default_year: LAST_YEAR,
            seed: None,
            dark_mode: false,
            window_size: [1280.0, 860.0],
        }
    }
}

impl AppSettings {
    /// Load from `$WORLDVIZ_CONFIG`, else `./worldviz.json`, else defaults
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.animation_interval_ms == 0 {
            return Err(VizError::Config("animation_interval_ms must be positive".to_string()));
        }
        if !(FIRST_YEAR..=LAST_YEAR).contains(&self.default_year) {
            return Err(VizError::Config(format!(
                "default_year {} outside {}..={}",
                self.default_year, FIRST_YEAR, LAST_YEAR
            )));
        }
        if self.chart_height <= 0.0 {
            return Err(VizError::Config("chart_height must be positive".to_string()));
        }
        Ok(())
    }

    pub fn scene_init_delay(&self) -> Duration {
        Duration::from_millis(self.scene_init_delay_ms)
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = AppSettings::from_json(r#"{ "seed": 7, "default_year": 1990 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.default_year, 1990);
        assert_eq!(settings.animation_interval_ms, 800);
        assert_eq!(settings.scene_init_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            AppSettings::from_json(r#"{ "animation_interval_ms": 0 }"#),
            Err(VizError::Config(_))
        ));
        assert!(matches!(
            AppSettings::from_json(r#"{ "default_year": 2030 }"#),
            Err(VizError::Config(_))
        ));
        assert!(matches!(AppSettings::from_json("{ not json"), Err(VizError::Json(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = AppSettings::load_from(Path::new("/nonexistent/worldviz.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
