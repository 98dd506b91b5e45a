use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::timeline::TimeScale;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timescale: TimeScale,
    #[serde(default = "default_column_width")]
    pub column_width: f32,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_column_width() -> f32 {
    80.0
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timescale: TimeScale::Day,
            column_width: default_column_width(),
            font_scale: default_font_scale(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "planboard", "planboard")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timescale, TimeScale::Day);
        assert_eq!(config.column_width, 80.0);
        assert_eq!(config.font_scale, 1.0);
    }

    #[test]
    fn timescale_persists_as_lowercase() {
        let config = Config {
            timescale: TimeScale::Week,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"timescale\":\"week\""));
    }
}
