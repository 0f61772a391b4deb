//! Configuration management for the criticality scoring pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Locations of the trained artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Trained model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Fitted feature transformer artifact
    #[serde(default = "default_transformer_path")]
    pub transformer_path: PathBuf,
}

/// Input data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV of SOW records to score
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
}

/// Output display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Number of annotated rows shown after a run
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/criticality_model.json")
}

fn default_transformer_path() -> PathBuf {
    PathBuf::from("models/feature_transformer.json")
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/sows.csv")
}

fn default_preview_rows() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig {
                model_path: default_model_path(),
                transformer_path: default_transformer_path(),
            },
            data: DataConfig {
                input_path: default_input_path(),
            },
            display: DisplayConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("models/criticality_model.json")
        );
        assert_eq!(config.data.input_path, PathBuf::from("data/sows.csv"));
        assert_eq!(config.display.preview_rows, 10);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[artifacts]
model_path = "artifacts/model.json"
transformer_path = "artifacts/transformer.json"

[data]
input_path = "exports/sows.csv"

[display]
preview_rows = 25

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.artifacts.model_path, PathBuf::from("artifacts/model.json"));
        assert_eq!(config.data.input_path, PathBuf::from("exports/sows.csv"));
        assert_eq!(config.display.preview_rows, 25);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_display_section_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[artifacts]

[data]

[logging]
level = "info"
format = "pretty"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.display.preview_rows, 10);
        assert_eq!(
            config.artifacts.transformer_path,
            PathBuf::from("models/feature_transformer.json")
        );
    }
}
