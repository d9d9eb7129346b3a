//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/formula-editor/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translate::AngleMode;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Unit the trig functions of the evaluation scope work in
    #[serde(default)]
    pub angle_mode: AngleMode,

    /// Selected palette id (e.g., "default-light", "default-dark")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Undo depth
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Translate and evaluate after every edit
    #[serde(default = "default_true")]
    pub realtime_evaluation: bool,

    #[serde(default = "default_evaluation_timeout_ms")]
    pub evaluation_timeout_ms: u64,

    #[serde(default = "default_analysis_timeout_ms")]
    pub analysis_timeout_ms: u64,

    /// User key layout replacing the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_layout: Option<PathBuf>,
}

fn default_theme() -> String {
    "default-light".to_string()
}

fn default_history_limit() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_evaluation_timeout_ms() -> u64 {
    2000
}

fn default_analysis_timeout_ms() -> u64 {
    10_000
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            theme: default_theme(),
            history_limit: default_history_limit(),
            realtime_evaluation: true,
            evaluation_timeout_ms: default_evaluation_timeout_ms(),
            analysis_timeout_ms: default_analysis_timeout_ms(),
            key_layout: None,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn evaluation_timeout(&self) -> Duration {
        Duration::from_millis(self.evaluation_timeout_ms)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_millis(self.analysis_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: EditorConfig = serde_yaml::from_str("angle_mode: degree\n").unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degree);
        assert_eq!(config.theme, "default-light");
        assert_eq!(config.history_limit, 50);
        assert!(config.realtime_evaluation);
        assert_eq!(config.evaluation_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_mapping_is_default() {
        let config: EditorConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
