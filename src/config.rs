use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::geometry::Size;
use crate::surface::MonospaceMetrics;

/// Env var naming a JSON config file
pub const CONFIG_ENV: &str = "DESKWM_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Desktop settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub windowed_width: i32,
    pub windowed_height: i32,
    pub taskbar_height: i32,
    /// Pixel size of one glyph (one terminal cell)
    pub glyph_width: i32,
    pub glyph_height: i32,
    /// Seed for new-window placement
    pub spawn_seed: u64,
    pub start_fullscreen: bool,
    pub frame_interval_ms: u64,
    pub log_file: PathBuf,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            windowed_width: 800,
            windowed_height: 600,
            taskbar_height: 40,
            glyph_width: 8,
            glyph_height: 16,
            spawn_seed: 0x5eed_d35c,
            start_fullscreen: false,
            frame_interval_ms: 16,
            log_file: PathBuf::from("deskwm.log"),
        }
    }
}

impl DesktopConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DesktopConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        info!("[Config] loaded {}", path.display());
        Ok(config)
    }

    /// Load the file named by `DESKWM_CONFIG`, or use defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.into(),
            })
        }

        if self.windowed_width < 1 {
            return invalid("windowed_width", "must be at least 1");
        }
        if self.windowed_height < 1 {
            return invalid("windowed_height", "must be at least 1");
        }
        if self.taskbar_height < 1 || self.taskbar_height >= self.windowed_height {
            return invalid(
                "taskbar_height",
                format!("must be in 1..{}", self.windowed_height),
            );
        }
        if self.glyph_width < 1 {
            return invalid("glyph_width", "must be at least 1");
        }
        if self.glyph_height < 1 {
            return invalid("glyph_height", "must be at least 1");
        }
        if self.frame_interval_ms < 1 {
            return invalid("frame_interval_ms", "must be at least 1");
        }
        Ok(())
    }

    pub fn metrics(&self) -> MonospaceMetrics {
        MonospaceMetrics::new(self.glyph_width, self.glyph_height)
    }

    pub fn windowed_size(&self) -> Size {
        Size::new(self.windowed_width, self.windowed_height)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
