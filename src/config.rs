//! World configuration read from a TOML file.
//!
//! ```toml
//! animation_width = 800
//! animation_height = 600
//! robot_kinds = ["wheeled", "flying", "carrier"]
//! ```
//!
//! Every key is optional. Bounds outside `500..=1000` fall back to the default for that axis.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{ShapeKind, Size};

pub const DEFAULT_ANIMATION_WIDTH: i32 = 500;
pub const DEFAULT_ANIMATION_HEIGHT: i32 = 500;
pub const MAX_ANIMATION_WIDTH: i32 = 1000;
pub const MAX_ANIMATION_HEIGHT: i32 = 1000;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_width")]
    pub animation_width: i32,

    #[serde(default = "default_height")]
    pub animation_height: i32,

    #[serde(default)]
    pub robot_kinds: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            animation_width: DEFAULT_ANIMATION_WIDTH,
            animation_height: DEFAULT_ANIMATION_HEIGHT,
            robot_kinds: Vec::new(),
        }
    }
}

fn default_width() -> i32 {
    DEFAULT_ANIMATION_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_ANIMATION_HEIGHT
}

impl WorldConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let bounds = config.bounds();
        if bounds.width() != config.animation_width {
            warn!(
                width = config.animation_width,
                "animation width out of range, using default"
            );
        }
        if bounds.height() != config.animation_height {
            warn!(
                height = config.animation_height,
                "animation height out of range, using default"
            );
        }

        Ok(config)
    }

    /// Reads the configuration at `path`, falling back to defaults if there is none or it
    /// cannot be used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(error) => {
                warn!(%error, "using default configuration");
                Self::default()
            }
        }
    }

    /// Size of the world in which robots move. Each axis falls back to its default when the
    /// configured value is out of range.
    #[must_use]
    pub fn bounds(&self) -> Size {
        Size::new(
            bound(
                self.animation_width,
                DEFAULT_ANIMATION_WIDTH,
                MAX_ANIMATION_WIDTH,
            ),
            bound(
                self.animation_height,
                DEFAULT_ANIMATION_HEIGHT,
                MAX_ANIMATION_HEIGHT,
            ),
        )
    }

    /// Configured robot kinds sorted by name. Unknown names are skipped.
    #[must_use]
    pub fn robot_kinds(&self) -> Vec<ShapeKind> {
        let mut kinds: Vec<ShapeKind> = self
            .robot_kinds
            .iter()
            .filter_map(|name| match name.parse() {
                Ok(kind) => Some(kind),
                Err(error) => {
                    warn!(%error, "skipping robot kind");
                    None
                }
            })
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

fn bound(value: i32, default: i32, max: i32) -> i32 {
    if (default..=max).contains(&value) {
        value
    } else {
        default
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {message}")]
    Parse { message: String },
}
