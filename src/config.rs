//! Game configuration
//!
//! Read from `paperboy.toml`. Every section and field is optional; anything
//! left out takes the default below.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::TARGET_FPS;
use crate::error::GameError;

pub const DEFAULT_CONFIG_PATH: &str = "paperboy.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets: AssetsConfig,
    pub game: GameConfig,
    pub log: LogConfig,
    pub hud: HudConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root of the asset tree (`paperboy/`, `delivery-houses/`, `scenery/`, ...)
    pub dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for a reproducible run; random when unset
    pub seed: Option<u64>,
    /// Frame rate cap
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fps: TARGET_FPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
    /// Log destination. The game owns the terminal, so logs go to a file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("paperboy.log")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Colour name (`black`, `white`, `red`, ... or `#rrggbb`)
    pub color: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, GameError> {
        toml::from_str(text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`. A missing file is not an error and yields defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(path, &text)
    }

    /// Frame budget in seconds, never dividing by zero
    pub fn frame_secs(&self) -> f64 {
        1.0 / self.game.fps.max(1) as f64
    }
}
