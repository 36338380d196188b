//! Scene and render settings.
//!
//! Both halves can be loaded from a JSON settings file; missing fields fall
//! back to the reference benchmark values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted image edge in pixels.
pub const MAX_RESOLUTION: u32 = 16_384;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Worker count must be at least 1")]
    ZeroWorkers,
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters of the benchmark scene instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Scene instance identifier mixed into every pixel seed
    pub salt: u32,
    /// Constant added to every pixel seed
    pub seed_offset: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            salt: 0,
            seed_offset: 0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let valid = |edge: u32| (1..=MAX_RESOLUTION).contains(&edge);
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Worker threads; `None` picks one less than the CPU count
    pub workers: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            workers: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Contents of a settings file.
///
/// ```json
/// { "scene": { "width": 320, "height": 240 }, "render": { "samples_per_pixel": 4 } }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&text)?;
        log::debug!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.scene.validate()?;
        self.render.validate()
    }
}
