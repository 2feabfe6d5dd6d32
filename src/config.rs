//! Tag field configuration persistence
//!
//! Stores preferences in `~/.config/tagfield/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagError};
use crate::style::{Color, FontSpec, TextStyle};

/// Text container geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Wrapping width in points, 0 disables wrapping
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default)]
    pub inset_top: f32,
    #[serde(default)]
    pub inset_left: f32,
}

fn default_width() -> f32 {
    320.0
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            inset_top: 0.0,
            inset_left: 0.0,
        }
    }
}

/// Tag field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagFieldConfig {
    /// Font used when the default attributes carry none
    #[serde(default)]
    pub default_font: Option<FontSpec>,

    /// Attributes applied to typed text and tag slots
    #[serde(default)]
    pub default_attributes: TextStyle,

    /// Pill tint, as `#RRGGBB` or `#RRGGBBAA`
    #[serde(default = "default_tint")]
    pub tint: Color,

    /// Device pixels per point for pill bitmaps
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,

    /// TrueType font for measuring and drawing labels; the grid layout is
    /// used when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default)]
    pub container: ContainerConfig,
}

fn default_tint() -> Color {
    Color::SYSTEM_BLUE
}

fn default_scale_factor() -> f32 {
    2.0
}

impl Default for TagFieldConfig {
    fn default() -> Self {
        Self {
            default_font: None,
            default_attributes: TextStyle::default(),
            tint: default_tint(),
            scale_factor: default_scale_factor(),
            font_path: None,
            container: ContainerConfig::default(),
        }
    }
}

impl TagFieldConfig {
    /// Load config from the config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TagError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Font labels and line heights resolve against when no attribute font is set
    pub fn base_font(&self) -> FontSpec {
        self.default_attributes
            .resolved_font(self.default_font.as_ref())
    }
}
