// config.rs - Configurator settings loaded from JSON
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::math::Color;
use crate::parameters::{Configuration, ParameterRanges};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("thickness must be positive, got {0}")]
    NonPositiveThickness(f32),
    #[error("accessory scale must be positive, got {0}")]
    NonPositiveScale(f32),
    #[error("{axis} range {min}..{max} allows values at or below twice the thickness ({thickness})")]
    DegenerateRange {
        axis: &'static str,
        min: f32,
        max: f32,
        thickness: f32,
    },
    #[error("{axis} range {min}..{max} is inverted or not finite")]
    InvalidRange {
        axis: &'static str,
        min: f32,
        max: f32,
    },
    #[error("accessory catalog is empty")]
    EmptyCatalog,
    #[error("initial accessory {0:?} is not in the catalog")]
    UnknownInitialAccessory(String),
}

/// Fixed geometry constants shared by the builder and the composer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildSettings {
    pub thickness: f32,
    pub frame_color: Color,
    pub accessory_scale: f32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            thickness: 40.0,
            frame_color: Color::from_rgb8(0x96, 0x96, 0x96),
            accessory_scale: 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub thickness: f32,
    pub frame_color: Color,
    /// Accessory assets are authored in metres, the scene is in millimetres
    pub accessory_scale: f32,
    pub ranges: ParameterRanges,
    pub catalog: Catalog,
    pub initial: Configuration,
    /// Base directory for relative asset refs
    pub asset_root: PathBuf,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        let settings = BuildSettings::default();
        let catalog = Catalog::default();
        let accessory_ref = catalog
            .first()
            .map(|e| e.asset_ref.clone())
            .unwrap_or_default();

        Self {
            thickness: settings.thickness,
            frame_color: settings.frame_color,
            accessory_scale: settings.accessory_scale,
            ranges: ParameterRanges::default(),
            catalog,
            initial: Configuration {
                height: 700.0,
                width: 1500.0,
                depth: 800.0,
                surface_color: Color::from_rgb8(0xc7, 0xb2, 0x99),
                accessory_ref,
            },
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl ConfiguratorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        log::info!("Loaded configurator config from {:?}", path);
        Ok(config)
    }

    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            thickness: self.thickness,
            frame_color: self.frame_color,
            accessory_scale: self.accessory_scale,
        }
    }

    /// Rejects settings under which the builder could produce zero or
    /// negative sized legs and braces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(ConfigError::NonPositiveThickness(self.thickness));
        }
        if !(self.accessory_scale.is_finite() && self.accessory_scale > 0.0) {
            return Err(ConfigError::NonPositiveScale(self.accessory_scale));
        }

        let ranges = [
            ("height", self.ranges.height),
            ("width", self.ranges.width),
            ("depth", self.ranges.depth),
        ];
        for (axis, range) in ranges {
            // Also what f32::clamp needs to not panic
            if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
                return Err(ConfigError::InvalidRange {
                    axis,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let limit = 2.0 * self.thickness;
        for (axis, range) in [("width", self.ranges.width), ("depth", self.ranges.depth)] {
            if range.min <= limit {
                return Err(ConfigError::DegenerateRange {
                    axis,
                    min: range.min,
                    max: range.max,
                    thickness: self.thickness,
                });
            }
        }

        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.catalog.find(&self.initial.accessory_ref).is_none() {
            return Err(ConfigError::UnknownInitialAccessory(
                self.initial.accessory_ref.clone(),
            ));
        }
        Ok(())
    }

    /// Initial configuration pulled into the configured ranges
    pub fn initial_configuration(&self) -> Configuration {
        let mut initial = self.initial.clone();
        initial.height = self.ranges.height.clamp(initial.height);
        initial.width = self.ranges.width.clamp(initial.width);
        initial.depth = self.ranges.depth.clamp(initial.depth);
        initial
    }
}
