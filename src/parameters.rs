// parameters.rs - Configuration snapshots and the input-side parameter state
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::math::{Color, ColorParseError};

/// Full parameter vector for one desired table state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    pub surface_color: Color,
    pub accessory_ref: String,
}

impl Configuration {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            height: self.height,
            width: self.width,
            depth: self.depth,
        }
    }
}

/// Size-only projection of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f32,
    pub width: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),
    #[error("expected name=value, got {0:?}")]
    Malformed(String),
    #[error("invalid number for {name}: {value:?}")]
    InvalidNumber { name: String, value: String },
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
    #[error("accessory {0:?} is not in the catalog")]
    UnknownAccessory(String),
}

/// One edit coming from the input widgets
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterChange {
    Height(f32),
    Width(f32),
    Depth(f32),
    SurfaceColor(Color),
    /// Catalog label or asset ref
    Accessory(String),
}

impl FromStr for ParameterChange {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| ParameterError::Malformed(s.to_string()))?;
        let (name, value) = (name.trim(), value.trim());

        let number = || {
            value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParameterError::InvalidNumber {
                    name: name.to_string(),
                    value: value.to_string(),
                })
        };

        match name {
            "height" => Ok(Self::Height(number()?)),
            "width" => Ok(Self::Width(number()?)),
            "depth" => Ok(Self::Depth(number()?)),
            "color" | "surface_color" => Ok(Self::SurfaceColor(value.parse()?)),
            "accessory" => Ok(Self::Accessory(value.to_string())),
            other => Err(ParameterError::UnknownParameter(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Slider ranges in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRanges {
    pub height: ParameterRange,
    pub width: ParameterRange,
    pub depth: ParameterRange,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            height: ParameterRange::new(500.0, 1200.0),
            width: ParameterRange::new(1200.0, 2400.0),
            depth: ParameterRange::new(300.0, 900.0),
        }
    }
}

/// Current configuration as seen by the input layer.
///
/// Clamps numeric edits to their ranges, drops edits that change nothing and
/// publishes every new snapshot to its subscribers.
pub struct ParameterState {
    current: Configuration,
    ranges: ParameterRanges,
    catalog: Catalog,
    subscribers: Vec<mpsc::UnboundedSender<Configuration>>,
}

impl ParameterState {
    pub fn new(initial: Configuration, ranges: ParameterRanges, catalog: Catalog) -> Self {
        Self {
            current: initial,
            ranges,
            catalog,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> &Configuration {
        &self.current
    }

    /// Stream of snapshots, starting with the next accepted change
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Configuration> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Pushes the current snapshot without changing anything
    pub fn publish(&mut self) {
        let snapshot = self.current.clone();
        self.subscribers
            .retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }

    pub fn apply(&mut self, change: ParameterChange) -> Result<Option<Configuration>, ParameterError> {
        let numeric = match &change {
            ParameterChange::Height(v) => Some(("height", *v)),
            ParameterChange::Width(v) => Some(("width", *v)),
            ParameterChange::Depth(v) => Some(("depth", *v)),
            ParameterChange::SurfaceColor(_) | ParameterChange::Accessory(_) => None,
        };
        if let Some((name, value)) = numeric.filter(|(_, v)| !v.is_finite()) {
            return Err(ParameterError::InvalidNumber {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        let mut next = self.current.clone();
        match change {
            ParameterChange::Height(v) => next.height = self.ranges.height.clamp(v),
            ParameterChange::Width(v) => next.width = self.ranges.width.clamp(v),
            ParameterChange::Depth(v) => next.depth = self.ranges.depth.clamp(v),
            ParameterChange::SurfaceColor(c) => next.surface_color = c,
            ParameterChange::Accessory(key) => {
                let entry = self
                    .catalog
                    .find(&key)
                    .ok_or(ParameterError::UnknownAccessory(key))?;
                next.accessory_ref = entry.asset_ref.clone();
            }
        }

        if next == self.current {
            log::debug!("Parameter change is a no-op, not publishing");
            return Ok(None);
        }

        self.current = next;
        self.publish();
        Ok(Some(self.current.clone()))
    }
}
