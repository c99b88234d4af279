//! Diagram configuration.
//!
//! Every field has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! variant = "ring-explorer"
//! ring_limit = 4
//! focus_scale = 1.04
//!
//! [canvas]
//! width = 900
//! height = 900
//!
//! [rotation]
//! enabled = true
//! speeds = [0.0016, -0.0012]
//!
//! [tooltip]
//! offset = 15
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::{GeometryParams, DEFAULT_RING_LIMIT};
use crate::render::Variant;
use crate::rotation::RotationConfig;
use crate::tooltip::TooltipLayout;

/// Whole-diagram zoom applied while a ring is selected.
pub const DEFAULT_FOCUS_SCALE: f32 = 1.04;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub variant: Variant,
    pub ring_limit: usize,
    pub focus_scale: f32,
    pub canvas: CanvasConfig,
    pub rotation: RotationConfig,
    pub tooltip: TooltipLayout,
    /// Overrides the variant's own radius ladder when set.
    pub geometry: Option<GeometryParams>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            ring_limit: DEFAULT_RING_LIMIT,
            focus_scale: DEFAULT_FOCUS_SCALE,
            canvas: CanvasConfig::default(),
            rotation: RotationConfig::default(),
            tooltip: TooltipLayout::default(),
            geometry: None,
        }
    }
}

impl DiagramConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_limit == 0 {
            return Err(invalid("ring_limit", "must be at least 1"));
        }
        if !(self.focus_scale.is_finite() && self.focus_scale > 0.0) {
            return Err(invalid("focus_scale", format!("{} is not a positive number", self.focus_scale)));
        }
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(invalid(
                "canvas",
                format!("{}x{} is not a positive size", self.canvas.width, self.canvas.height),
            ));
        }
        if self.rotation.speeds.iter().any(|s| !s.is_finite()) {
            return Err(invalid("rotation.speeds", "speeds must be finite"));
        }
        if !(self.rotation.speed_decay.is_finite() && self.rotation.speed_decay > 0.0) {
            return Err(invalid("rotation.speed_decay", "must be positive"));
        }
        let t = &self.tooltip;
        if t.offset < 0.0 || t.width < 0.0 || t.height < 0.0 {
            return Err(invalid("tooltip", "offset and footprint must be non-negative"));
        }
        if let Some(g) = &self.geometry {
            if g.margin < 0.0 || g.band_ratio <= 0.0 || g.gap_ratio < 0.0 || g.center_ratio <= 0.0 {
                return Err(invalid("geometry", "ratios must be positive"));
            }
            if !(g.last_ring_ratio > 0.0 && g.last_ring_ratio <= 1.0) {
                return Err(invalid("geometry.last_ring_ratio", "must be in (0, 1]"));
            }
        }
        Ok(())
    }

    /// Geometry parameters in effect: the explicit override or the variant's.
    pub fn geometry_params(&self) -> GeometryParams {
        self.geometry.unwrap_or_else(|| self.variant.geometry_params())
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas = CanvasConfig { width, height };
        self
    }

    pub fn with_rotation(mut self, enabled: bool) -> Self {
        self.rotation.enabled = enabled;
        self
    }

    pub fn with_ring_limit(mut self, ring_limit: usize) -> Self {
        self.ring_limit = ring_limit;
        self
    }

    pub fn with_focus_scale(mut self, focus_scale: f32) -> Self {
        self.focus_scale = focus_scale;
        self
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
