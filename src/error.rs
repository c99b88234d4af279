//! Error types for the diagram engine.
//!
//! Almost every input-shape problem degrades to a default instead of failing.
//! The cases below are the ones the engine refuses to paper over.

use std::path::PathBuf;

/// Why ring/slice geometry could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Width or height was zero, negative or not finite.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    /// The canvas is smaller than twice the margin, so no ring fits.
    #[error("canvas {width}x{height} leaves no room inside a {margin}px margin")]
    CanvasTooSmall { width: f32, height: f32, margin: f32 },

    /// The tree has no ring-bearing children (or the ring limit is zero).
    #[error("nothing to render: '{root}' has no ring-bearing children")]
    NoRings { root: String },
}

/// Structural problems in a tree. Reported, never fatal for rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("node at {path} has an empty name")]
    EmptyName { path: String },

    #[error("duplicate sibling name '{name}' under '{parent}'")]
    DuplicateSibling { parent: String, name: String },
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = DiagramError> = std::result::Result<T, E>;
