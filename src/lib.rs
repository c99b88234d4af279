//! Radial hierarchical diagrams: concentric rings of a named tree, with
//! per-ring rotation, ring focus and hover tooltips.
//!
//! The geometry, rotation and interaction layers are plain data and can be
//! driven without a window; `render::paint` draws a [`render::scene::Scene`]
//! with an egui painter.

pub mod animation;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod render;
pub mod rotation;
pub mod tooltip;

pub use config::DiagramConfig;
pub use engine::DiagramEngine;
pub use error::{ConfigError, DiagramError, GeometryError, ModelError, Result};
pub use geometry::{compute_geometry, Geometry, GeometryParams};
pub use interaction::{InteractionState, PointerEvent, PointerTarget};
pub use model::{system_model_tree, TreeNode};
pub use render::Variant;
