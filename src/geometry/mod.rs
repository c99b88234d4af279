//! Ring/slice geometry for radial diagrams.
//!
//! Everything here is a pure function of (tree, canvas size, ring limit,
//! parameters). The result is an immutable snapshot; [`GeometryCache`] keeps
//! the last one alive until an input changes.

pub mod arc;
mod cache;

use std::f32::consts::TAU;

use serde::Deserialize;

use crate::error::GeometryError;
use crate::interaction::PointerTarget;
use crate::model::TreeNode;
use crate::rotation::RotationState;

pub use cache::{GeometryCache, GeometryKey};

/// Number of top-level children that become rings by default.
pub const DEFAULT_RING_LIMIT: usize = 4;

/// Tunables for the radius ladder.
///
/// With `unit = max_radius / (ring_count + center_padding)`:
/// band = `unit * band_ratio`, gap = `unit * gap_ratio`,
/// center = `unit * center_ratio`, last band shrunk by `last_ring_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    pub margin: f32,
    pub center_padding: f32,
    pub band_ratio: f32,
    pub gap_ratio: f32,
    pub center_ratio: f32,
    pub last_ring_ratio: f32,
}

impl GeometryParams {
    /// Focused sunburst: near-zero gaps, slightly thinner outer ring.
    pub const FOCUSED: Self = Self {
        margin: 40.0,
        center_padding: 1.2,
        band_ratio: 1.0,
        gap_ratio: 0.04,
        center_ratio: 0.85,
        last_ring_ratio: 0.88,
    };

    /// Ring explorer: visible gaps between bands.
    pub const EXPLORER: Self = Self {
        margin: 40.0,
        center_padding: 1.4,
        band_ratio: 1.0,
        gap_ratio: 0.2,
        center_ratio: 0.9,
        last_ring_ratio: 1.0,
    };

    /// Mandala grid: cells fill 90% of each ring step.
    pub const MANDALA: Self = Self {
        margin: 40.0,
        center_padding: 1.3,
        band_ratio: 0.9,
        gap_ratio: 0.1,
        center_ratio: 1.0,
        last_ring_ratio: 1.0,
    };
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self::FOCUSED
    }
}

/// One annular band.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    /// 1-based.
    pub ring_index: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub source: TreeNode,
}

impl RingSpec {
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    pub fn width(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    pub fn slice_count(&self) -> usize {
        self.source.children.len()
    }
}

/// One angular sector of a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub ring_index: usize,
    /// 0-based position among the ring's children.
    pub slice_index: usize,
    pub name: String,
    pub description: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub mid_angle: f32,
}

impl Slice {
    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    pub fn description(&self) -> Option<&str> {
        let d = self.description.trim();
        if d.is_empty() {
            None
        } else {
            Some(d)
        }
    }
}

/// Immutable geometry snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub max_radius: f32,
    pub band_width: f32,
    pub gap: f32,
    pub center_radius: f32,
    pub rings: Vec<RingSpec>,
    /// Ring-major, child order within a ring.
    pub slices: Vec<Slice>,
    /// Top-level groups past the ring limit (legend only).
    pub auxiliary: Vec<TreeNode>,
    pub root_name: String,
    pub root_description: String,
}

impl Geometry {
    pub fn ring(&self, ring_index: usize) -> Option<&RingSpec> {
        ring_index
            .checked_sub(1)
            .and_then(|i| self.rings.get(i))
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn slices_for(&self, ring_index: usize) -> impl Iterator<Item = &Slice> + '_ {
        self.slices.iter().filter(move |s| s.ring_index == ring_index)
    }

    pub fn slice(&self, ring_index: usize, slice_index: usize) -> Option<&Slice> {
        self.slices_for(ring_index).nth(slice_index)
    }

    /// Resolve a point in diagram space (origin at center, focus scale
    /// already undone) to the shape under it.
    ///
    /// Slices are looked up in each ring's rotated frame. Points in the
    /// gaps between bands or outside the outer ring hit nothing.
    pub fn hit_test(&self, x: f32, y: f32, rotation: &RotationState) -> Option<PointerTarget> {
        let (r, angle) = arc::cartesian_to_polar(x, y);
        if r <= self.center_radius {
            return Some(PointerTarget::Center);
        }
        let ring = self
            .rings
            .iter()
            .find(|ring| r >= ring.inner_radius && r <= ring.outer_radius)?;

        let k = ring.slice_count();
        if k == 0 {
            return Some(PointerTarget::Ring(ring.ring_index));
        }
        let local = arc::wrap_angle(angle - rotation.angle(ring.ring_index));
        let index = ((local * k as f32 / TAU) as usize).min(k - 1);
        Some(PointerTarget::Slice {
            ring: ring.ring_index,
            index,
        })
    }
}

/// Map a tree onto concentric rings and equal-span slices.
pub fn compute_geometry(
    tree: &TreeNode,
    width: f32,
    height: f32,
    ring_limit: usize,
    params: &GeometryParams,
) -> Result<Geometry, GeometryError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(GeometryError::InvalidCanvas { width, height });
    }

    let (ring_nodes, auxiliary) = tree.partition_rings(ring_limit);
    let ring_count = ring_nodes.len();
    if ring_count == 0 {
        return Err(GeometryError::NoRings {
            root: tree.name.clone(),
        });
    }

    let max_radius = width.min(height) * 0.5 - params.margin;
    if max_radius <= 0.0 {
        return Err(GeometryError::CanvasTooSmall {
            width,
            height,
            margin: params.margin,
        });
    }

    let unit = max_radius / (ring_count as f32 + params.center_padding);
    let band_width = unit * params.band_ratio;
    let gap = unit * params.gap_ratio;
    let center_radius = unit * params.center_ratio;

    let rings: Vec<RingSpec> = ring_nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let ring_index = i + 1;
            let inner_radius = center_radius + gap + i as f32 * (band_width + gap);
            let outer_radius = if ring_index == ring_count {
                inner_radius + band_width * params.last_ring_ratio
            } else {
                inner_radius + band_width
            };
            RingSpec {
                ring_index,
                inner_radius,
                outer_radius,
                source: node.clone(),
            }
        })
        .collect();

    let slices = rings.iter().flat_map(ring_slices).collect();

    Ok(Geometry {
        width,
        height,
        max_radius,
        band_width,
        gap,
        center_radius,
        rings,
        slices,
        auxiliary: auxiliary.to_vec(),
        root_name: tree.name.clone(),
        root_description: tree.description.clone(),
    })
}

/// Equal partition of a ring. The last slice ends at exactly 2π.
fn ring_slices(ring: &RingSpec) -> Vec<Slice> {
    let k = ring.source.children.len();
    if k == 0 {
        return Vec::new();
    }
    let step = TAU / k as f32;
    ring.source
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let start_angle = i as f32 * step;
            let end_angle = if i + 1 == k { TAU } else { (i + 1) as f32 * step };
            Slice {
                ring_index: ring.ring_index,
                slice_index: i,
                name: child.name.clone(),
                description: child.description.clone(),
                inner_radius: ring.inner_radius,
                outer_radius: ring.outer_radius,
                start_angle,
                end_angle,
                mid_angle: start_angle + (end_angle - start_angle) * 0.5,
            }
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_tree() -> impl Strategy<Value = TreeNode> {
        prop::collection::vec(0usize..24, 1..7).prop_map(|sizes| {
            let rings = sizes
                .iter()
                .enumerate()
                .map(|(r, &k)| {
                    TreeNode::named(format!("r{}", r)).with_children(
                        (0..k).map(|i| TreeNode::named(format!("s{}", i))).collect(),
                    )
                })
                .collect();
            TreeNode::named("root").with_children(rings)
        })
    }

    proptest! {
        /// Spans of each ring cover 2π exactly, in child order, without overlap.
        #[test]
        fn slices_partition_the_circle(
            tree in arb_tree(),
            w in 200.0f32..2000.0,
            h in 200.0f32..2000.0,
        ) {
            let g = compute_geometry(&tree, w, h, 6, &GeometryParams::FOCUSED).unwrap();
            for ring in &g.rings {
                let slices: Vec<&Slice> = g.slices_for(ring.ring_index).collect();
                prop_assert_eq!(slices.len(), ring.slice_count());
                if slices.is_empty() {
                    continue;
                }
                let total: f32 = slices.iter().map(|s| s.span()).sum();
                prop_assert!((total - TAU).abs() < 1e-4, "total {}", total);
                prop_assert!(slices[0].start_angle.abs() < 1e-6);
                let expected = TAU / slices.len() as f32;
                for (i, s) in slices.iter().enumerate() {
                    prop_assert_eq!(s.slice_index, i);
                    prop_assert!((s.span() - expected).abs() < 1e-4);
                    prop_assert!((s.mid_angle - (s.start_angle + s.span() / 2.0)).abs() < 1e-5);
                    if i > 0 {
                        prop_assert!((s.start_angle - slices[i - 1].end_angle).abs() < 1e-5);
                    }
                }
            }
        }

        /// inner(i+1) == outer(i) + gap, radii strictly increase, center is innermost.
        #[test]
        fn radii_chain_with_gap(
            tree in arb_tree(),
            w in 200.0f32..2000.0,
            h in 200.0f32..2000.0,
        ) {
            let g = compute_geometry(&tree, w, h, 6, &GeometryParams::FOCUSED).unwrap();
            prop_assert!(g.center_radius < g.rings[0].inner_radius);
            for ring in &g.rings {
                prop_assert!(ring.outer_radius > ring.inner_radius);
            }
            for pair in g.rings.windows(2) {
                let expected = pair[0].outer_radius + g.gap;
                prop_assert!((pair[1].inner_radius - expected).abs() < 1e-3);
                prop_assert!(pair[1].inner_radius > pair[0].inner_radius);
            }
        }
    }
}
