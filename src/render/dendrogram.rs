//! Radial cluster layout of the whole tree.
//!
//! Leaves sit on the outer circle in depth-first order; siblings are one
//! unit apart, cousins two. Each internal node takes the mean angle of its
//! children and a radius proportional to its distance from the deepest leaf
//! level, so all leaves line up on the rim.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::arc::polar_to_cartesian;
use crate::model::TreeNode;

/// Marker radius of the root, internal nodes and leaves.
pub const ROOT_MARKER: f32 = 6.0;
pub const INTERNAL_MARKER: f32 = 4.0;
pub const LEAF_MARKER: f32 = 3.0;
/// Gap between a marker and its label.
pub const LABEL_OFFSET: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterNode {
    pub parent: Option<usize>,
    pub depth: usize,
    /// Distance to the deepest descendant leaf.
    pub height: usize,
    pub name: String,
    pub description: String,
    pub is_leaf: bool,
    pub angle: f32,
    pub radius: f32,
}

impl ClusterNode {
    pub fn position(&self) -> [f32; 2] {
        polar_to_cartesian(self.radius, self.angle)
    }

    pub fn marker_radius(&self) -> f32 {
        if self.depth == 0 {
            ROOT_MARKER
        } else if self.is_leaf {
            LEAF_MARKER
        } else {
            INTERNAL_MARKER
        }
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

/// Where and how to draw a node's name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub pos: [f32; 2],
    /// Text rotation, radians clockwise from horizontal.
    pub angle: f32,
    /// Text grows away from `pos` when true, ends at `pos` otherwise.
    pub starts_at_pos: bool,
}

/// Nodes in pre-order; a parent always precedes its children.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterLayout {
    pub radius: f32,
    pub nodes: Vec<ClusterNode>,
}

impl ClusterLayout {
    /// (parent, child) index pairs.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.parent.map(|p| (p, i)))
    }

    /// Cubic curve from parent to child: leaves the parent radially, swings
    /// round at the midpoint radius, arrives radially.
    pub fn link_curve(&self, parent: usize, child: usize) -> Option<[[f32; 2]; 4]> {
        let p = self.nodes.get(parent)?;
        let c = self.nodes.get(child)?;
        let mid = (p.radius + c.radius) * 0.5;
        Some([
            polar_to_cartesian(p.radius, p.angle),
            polar_to_cartesian(mid, p.angle),
            polar_to_cartesian(mid, c.angle),
            polar_to_cartesian(c.radius, c.angle),
        ])
    }

    /// Leaf labels point outward, internal labels inward; text on the left
    /// half is turned round so it never reads upside down.
    pub fn label_placement(&self, index: usize) -> Option<LabelPlacement> {
        let n = self.nodes.get(index)?;
        let outward = if n.is_leaf { 1.0 } else { -1.0 };
        let pos = polar_to_cartesian(n.radius + outward * LABEL_OFFSET, n.angle);
        let flipped = n.angle >= PI;
        let angle = if flipped {
            n.angle + FRAC_PI_2
        } else {
            n.angle - FRAC_PI_2
        };
        Some(LabelPlacement {
            pos,
            angle,
            starts_at_pos: n.is_leaf != flipped,
        })
    }

    /// Nearest node whose marker (plus `slack`) contains the point.
    pub fn hit_test(&self, x: f32, y: f32, slack: f32) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let [nx, ny] = n.position();
                (i, (nx - x).hypot(ny - y), n.marker_radius() + slack)
            })
            .filter(|&(_, d, reach)| d <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _, _)| i)
    }
}

/// Lay out `tree` inside a circle of `radius`.
pub fn cluster_layout(tree: &TreeNode, radius: f32) -> ClusterLayout {
    let mut nodes = Vec::new();
    flatten(tree, None, 0, &mut nodes);

    // Leaf positions in separation units, depth-first order.
    let mut x = vec![0.0f32; nodes.len()];
    let leaves: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_leaf).collect();
    let mut prev: Option<usize> = None;
    for &leaf in &leaves {
        x[leaf] = match prev {
            Some(p) => x[p] + separation(&nodes, p, leaf),
            None => 0.0,
        };
        prev = Some(leaf);
    }

    // Children come after their parent, so a reverse sweep sees every
    // child before its parent.
    let mut sum = vec![0.0f32; nodes.len()];
    let mut count = vec![0usize; nodes.len()];
    for i in (0..nodes.len()).rev() {
        if !nodes[i].is_leaf && count[i] > 0 {
            x[i] = sum[i] / count[i] as f32;
        }
        if let Some(p) = nodes[i].parent {
            sum[p] += x[i];
            count[p] += 1;
        }
    }

    let (first, last) = match (leaves.first(), leaves.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return ClusterLayout { radius, nodes },
    };
    let half = separation(&nodes, first, last) * 0.5;
    let x0 = x[first] - half;
    let x1 = x[last] + half;
    let span = x1 - x0;
    let root_height = nodes[0].height as f32;

    for (i, n) in nodes.iter_mut().enumerate() {
        n.angle = (x[i] - x0) / span * TAU;
        n.radius = if root_height > 0.0 {
            (1.0 - n.height as f32 / root_height) * radius
        } else {
            0.0
        };
    }

    ClusterLayout { radius, nodes }
}

fn flatten(node: &TreeNode, parent: Option<usize>, depth: usize, out: &mut Vec<ClusterNode>) {
    let index = out.len();
    out.push(ClusterNode {
        parent,
        depth,
        height: node.depth(),
        name: node.name.clone(),
        description: node.description.clone(),
        is_leaf: node.is_leaf(),
        angle: 0.0,
        radius: 0.0,
    });
    for child in &node.children {
        flatten(child, Some(index), depth + 1, out);
    }
}

fn separation(nodes: &[ClusterNode], a: usize, b: usize) -> f32 {
    if nodes[a].parent == nodes[b].parent {
        1.0
    } else {
        2.0
    }
}
