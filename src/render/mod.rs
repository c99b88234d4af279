pub mod dendrogram;
pub mod mandala;
pub mod paint;
pub mod palette;
pub mod scene;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::geometry::GeometryParams;
use crate::model::TreeNode;

/// Diagram style. All variants share one geometry, rotation and
/// interaction engine; they differ in layout parameters and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Rotating rings with slice outlines, focus zoom and legend pills
    #[default]
    FocusedSunburst,
    /// Static colored bands with a side detail panel
    RingExplorer,
    /// Radial cluster layout of the whole tree
    Dendrogram,
    /// Segment × ring grid of colored cells
    Mandala,
}

/// Where slice/ring detail text is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    Inline,
    SidePanel,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::FocusedSunburst,
        Variant::RingExplorer,
        Variant::Dendrogram,
        Variant::Mandala,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FocusedSunburst => "Focused sunburst",
            Self::RingExplorer => "Ring explorer",
            Self::Dendrogram => "Radial dendrogram",
            Self::Mandala => "Mandala",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::FocusedSunburst => "focused-sunburst",
            Self::RingExplorer => "ring-explorer",
            Self::Dendrogram => "dendrogram",
            Self::Mandala => "mandala",
        }
    }

    pub fn geometry_params(self) -> GeometryParams {
        match self {
            Self::RingExplorer => GeometryParams::EXPLORER,
            Self::Mandala => GeometryParams::MANDALA,
            Self::FocusedSunburst | Self::Dendrogram => GeometryParams::FOCUSED,
        }
    }

    pub fn rotates(self) -> bool {
        matches!(self, Self::FocusedSunburst)
    }

    pub fn draws_slices(self) -> bool {
        matches!(self, Self::FocusedSunburst | Self::Mandala)
    }

    pub fn label_mode(self) -> LabelMode {
        match self {
            Self::RingExplorer => LabelMode::SidePanel,
            _ => LabelMode::Inline,
        }
    }

    /// Ring limit handed to the geometry engine. The explorer shows every
    /// top-level group as a ring; the mandala's layout tree is already
    /// bounded.
    pub fn ring_limit(self, configured: usize) -> usize {
        match self {
            Self::RingExplorer | Self::Mandala => usize::MAX,
            Self::FocusedSunburst | Self::Dendrogram => configured,
        }
    }

    /// Tree the geometry is computed from.
    pub fn layout_tree(self, tree: &TreeNode, ring_limit: usize) -> Option<TreeNode> {
        match self {
            Self::Mandala => Some(mandala::mandala_tree(tree, ring_limit)),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|v| v.key() == wanted || (*v == Self::FocusedSunburst && wanted == "sunburst"))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|v| v.key()).collect();
                format!("unknown variant '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
