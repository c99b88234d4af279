//! Colors, ring metadata and legend content.
//!
//! Hex parsing works on bytes with no per-character branching:
//!   value = is_digit * (b - '0') + is_lower * (b - 'a' + 10) + is_upper * (b - 'A' + 10)
//! and is `const`, so every palette entry below is resolved at compile time.

use crate::model::TreeNode;

/// RGBA color (0-255 per channel, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// Anything else yields [`Rgba::BLACK`].
    pub const fn hex(s: &str) -> Self {
        let bytes = s.as_bytes();
        let len = bytes.len();
        if len == 0 || bytes[0] != b'#' {
            return Self::BLACK;
        }
        match len {
            4 | 5 => {
                let r = hex_digit(bytes[1]);
                let g = hex_digit(bytes[2]);
                let b = hex_digit(bytes[3]);
                let a = if len == 5 { hex_digit(bytes[4]) } else { 0xf };
                Self {
                    r: r << 4 | r,
                    g: g << 4 | g,
                    b: b << 4 | b,
                    a: a << 4 | a,
                }
            }
            7 | 9 => Self {
                r: hex_byte(bytes[1], bytes[2]),
                g: hex_byte(bytes[3], bytes[4]),
                b: hex_byte(bytes[5], bytes[6]),
                a: if len == 9 { hex_byte(bytes[7], bytes[8]) } else { 255 },
            },
            _ => Self::BLACK,
        }
    }

    /// Same color at `opacity` (0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Lighten by `k` steps of 1/0.7, channels saturate at 255.
    pub fn brighter(self, k: f32) -> Self {
        self.scale_rgb(BRIGHTNESS_STEP.powf(-k))
    }

    /// Darken by `k` steps of 0.7.
    pub fn darker(self, k: f32) -> Self {
        self.scale_rgb(BRIGHTNESS_STEP.powf(k))
    }

    fn scale_rgb(self, f: f32) -> Self {
        let ch = |c: u8| (c as f32 * f).round().clamp(0.0, 255.0) as u8;
        Self {
            r: ch(self.r),
            g: ch(self.g),
            b: ch(self.b),
            a: self.a,
        }
    }

    /// Linear RGB interpolation, `t` clamped to 0..=1.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

const BRIGHTNESS_STEP: f32 = 0.7;

#[inline(always)]
const fn hex_digit(b: u8) -> u8 {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;
    is_digit
        .wrapping_mul(b.wrapping_sub(b'0'))
        .wrapping_add(is_lower.wrapping_mul(b.wrapping_sub(b'a').wrapping_add(10)))
        .wrapping_add(is_upper.wrapping_mul(b.wrapping_sub(b'A').wrapping_add(10)))
}

#[inline(always)]
const fn hex_byte(hi: u8, lo: u8) -> u8 {
    (hex_digit(hi) << 4) | hex_digit(lo)
}

// ─── Theme ──────────────────────────────────────────────────────────

pub const BACKGROUND: Rgba = Rgba::hex("#020617");
pub const OUTLINE_DARK: Rgba = Rgba::hex("#0f172a");
pub const TEXT: Rgba = Rgba::hex("#e5e7eb");
pub const TEXT_BRIGHT: Rgba = Rgba::hex("#f9fafb");
pub const TEXT_MUTED: Rgba = Rgba::hex("#9ca3af");
pub const TEXT_SUBLINE: Rgba = Rgba::hex("#94a3b8");
pub const HEADING_ACCENT: Rgba = Rgba::hex("#a5b4fc");
pub const HIGHLIGHT: Rgba = Rgba::hex("#e5e7eb");
pub const HOVER_ACCENT: Rgba = Rgba::hex("#facc15");
pub const SELECT_ACCENT: Rgba = Rgba::hex("#f97316");
pub const SLATE: Rgba = Rgba::hex("#334155");
pub const LINK: Rgba = Rgba::hex("#1f2937");
pub const TOOLTIP_BG: Rgba = Rgba { r: 15, g: 23, b: 42, a: 245 };
pub const PILL_BORDER: Rgba = Rgba { r: 148, g: 163, b: 184, a: 153 };

/// Used for any ring without a palette entry.
pub const NEUTRAL: Rgba = Rgba::hex("#64748b");

// ─── Rings ──────────────────────────────────────────────────────────

pub const RING_COLORS: [Rgba; 4] = [
    Rgba::hex("#38bdf8"),
    Rgba::hex("#a855f7"),
    Rgba::hex("#22c55e"),
    Rgba::hex("#fb923c"),
];

/// Endpoints of the ring explorer's blue→purple scale.
pub const SCALE_START: Rgba = Rgba::hex("#38bdf8");
pub const SCALE_END: Rgba = Rgba::hex("#a855f7");

pub fn ring_color(ring_index: usize) -> Rgba {
    ring_index
        .checked_sub(1)
        .and_then(|i| RING_COLORS.get(i).copied())
        .unwrap_or(NEUTRAL)
}

/// Position of `ring_index` on a linear scale over `1..=ring_count`.
pub fn scale_color(ring_index: usize, ring_count: usize) -> Rgba {
    let t = if ring_count > 1 {
        (ring_index as f32 - 1.0) / (ring_count as f32 - 1.0)
    } else {
        0.5
    };
    SCALE_START.lerp(SCALE_END, t)
}

/// Display label and one-line summary for a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingMeta {
    pub label: &'static str,
    pub subline: &'static str,
}

const RING_META: [RingMeta; 4] = [
    RingMeta {
        label: "Digital mediation",
        subline: "How data movement creates inequality",
    },
    RingMeta {
        label: "Conditions of mediation",
        subline: "How systems and processes organise inequality",
    },
    RingMeta {
        label: "Domains of lived experience",
        subline: "Where inequality is encountered and felt",
    },
    RingMeta {
        label: "Positionalities",
        subline: "Who is structurally situated differently inside systems",
    },
];

pub fn ring_meta(ring_index: usize) -> Option<RingMeta> {
    ring_index
        .checked_sub(1)
        .and_then(|i| RING_META.get(i).copied())
}

/// Ring label, falling back to the node's own name.
pub fn ring_label(ring_index: usize, node: &TreeNode) -> &str {
    ring_meta(ring_index).map_or(node.name.as_str(), |m| m.label)
}

// ─── Mandala ────────────────────────────────────────────────────────

pub const SEGMENT_COLORS: [Rgba; 8] = [
    Rgba::hex("#f97373"),
    Rgba::hex("#f9a76c"),
    Rgba::hex("#ffd166"),
    Rgba::hex("#9be15d"),
    Rgba::hex("#42d6a4"),
    Rgba::hex("#54a0ff"),
    Rgba::hex("#a66bff"),
    Rgba::hex("#ff6ac1"),
];

pub fn segment_color(segment: usize) -> Rgba {
    SEGMENT_COLORS[segment % SEGMENT_COLORS.len()]
}

// ─── Dendrogram ─────────────────────────────────────────────────────

pub fn depth_color(depth: usize) -> Rgba {
    match depth {
        0 => Rgba::hex("#f97316"),
        1 => Rgba::hex("#38bdf8"),
        2 => Rgba::hex("#a855f7"),
        _ => Rgba::hex("#e5e7eb"),
    }
}

// ─── Legend ─────────────────────────────────────────────────────────

pub const LEGEND_TITLE: &str = "Dimensions of the digital divide";
pub const LEGEND_INTRO: &str =
    "The digital divide is not one gap. It is produced at multiple layers.";
pub const PILLS_CAPTION: &str = "Interpretation & response:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendItem {
    pub color: Rgba,
    pub title: &'static str,
    pub text: &'static str,
}

pub const LEGEND_ITEMS: [LegendItem; 4] = [
    LegendItem {
        color: RING_COLORS[0],
        title: "Data mediation",
        text: "Inequalities in how data is recorded, processed, routed, circulated.",
    },
    LegendItem {
        color: RING_COLORS[1],
        title: "System conditions",
        text: "Inequalities produced by systems, people and processes.",
    },
    LegendItem {
        color: RING_COLORS[2],
        title: "Lived experience",
        text: "Inequalities across narrative, embodiment, materiality, labour, care, authorship, \
               affect and relationality.",
    },
    LegendItem {
        color: RING_COLORS[3],
        title: "Positionality",
        text: "Structural inequalities across race, class, gender, language, disability and \
               related categories.",
    },
];

const DEFAULT_INTERPRETATIONS: [&str; 3] = ["Literacy", "Visibility", "Accountability"];

/// Pill labels: children of the first auxiliary group that has any.
pub fn interpretation_labels(auxiliary: &[TreeNode]) -> Vec<String> {
    auxiliary
        .iter()
        .find(|g| !g.children.is_empty())
        .map(|g| g.children.iter().map(|c| c.name.clone()).collect())
        .unwrap_or_else(|| DEFAULT_INTERPRETATIONS.iter().map(|s| s.to_string()).collect())
}

/// Two short lines under the center title.
///
/// Takes the first sentence of `description` and splits it near the middle
/// on a word boundary. Blank descriptions give no lines.
pub fn center_subtitle(description: &str) -> Vec<String> {
    let first = description
        .split_terminator(". ")
        .next()
        .unwrap_or("")
        .trim()
        .trim_end_matches('.');
    if first.is_empty() {
        return Vec::new();
    }
    let words: Vec<&str> = first.split_whitespace().collect();
    let total: usize = words.iter().map(|w| w.len() + 1).sum();
    let mut line = String::new();
    let mut split_at = words.len();
    for (i, w) in words.iter().enumerate() {
        if !line.is_empty() && line.len() + w.len() + 1 > total / 2 {
            split_at = i;
            break;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(w);
    }
    let rest = words[split_at..].join(" ");
    if rest.is_empty() {
        vec![format!("{}.", line)]
    } else {
        vec![line, format!("{}.", rest)]
    }
}
