//! Backend-independent scene graph.
//!
//! Three update paths, from most to least expensive:
//! - [`build_scene`] on a new geometry snapshot (tree, size or variant changed)
//! - [`restyle`] on interaction changes: colors, strokes, labels, pills
//! - [`apply_rotation`] every frame: ring transforms and orbiting labels only
//!
//! Coordinates are diagram space: origin at the center, y down, before the
//! focus scale is applied.

use std::f32::consts::PI;

use super::dendrogram::ClusterLayout;
use super::mandala;
use super::palette::{self, Rgba};
use super::Variant;
use crate::geometry::arc::{in_lower_half, polar_to_cartesian};
use crate::geometry::{Geometry, RingSpec, Slice};
use crate::interaction::{InteractionState, PointerTarget};
use crate::rotation::RotationState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Rgba,
}

impl StrokeStyle {
    pub const NONE: Self = Self {
        width: 0.0,
        color: Rgba::TRANSPARENT,
    };

    pub fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Filled and/or outlined annular sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorShape {
    pub target: PointerTarget,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Ring-local angles; the owning group's rotation is added when drawn.
    pub start_angle: f32,
    pub end_angle: f32,
    pub fill: Rgba,
    pub stroke: StrokeStyle,
}

impl SectorShape {
    fn band(ring: &RingSpec, target: PointerTarget) -> Self {
        Self {
            target,
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            start_angle: 0.0,
            end_angle: std::f32::consts::TAU,
            fill: Rgba::TRANSPARENT,
            stroke: StrokeStyle::NONE,
        }
    }

    fn slice(slice: &Slice) -> Self {
        Self {
            target: PointerTarget::Slice {
                ring: slice.ring_index,
                index: slice.slice_index,
            },
            inner_radius: slice.inner_radius,
            outer_radius: slice.outer_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
            fill: Rgba::TRANSPARENT,
            stroke: StrokeStyle::NONE,
        }
    }
}

/// Everything that turns with one ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGroup {
    pub ring_index: usize,
    /// Current rotation in [0, 2π).
    pub rotation: f32,
    pub band: Option<SectorShape>,
    pub slices: Vec<SectorShape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A label that follows a ring position without turning itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub ring_index: usize,
    pub radius: f32,
    /// Ring-local angle.
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Anchor point, vertically centered on the text.
    pub pos: [f32; 2],
    pub size: f32,
    pub color: Rgba,
    pub strong: bool,
    /// Text rotation, radians clockwise.
    pub angle: f32,
    pub anchor: Anchor,
    pub orbit: Option<Orbit>,
}

impl Label {
    fn new(text: impl Into<String>, pos: [f32; 2], size: f32, color: Rgba) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color,
            strong: false,
            angle: 0.0,
            anchor: Anchor::Middle,
            orbit: None,
        }
    }

    fn strong(mut self) -> Self {
        self.strong = true;
        self
    }

    fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn orbiting(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CenterDisc {
    pub radius: f32,
    pub fill: Rgba,
    pub stroke: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMarker {
    pub index: usize,
    pub pos: [f32; 2],
    pub radius: f32,
    pub fill: Rgba,
    pub stroke: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramScene {
    /// Cubic Bézier control points per link.
    pub links: Vec<[[f32; 2]; 4]>,
    pub link_stroke: StrokeStyle,
    pub nodes: Vec<NodeMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub variant: Variant,
    /// Target focus zoom; the painter may ease towards it.
    pub focus_scale: f32,
    pub center: Option<CenterDisc>,
    pub rings: Vec<RingGroup>,
    pub labels: Vec<Label>,
    pub dendrogram: Option<DendrogramScene>,
    pub pills: Vec<Pill>,
}

impl Scene {
    pub fn ring(&self, ring_index: usize) -> Option<&RingGroup> {
        self.rings.iter().find(|g| g.ring_index == ring_index)
    }

    /// Every sector shape, bands first.
    pub fn sectors(&self) -> impl Iterator<Item = (&RingGroup, &SectorShape)> + '_ {
        self.rings
            .iter()
            .flat_map(|g| g.band.iter().chain(g.slices.iter()).map(move |s| (g, s)))
    }
}

/// Inputs shared by the build and restyle passes.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub variant: Variant,
    pub geometry: &'a Geometry,
    pub interaction: &'a InteractionState,
    pub hover: Option<&'a PointerTarget>,
    pub focus_scale: f32,
    pub dendrogram: Option<&'a ClusterLayout>,
}

impl SceneContext<'_> {
    fn hovered(&self, target: &PointerTarget) -> bool {
        self.hover == Some(target)
    }
}

/// Build shapes for a fresh geometry snapshot, fully styled.
pub fn build_scene(ctx: &SceneContext<'_>) -> Scene {
    let g = ctx.geometry;
    let variant = ctx.variant;

    let rings = if variant == Variant::Dendrogram {
        Vec::new()
    } else {
        g.rings
            .iter()
            .map(|ring| {
                let band = match variant {
                    Variant::Mandala if ring.slice_count() > 0 => None,
                    _ => Some(SectorShape::band(ring, PointerTarget::Ring(ring.ring_index))),
                };
                let slices = if variant.draws_slices() {
                    g.slices_for(ring.ring_index).map(SectorShape::slice).collect()
                } else {
                    Vec::new()
                };
                RingGroup {
                    ring_index: ring.ring_index,
                    rotation: 0.0,
                    band,
                    slices,
                }
            })
            .collect()
    };

    let center = (variant != Variant::Dendrogram).then(|| CenterDisc {
        radius: g.center_radius,
        fill: palette::BACKGROUND,
        stroke: StrokeStyle::NONE,
    });

    let dendrogram = ctx.dendrogram.map(|layout| DendrogramScene {
        links: layout
            .links()
            .filter_map(|(p, c)| layout.link_curve(p, c))
            .collect(),
        link_stroke: StrokeStyle::new(1.0, palette::LINK.with_opacity(0.6)),
        nodes: layout
            .nodes
            .iter()
            .enumerate()
            .map(|(index, n)| NodeMarker {
                index,
                pos: n.position(),
                radius: n.marker_radius(),
                fill: palette::depth_color(n.depth),
                stroke: StrokeStyle::new(0.8, palette::BACKGROUND),
            })
            .collect(),
    });

    let mut scene = Scene {
        variant,
        focus_scale: 1.0,
        center,
        rings,
        labels: Vec::new(),
        dendrogram,
        pills: Vec::new(),
    };
    restyle(&mut scene, ctx);
    log::debug!(
        "scene built: {:?}, {} ring groups, {} labels",
        variant,
        scene.rings.len(),
        scene.labels.len()
    );
    scene
}

/// Recompute everything that depends on interaction state. Shapes and
/// rotations are left as they are.
pub fn restyle(scene: &mut Scene, ctx: &SceneContext<'_>) {
    let state = ctx.interaction;
    scene.focus_scale = if ctx.variant == Variant::Dendrogram {
        1.0
    } else {
        state.focus_scale(ctx.focus_scale)
    };

    let ring_count = ctx.geometry.ring_count();
    for group in &mut scene.rings {
        let r = group.ring_index;
        if let Some(band) = group.band.as_mut() {
            let hovered = ctx.hovered(&band.target);
            style_band(ctx.variant, band, r, ring_count, state, hovered);
        }
        for slice in &mut group.slices {
            let hovered = ctx.hovered(&slice.target);
            style_slice(ctx.variant, slice, r, state, hovered);
        }
    }

    if let Some(center) = scene.center.as_mut() {
        center.stroke = center_stroke(ctx.variant, state, ctx.hovered(&PointerTarget::Center));
    }

    if let Some(d) = scene.dendrogram.as_mut() {
        for node in &mut d.nodes {
            node.fill = if ctx.hovered(&PointerTarget::Node(node.index)) {
                palette::HOVER_ACCENT
            } else {
                let depth = ctx
                    .dendrogram
                    .and_then(|l| l.nodes.get(node.index))
                    .map_or(0, |n| n.depth);
                palette::depth_color(depth)
            };
        }
    }

    let rotations: Vec<(usize, f32)> = scene.rings.iter().map(|g| (g.ring_index, g.rotation)).collect();
    scene.labels = labels(ctx);
    for label in &mut scene.labels {
        if let Some(orbit) = label.orbit {
            let rotation = rotations
                .iter()
                .find(|(r, _)| *r == orbit.ring_index)
                .map_or(0.0, |&(_, a)| a);
            label.pos = polar_to_cartesian(orbit.radius, orbit.angle + rotation);
        }
    }

    let selected_leaf = state.selected_leaf();
    scene.pills = palette::interpretation_labels(&ctx.geometry.auxiliary)
        .into_iter()
        .map(|label| Pill {
            selected: selected_leaf == Some(label.as_str()),
            label,
        })
        .collect();
}

/// Per-frame update: ring transforms and the labels riding on them.
pub fn apply_rotation(scene: &mut Scene, rotation: &RotationState) {
    for group in &mut scene.rings {
        group.rotation = rotation.wrapped(group.ring_index);
    }
    for label in &mut scene.labels {
        if let Some(orbit) = label.orbit {
            label.pos = polar_to_cartesian(
                orbit.radius,
                orbit.angle + rotation.wrapped(orbit.ring_index),
            );
        }
    }
}

// ─── Styles ─────────────────────────────────────────────────────────

fn style_band(
    variant: Variant,
    band: &mut SectorShape,
    ring: usize,
    ring_count: usize,
    state: &InteractionState,
    hovered: bool,
) {
    let selected = state.selected_ring() == Some(ring);
    match variant {
        Variant::RingExplorer => {
            let base = palette::scale_color(ring, ring_count);
            let tone = if selected { base.brighter(0.8) } else { base.darker(0.4) };
            band.fill = tone.with_opacity(0.85);
            band.stroke = if hovered {
                StrokeStyle::new(3.0, palette::HOVER_ACCENT)
            } else if selected {
                StrokeStyle::new(2.0, palette::HIGHLIGHT)
            } else {
                StrokeStyle::new(1.0, palette::BACKGROUND)
            };
        }
        Variant::Mandala => {
            // only rings without cells keep a band
            band.fill = palette::NEUTRAL.with_opacity(if state.is_dimmed(ring) { 0.15 } else { 0.35 });
            band.stroke = hover_or(hovered, StrokeStyle::new(1.0, palette::OUTLINE_DARK), 2.0, palette::TEXT_BRIGHT);
        }
        Variant::FocusedSunburst | Variant::Dendrogram => {
            let color = palette::ring_color(ring);
            let fill_opacity = match state.selected_ring() {
                Some(s) if s == ring => 0.12,
                Some(_) => 0.04,
                None => 0.08,
            };
            band.fill = color.with_opacity(fill_opacity);
            let idle = StrokeStyle::new(
                if selected { 1.6 } else { 0.9 },
                color.with_opacity(if state.is_dimmed(ring) { 0.35 } else { 0.8 }),
            );
            band.stroke = hover_or(hovered, idle, 1.9, palette::HIGHLIGHT);
        }
    }
}

fn style_slice(
    variant: Variant,
    slice: &mut SectorShape,
    ring: usize,
    state: &InteractionState,
    hovered: bool,
) {
    match variant {
        Variant::Mandala => {
            let segment = match slice.target {
                PointerTarget::Slice { index, .. } => index,
                _ => 0,
            };
            let fill = palette::segment_color(segment).brighter(ring.saturating_sub(1) as f32 * 0.25);
            slice.fill = if state.is_dimmed(ring) { fill.with_opacity(0.45) } else { fill };
            slice.stroke = hover_or(hovered, StrokeStyle::new(1.0, palette::OUTLINE_DARK), 2.0, palette::TEXT_BRIGHT);
        }
        _ => {
            let color = palette::ring_color(ring);
            let selected = state.selected_ring() == Some(ring);
            slice.fill = Rgba::TRANSPARENT;
            let idle = StrokeStyle::new(
                if selected { 1.4 } else { 0.6 },
                color.with_opacity(if state.is_dimmed(ring) { 0.3 } else { 0.6 }),
            );
            slice.stroke = hover_or(hovered, idle, 1.8, palette::HIGHLIGHT);
        }
    }
}

fn hover_or(hovered: bool, idle: StrokeStyle, width: f32, color: Rgba) -> StrokeStyle {
    if hovered {
        StrokeStyle::new(width, color)
    } else {
        idle
    }
}

fn center_stroke(variant: Variant, state: &InteractionState, hovered: bool) -> StrokeStyle {
    match variant {
        Variant::RingExplorer => {
            if hovered {
                StrokeStyle::new(3.0, palette::HOVER_ACCENT)
            } else if state.has_selection() {
                StrokeStyle::new(1.0, palette::SLATE)
            } else {
                StrokeStyle::new(2.0, palette::SELECT_ACCENT)
            }
        }
        Variant::Mandala => hover_or(hovered, StrokeStyle::NONE, 2.0, palette::TEXT_BRIGHT),
        _ => hover_or(
            hovered,
            StrokeStyle::new(1.1, palette::OUTLINE_DARK.with_opacity(0.8)),
            1.6,
            palette::RING_COLORS[0],
        ),
    }
}

// ─── Labels ─────────────────────────────────────────────────────────

fn labels(ctx: &SceneContext<'_>) -> Vec<Label> {
    let mut out = Vec::new();
    match ctx.variant {
        Variant::Dendrogram => dendrogram_labels(ctx, &mut out),
        variant => {
            center_labels(ctx, &mut out);
            match variant {
                Variant::Mandala => mandala_labels(ctx, &mut out),
                _ => ring_labels(ctx, &mut out),
            }
        }
    }
    out
}

fn center_labels(ctx: &SceneContext<'_>, out: &mut Vec<Label>) {
    let g = ctx.geometry;
    let (title_size, title_color) = match ctx.variant {
        Variant::Mandala => (14.0, palette::TEXT),
        Variant::RingExplorer => (13.0, palette::TEXT_BRIGHT),
        _ => (13.0, palette::TEXT),
    };
    out.push(Label::new(g.root_name.clone(), [0.0, -10.0], title_size, title_color).strong());
    for (i, line) in palette::center_subtitle(&g.root_description).into_iter().enumerate() {
        out.push(Label::new(line, [0.0, 7.0 + 12.0 * i as f32], 10.0, palette::TEXT_MUTED));
    }
}

fn ring_labels(ctx: &SceneContext<'_>, out: &mut Vec<Label>) {
    let g = ctx.geometry;
    let focused = ctx.variant == Variant::FocusedSunburst;
    for ring in &g.rings {
        let mid = ring.mid_radius();
        let name = if focused {
            palette::ring_label(ring.ring_index, &ring.source)
        } else {
            ring.source.name.as_str()
        };
        let label = Label::new(name, [0.0, -mid - 4.0], 11.0, palette::TEXT);
        out.push(if focused { label.strong() } else { label });
        if focused {
            if let Some(meta) = palette::ring_meta(ring.ring_index) {
                out.push(Label::new(meta.subline, [0.0, -mid + 11.0], 9.0, palette::TEXT_SUBLINE));
            }
        }
    }

    if !ctx.variant.draws_slices() {
        return;
    }
    let Some(selected) = ctx.interaction.selected_ring() else {
        return;
    };
    for slice in g.slices_for(selected) {
        let orbit = Orbit {
            ring_index: slice.ring_index,
            radius: slice.mid_radius(),
            angle: slice.mid_angle,
        };
        out.push(
            Label::new(slice.name.clone(), polar_to_cartesian(orbit.radius, orbit.angle), 9.0, palette::TEXT)
                .orbiting(orbit),
        );
    }
}

fn mandala_labels(ctx: &SceneContext<'_>, out: &mut Vec<Label>) {
    let g = ctx.geometry;
    let counts: Vec<usize> = g.rings.iter().map(RingSpec::slice_count).collect();
    let Some(ring) = mandala::segment_ring(&counts) else {
        return;
    };
    for slice in g.slices_for(ring) {
        let angle = slice.mid_angle;
        let text_angle = if in_lower_half(angle) { angle + PI } else { angle };
        out.push(
            Label::new(slice.name.clone(), polar_to_cartesian(slice.mid_radius(), angle), 11.0, palette::BACKGROUND)
                .strong()
                .rotated(text_angle),
        );
    }
}

fn dendrogram_labels(ctx: &SceneContext<'_>, out: &mut Vec<Label>) {
    let Some(layout) = ctx.dendrogram else {
        return;
    };
    for (i, n) in layout.nodes.iter().enumerate() {
        let Some(place) = layout.label_placement(i) else {
            continue;
        };
        let (size, strong) = if n.depth <= 1 { (12.0, true) } else { (10.0, false) };
        let color = if n.depth == 0 { palette::TEXT_BRIGHT } else { palette::TEXT };
        let anchor = if place.starts_at_pos { Anchor::Start } else { Anchor::End };
        let label = Label::new(n.name.clone(), place.pos, size, color)
            .rotated(place.angle)
            .anchored(anchor);
        out.push(if strong { label.strong() } else { label });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_geometry, GeometryParams};
    use crate::model::system_model_tree;
    use crate::render::dendrogram::cluster_layout;

    fn geometry() -> Geometry {
        compute_geometry(&system_model_tree(), 900.0, 900.0, 4, &GeometryParams::FOCUSED).unwrap()
    }

    fn ctx<'a>(g: &'a Geometry, s: &'a InteractionState, variant: Variant) -> SceneContext<'a> {
        SceneContext {
            variant,
            geometry: g,
            interaction: s,
            hover: None,
            focus_scale: 1.04,
            dendrogram: None,
        }
    }

    #[test]
    fn focused_scene_has_every_ring_and_slice() {
        let g = geometry();
        let s = InteractionState::new();
        let scene = build_scene(&ctx(&g, &s, Variant::FocusedSunburst));
        assert_eq!(scene.rings.len(), 4);
        let slices: usize = scene.rings.iter().map(|r| r.slices.len()).sum();
        assert_eq!(slices, 30);
        assert!(scene.rings.iter().all(|r| r.band.is_some()));
        assert_eq!(scene.focus_scale, 1.0);
        assert_eq!(scene.pills.len(), 3);
        // no slice labels in the overview
        assert!(scene.labels.iter().all(|l| l.orbit.is_none()));
    }

    #[test]
    fn selection_restyles_without_rebuilding_shapes() {
        let g = geometry();
        let mut s = InteractionState::new();
        let mut scene = build_scene(&ctx(&g, &s, Variant::FocusedSunburst));
        let idle_fill = scene.ring(1).unwrap().band.as_ref().unwrap().fill;
        assert_eq!(idle_fill, palette::ring_color(1).with_opacity(0.08));

        s.click_ring(3);
        s.click_leaf("Visibility");
        restyle(&mut scene, &ctx(&g, &s, Variant::FocusedSunburst));
        assert!((scene.focus_scale - 1.04).abs() < 1e-6);
        let band = |r: usize| scene.ring(r).unwrap().band.as_ref().unwrap().clone();
        assert_eq!(band(3).fill.a, palette::ring_color(3).with_opacity(0.12).a);
        assert_eq!(band(1).fill.a, palette::ring_color(1).with_opacity(0.04).a);
        assert_eq!(band(3).stroke.width, 1.6);
        assert_eq!(band(1).stroke.width, 0.9);

        let slice_labels = scene.labels.iter().filter(|l| l.orbit.is_some()).count();
        assert_eq!(slice_labels, 8);
        assert!(scene.pills.iter().any(|p| p.selected && p.label == "Visibility"));
    }

    #[test]
    fn rotation_moves_groups_and_orbit_labels_only() {
        let g = geometry();
        let mut s = InteractionState::new();
        s.click_ring(2);
        let mut scene = build_scene(&ctx(&g, &s, Variant::FocusedSunburst));
        let before = scene.clone();

        let mut rot = RotationState::for_rings(4);
        rot.set_angle(1, 0.5);
        rot.set_angle(2, 0.25);
        apply_rotation(&mut scene, &rot);

        assert!((scene.ring(1).unwrap().rotation - 0.5).abs() < 1e-6);
        // shapes keep ring-local angles
        assert_eq!(scene.ring(1).unwrap().slices, before.ring(1).unwrap().slices);
        let moved = scene.labels.iter().zip(&before.labels).filter(|(a, b)| a.pos != b.pos).count();
        assert_eq!(moved, 3);
        for l in scene.labels.iter().filter(|l| l.orbit.is_some()) {
            assert_eq!(l.angle, 0.0);
        }
    }

    #[test]
    fn hover_highlights_the_struck_slice() {
        let g = geometry();
        let s = InteractionState::new();
        let target = PointerTarget::Slice { ring: 4, index: 2 };
        let mut c = ctx(&g, &s, Variant::FocusedSunburst);
        c.hover = Some(&target);
        let scene = build_scene(&c);
        let slice = &scene.ring(4).unwrap().slices[2];
        assert_eq!(slice.stroke, StrokeStyle::new(1.8, palette::HIGHLIGHT));
        let other = &scene.ring(4).unwrap().slices[3];
        assert_eq!(other.stroke.width, 0.6);
    }

    #[test]
    fn explorer_draws_bands_only() {
        let g = compute_geometry(&system_model_tree(), 900.0, 900.0, usize::MAX, &GeometryParams::EXPLORER)
            .unwrap();
        let s = InteractionState::new();
        let scene = build_scene(&ctx(&g, &s, Variant::RingExplorer));
        assert_eq!(scene.rings.len(), 5);
        assert!(scene.rings.iter().all(|r| r.slices.is_empty()));
        let center = scene.center.unwrap();
        assert_eq!(center.stroke, StrokeStyle::new(2.0, palette::SELECT_ACCENT));
    }

    #[test]
    fn dendrogram_scene() {
        let g = geometry();
        let s = InteractionState::new();
        let layout = cluster_layout(&system_model_tree(), 300.0);
        let hovered = PointerTarget::Node(1);
        let mut c = ctx(&g, &s, Variant::Dendrogram);
        c.dendrogram = Some(&layout);
        c.hover = Some(&hovered);
        let scene = build_scene(&c);
        assert!(scene.rings.is_empty());
        assert!(scene.center.is_none());
        let d = scene.dendrogram.unwrap();
        assert_eq!(d.nodes.len(), layout.nodes.len());
        assert_eq!(d.links.len(), layout.nodes.len() - 1);
        assert_eq!(d.nodes[1].fill, palette::HOVER_ACCENT);
        assert_eq!(d.nodes[0].fill, palette::depth_color(0));
        assert_eq!(scene.labels.len(), layout.nodes.len());
    }

    #[test]
    fn mandala_labels_flip_on_bottom_half() {
        let tree = mandala::mandala_tree(&system_model_tree(), 4);
        let g = compute_geometry(&tree, 700.0, 700.0, usize::MAX, &GeometryParams::MANDALA).unwrap();
        let s = InteractionState::new();
        let scene = build_scene(&ctx(&g, &s, Variant::Mandala));
        assert!(scene.rings.iter().all(|r| r.band.is_none() && r.slices.len() == 8));
        let cell_labels: Vec<&Label> = scene.labels.iter().filter(|l| l.color == palette::BACKGROUND).collect();
        assert_eq!(cell_labels.len(), 8);
        for l in cell_labels {
            let upright = l.angle.rem_euclid(2.0 * PI);
            assert!(!in_lower_half(upright) || (upright - PI * 1.5).abs() < 1e-4 || (upright - PI * 0.5).abs() < 1e-4);
        }
    }
}
