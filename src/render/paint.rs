//! egui Painter backend for [`Scene`].
//!
//! Sectors become triangle-strip meshes plus a closed outline; labels are
//! laid out once per frame and drawn as rotated text shapes.

use std::f32::consts::TAU;

use egui::epaint::{CubicBezierShape, TextShape};
use egui::{Color32, FontId, Mesh, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use super::palette::{self, Rgba};
use super::scene::{Anchor, Label, Scene, SectorShape, StrokeStyle};
use crate::geometry::arc::{annular_sector, sector_strip};
use crate::tooltip::{TooltipContent, TooltipLayout};

/// Largest angular step when tessellating arcs.
const ARC_STEP: f32 = TAU / 180.0;

/// Maps diagram space onto the screen.
#[derive(Debug, Clone, Copy)]
pub struct DiagramPainter {
    /// Screen position of the diagram center.
    pub origin: Pos2,
    /// Combined fit and focus zoom.
    pub scale: f32,
}

impl DiagramPainter {
    pub fn new(origin: Pos2, scale: f32) -> Self {
        Self { origin, scale }
    }

    pub fn to_screen(&self, p: [f32; 2]) -> Pos2 {
        self.origin + Vec2::new(p[0], p[1]) * self.scale
    }

    /// Inverse of [`to_screen`](Self::to_screen).
    pub fn to_diagram(&self, pos: Pos2) -> [f32; 2] {
        let d = (pos - self.origin) / self.scale.max(f32::EPSILON);
        [d.x, d.y]
    }

    pub fn paint(&self, painter: &egui::Painter, scene: &Scene) {
        if let Some(d) = &scene.dendrogram {
            let stroke = self.stroke(d.link_stroke);
            for link in &d.links {
                let points = link.map(|p| self.to_screen(p));
                painter.add(CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ));
            }
            for node in &d.nodes {
                painter.circle(
                    self.to_screen(node.pos),
                    node.radius * self.scale,
                    node.fill.to_color32(),
                    self.stroke(node.stroke),
                );
            }
        }

        for (group, sector) in scene.sectors() {
            self.sector(painter, sector, group.rotation);
        }

        if let Some(center) = &scene.center {
            painter.circle(
                self.origin,
                center.radius * self.scale,
                center.fill.to_color32(),
                self.stroke(center.stroke),
            );
        }

        for label in &scene.labels {
            self.label(painter, label);
        }
    }

    fn sector(&self, painter: &egui::Painter, s: &SectorShape, rotation: f32) {
        let start = s.start_angle + rotation;
        let end = s.end_angle + rotation;

        if s.fill.a > 0 {
            let color = s.fill.to_color32();
            let strip = sector_strip(s.inner_radius, s.outer_radius, start, end, ARC_STEP);
            let mut mesh = Mesh::default();
            for (inner, outer) in &strip {
                mesh.colored_vertex(self.to_screen(*inner), color);
                mesh.colored_vertex(self.to_screen(*outer), color);
            }
            for i in 0..strip.len().saturating_sub(1) as u32 {
                let a = 2 * i;
                mesh.add_triangle(a, a + 1, a + 2);
                mesh.add_triangle(a + 1, a + 3, a + 2);
            }
            painter.add(Shape::mesh(mesh));
        }

        if s.stroke.width > 0.0 && s.stroke.color.a > 0 {
            let points: Vec<Pos2> = annular_sector(s.inner_radius, s.outer_radius, start, end, ARC_STEP)
                .into_iter()
                .map(|p| self.to_screen(p))
                .collect();
            painter.add(Shape::closed_line(points, self.stroke(s.stroke)));
        }
    }

    fn label(&self, painter: &egui::Painter, label: &Label) {
        let color = label.color.to_color32();
        let galley = painter.layout_no_wrap(
            label.text.clone(),
            FontId::proportional(label.size * self.scale),
            color,
        );
        let size = galley.size();
        let local = match label.anchor {
            Anchor::Start => Vec2::new(0.0, size.y * 0.5),
            Anchor::Middle => size * 0.5,
            Anchor::End => Vec2::new(size.x, size.y * 0.5),
        };
        let (sin, cos) = label.angle.sin_cos();
        let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
        let pos = self.to_screen(label.pos) - rotated;

        if label.strong {
            // faux bold: a second pass nudged along the baseline
            let nudge = Vec2::new(cos, sin) * 0.4;
            painter.add(TextShape::new(pos + nudge, galley.clone(), color).with_angle(label.angle));
        }
        painter.add(TextShape::new(pos, galley, color).with_angle(label.angle));
    }

    fn stroke(&self, s: StrokeStyle) -> Stroke {
        Stroke::new(s.width, s.color.to_color32())
    }
}

/// Dark rounded box with a bold title and an optional wrapped body.
pub fn paint_tooltip(
    painter: &egui::Painter,
    container: Rect,
    content: &TooltipContent,
    layout: &TooltipLayout,
) {
    const PAD: Vec2 = Vec2::new(10.0, 8.0);
    let wrap = (layout.width - 2.0 * PAD.x).max(20.0);

    let title = painter.layout(
        content.title.clone(),
        FontId::proportional(12.5),
        palette::TEXT.to_color32(),
        wrap,
    );
    let body = content.body.as_ref().map(|b| {
        painter.layout(
            b.clone(),
            FontId::proportional(12.0),
            palette::TEXT.with_opacity(0.85).to_color32(),
            wrap,
        )
    });

    let body_h = body.as_ref().map_or(0.0, |g| g.size().y + 4.0);
    let text_w = body
        .as_ref()
        .map_or(title.size().x, |g| g.size().x.max(title.size().x));
    let size = Vec2::new(text_w, title.size().y + body_h) + PAD * 2.0;

    let mut min = container.min + Vec2::new(content.position.left, content.position.top);
    // keep the real (measured) box inside the container too
    min.x = min.x.min(container.max.x - size.x).max(container.min.x);
    min.y = min.y.min(container.max.y - size.y).max(container.min.y);
    let rect = Rect::from_min_size(min, size);

    painter.rect(rect, Rounding::same(8.0), palette::TOOLTIP_BG.to_color32(), Stroke::NONE);
    let title_pos = rect.min + PAD;
    let title_h = title.size().y;
    painter.galley(title_pos, title.clone(), palette::TEXT.to_color32());
    painter.galley(title_pos + Vec2::new(0.4, 0.0), title, palette::TEXT.to_color32());
    if let Some(body) = body {
        painter.galley(
            title_pos + Vec2::new(0.0, title_h + 4.0),
            body,
            palette::TEXT.to_color32(),
        );
    }
}

/// Small rounded color square, as used by the legend.
pub fn swatch(painter: &egui::Painter, rect: Rect, color: Rgba) {
    painter.rect_filled(rect, Rounding::same(4.0), color.to_color32());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_round_trip() {
        let p = DiagramPainter::new(Pos2::new(400.0, 300.0), 1.04);
        let s = p.to_screen([10.0, -20.0]);
        assert!((s.x - 410.4).abs() < 1e-4);
        assert!((s.y - 279.2).abs() < 1e-4);
        let back = p.to_diagram(s);
        assert!((back[0] - 10.0).abs() < 1e-4);
        assert!((back[1] + 20.0).abs() < 1e-4);
    }

    #[test]
    fn colors_convert_unmultiplied() {
        let c = Rgba::hex("#38bdf8").with_opacity(0.5).to_color32();
        assert_eq!(c.a(), 128);
    }
}
