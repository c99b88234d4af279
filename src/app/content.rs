//! Content-area rendering for `DiagramApp`.
//!
//! - `draw_diagram`: pointer routing, scene and tooltip
//! - `draw_legend`: bottom legend with interpretation pills
//! - `draw_detail_panel`: right-side panel for the ring explorer

use eframe::egui;

use radial_diagram::interaction::{PointerEvent, PointerTarget};
use radial_diagram::render::paint::{paint_tooltip, swatch, DiagramPainter};
use radial_diagram::render::palette;
use radial_diagram::tooltip::ContainerBounds;

use super::DiagramApp;
use crate::ui::{colored, section_heading, truncate_str};

/// Seconds for the focus zoom to settle.
const ZOOM_EASE: f32 = 0.25;

impl DiagramApp {
    fn bounds(&self) -> ContainerBounds {
        let [w, h] = self.engine.size();
        ContainerBounds::new(w, h)
    }

    // ── Canvas ───────────────────────────────────────────────────────────────

    pub fn draw_diagram(&mut self, ui: &mut egui::Ui) {
        let full = ui.available_rect_before_wrap();
        let side = full.width().min(full.height()).max(1.0);
        let rect = egui::Rect::from_center_size(full.center(), egui::Vec2::splat(side));
        let response = ui.allocate_rect(rect, egui::Sense::click());
        self.engine.resize(side, side);

        let zoom = ui.ctx().animate_value_with_time(
            response.id.with("focus_zoom"),
            self.engine.focus_scale(),
            ZOOM_EASE,
        );
        let dp = DiagramPainter::new(rect.center(), zoom);
        let local = |p: egui::Pos2| [p.x - rect.min.x, p.y - rect.min.y];
        let bounds = self.bounds();

        // Hover: enter/leave/move events for whatever is under the pointer.
        let events = match response.hover_pos() {
            Some(pos) => {
                let target = self.engine.hit_test(dp.to_diagram(pos));
                self.tracker.update(target, local(pos))
            }
            None => {
                let last = ui.ctx().input(|i| i.pointer.latest_pos()).map_or([0.0, 0.0], local);
                self.tracker.exit(last)
            }
        };
        for event in &events {
            self.engine.handle_pointer(event, bounds);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(target) = self.engine.hit_test(dp.to_diagram(pos)) {
                    self.engine
                        .handle_pointer(&PointerEvent::click(target, local(pos)), bounds);
                }
            }
        }

        let painter = ui.painter_at(rect);
        match self.engine.scene() {
            Ok(scene) => dp.paint(&painter, scene),
            Err(e) => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Nothing to render",
                    egui::FontId::proportional(16.0),
                    palette::TEXT_MUTED.to_color32(),
                );
                response.on_hover_text(e.to_string());
                return;
            }
        }

        if let Some(content) = self.engine.tooltip().content() {
            paint_tooltip(&painter, rect, content, self.engine.tooltip().layout());
        }
    }

    // ── Legend ───────────────────────────────────────────────────────────────

    pub fn draw_legend(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.label(colored(palette::LEGEND_TITLE, palette::TEXT_BRIGHT).strong());
        ui.label(colored(palette::LEGEND_INTRO, palette::TEXT_MUTED));

        ui.horizontal_wrapped(|ui| {
            for item in &palette::LEGEND_ITEMS {
                let (r, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                swatch(ui.painter(), r, item.color);
                ui.label(colored(item.title, palette::TEXT).strong())
                    .on_hover_text(item.text);
                ui.add_space(12.0);
            }
        });

        let pills = match self.engine.scene() {
            Ok(scene) => scene.pills.clone(),
            Err(_) => Vec::new(),
        };
        if pills.is_empty() {
            return;
        }

        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            ui.label(colored(palette::PILLS_CAPTION, palette::TEXT_MUTED));
            for pill in &pills {
                let color = if pill.selected {
                    palette::SELECT_ACCENT
                } else {
                    palette::TEXT
                };
                let button = egui::Button::new(colored(pill.label.as_str(), color))
                    .rounding(12.0)
                    .stroke(egui::Stroke::new(1.0, palette::PILL_BORDER.to_color32()))
                    .selected(pill.selected);
                if ui.add(button).clicked() {
                    clicked = Some(pill.label.clone());
                }
            }
        });
        if let Some(label) = clicked {
            let bounds = self.bounds();
            self.engine
                .handle_pointer(&PointerEvent::click(PointerTarget::Leaf(label), [0.0, 0.0]), bounds);
        }

        if let Ok(detail) = self.engine.detail() {
            if let Some(def) = detail.definition {
                ui.horizontal_wrapped(|ui| {
                    ui.label(colored(def.name, palette::SELECT_ACCENT).strong());
                    if let Some(text) = def.description {
                        ui.label(colored(text, palette::TEXT));
                    }
                });
            }
        }
        ui.add_space(4.0);
    }

    // ── Detail panel ─────────────────────────────────────────────────────────

    pub fn draw_detail_panel(&mut self, ui: &mut egui::Ui) {
        let detail = match self.engine.detail() {
            Ok(d) => d,
            Err(e) => {
                ui.label(colored(e.to_string(), palette::TEXT_MUTED));
                return;
            }
        };

        ui.heading(colored(detail.title.as_str(), palette::TEXT_BRIGHT));
        if let Some(text) = &detail.description {
            ui.label(colored(text.as_str(), palette::TEXT));
        }
        ui.separator();

        let overview = detail.ring_index.is_none();
        section_heading(ui, if overview { "Layers" } else { "Components" });

        let mut select = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, c) in detail.components.iter().enumerate() {
                if overview {
                    // overview lists the rings in order, innermost first
                    if ui.link(colored(c.name.as_str(), palette::TEXT_BRIGHT).strong()).clicked() {
                        select = Some(i + 1);
                    }
                } else {
                    ui.label(colored(c.name.as_str(), palette::TEXT_BRIGHT).strong());
                }
                if let Some(text) = &c.description {
                    ui.label(colored(truncate_str(text, 240), palette::TEXT_MUTED));
                }
                ui.add_space(4.0);
            }
            if let Some(note) = detail.empty_note {
                ui.weak(note);
            }
        });

        if let Some(ring) = select {
            let bounds = self.bounds();
            self.engine
                .handle_pointer(&PointerEvent::click(PointerTarget::Ring(ring), [0.0, 0.0]), bounds);
        }
        if !overview && ui.button("Back to overview").clicked() {
            self.engine.reset_view();
        }
    }
}
