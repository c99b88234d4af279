//! `DiagramApp`, the top-level egui application state.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `toolbar`: variant selector, rotation toggle, reset
//! - `content`: the diagram canvas, legend and detail panel

pub mod content;
pub mod toolbar;

use eframe::egui;

use radial_diagram::interaction::PointerTracker;
use radial_diagram::render::{LabelMode, Variant};
use radial_diagram::DiagramEngine;

// ─── Application state ───────────────────────────────────────────────────────

pub struct DiagramApp {
    pub engine: DiagramEngine,
    pub tracker: PointerTracker,
    pub show_legend: bool,
}

impl DiagramApp {
    pub fn new(engine: DiagramEngine) -> Self {
        Self {
            engine,
            tracker: PointerTracker::new(),
            show_legend: true,
        }
    }

    /// Switch style, dropping whatever the pointer was over.
    pub fn switch_variant(&mut self, variant: Variant) {
        if variant != self.engine.variant() {
            self.tracker = PointerTracker::new();
            self.engine.set_variant(variant);
        }
    }
}

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        if self.show_legend && self.engine.variant() == Variant::FocusedSunburst {
            egui::TopBottomPanel::bottom("legend")
                .resizable(false)
                .show(ctx, |ui| {
                    self.draw_legend(ui);
                });
        }

        if self.engine.variant().label_mode() == LabelMode::SidePanel {
            egui::SidePanel::right("detail")
                .default_width(300.0)
                .show(ctx, |ui| {
                    self.draw_detail_panel(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(radial_diagram::render::palette::BACKGROUND.to_color32()))
            .show(ctx, |ui| {
                self.draw_diagram(ui);
            });

        self.engine.frame(ctx);
    }
}
