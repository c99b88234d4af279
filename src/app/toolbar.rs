//! Toolbar rendering for `DiagramApp`.

use eframe::egui;

use radial_diagram::render::Variant;

use super::DiagramApp;

impl DiagramApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let mut variant = self.engine.variant();
            egui::ComboBox::from_id_salt("variant")
                .selected_text(variant.label())
                .show_ui(ui, |ui| {
                    for v in Variant::ALL {
                        ui.selectable_value(&mut variant, v, v.label());
                    }
                });
            self.switch_variant(variant);

            ui.separator();

            // Only the sunburst rotates; the toggle is meaningless elsewhere.
            let mut rotating = self.engine.config().rotation.enabled;
            let toggle = ui.add_enabled(
                self.engine.variant().rotates(),
                egui::Checkbox::new(&mut rotating, "Rotate"),
            );
            if toggle.changed() {
                self.engine.set_rotation_enabled(rotating);
            }

            if ui
                .add_enabled(
                    self.engine.interaction().has_selection(),
                    egui::Button::new("Reset view"),
                )
                .clicked()
            {
                self.engine.reset_view();
            }

            if self.engine.variant() == Variant::FocusedSunburst {
                ui.toggle_value(&mut self.show_legend, "Legend");
            }

            if let Some(ring) = self.engine.interaction().selected_ring() {
                ui.separator();
                ui.weak(format!("ring {} focused", ring));
            }
        });
    }
}
