//! Small egui helpers shared by the app panels.

use eframe::egui;

use radial_diagram::render::palette::{self, Rgba};

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t.trim_end())
    }
}

pub fn colored(text: impl Into<String>, color: Rgba) -> egui::RichText {
    egui::RichText::new(text).color(color.to_color32())
}

/// Accent-colored small heading with a little space above it.
pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(colored(text, palette::HEADING_ACCENT).strong());
}
