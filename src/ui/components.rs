//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const ACCENT: Color32 = Color32::from_rgb(100, 150, 230);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {label}")))
}

/// Larger, accented button with a leading icon. Disabled when `enabled` is false.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str, enabled: bool) -> Response {
    let text = RichText::new(format!("{icon} {label}")).size(16.0).strong();
    ui.add_enabled(
        enabled,
        egui::Button::new(text)
            .fill(colors::ACCENT.gamma_multiply(0.6))
            .min_size(egui::vec2(220.0, 40.0)),
    )
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Framed section with a bold title.
pub fn section<R>(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong());
            ui.add_space(10.0);
            add_contents(ui)
        })
        .inner
}

/// Small filled circle, green when `ok`.
pub fn status_dot(ui: &mut Ui, ok: bool) {
    let color = if ok { colors::SUCCESS } else { colors::WARNING };
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, color);
}
