//! Student roster with search.

use eframe::egui::{self, CornerRadius, Margin, RichText, Ui};
use egui_phosphor::regular::{MAGNIFYING_GLASS, USER_PLUS};

use super::app::App;
use super::components::{colors, panel_header, styled_button_with_icon};
use crate::models::Student;

/// Show the students panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Students");

    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.student_search)
                .hint_text("Search by name, roll number, or class")
                .desired_width(320.0),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if styled_button_with_icon(ui, USER_PLUS, "Add Student").clicked() {
                app.info_message = Some("Add student functionality would open a form here".to_string());
            }
        });
    });

    ui.add_space(10.0);

    let total = app.workflow.students().len();
    let matches: Vec<&Student> = app.workflow.filter_students(&app.student_search).collect();

    ui.label(RichText::new(format!("Showing {} of {} students", matches.len(), total)).weak());
    ui.add_space(10.0);

    if matches.is_empty() {
        ui.label(RichText::new("No students match your search").weak());
        return;
    }

    for student in matches {
        student_card(ui, student);
    }
}

fn student_card(ui: &mut Ui, student: &Student) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::symmetric(0, 4))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&student.name).strong());
                    ui.label(RichText::new(format!("Roll: {}", student.roll_number)).color(colors::NEUTRAL));
                    ui.label(RichText::new(&student.email).small().weak());
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("Class {} · Section {}", student.class, student.section)).small());
                });
            });
        });
}
