//! Scanner page: camera scan, image upload, manual entry, and today's activity.

use chrono::Local;
use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CAMERA, IMAGE, KEYBOARD};

use super::app::{App, ScanState};
use super::components::{colors, panel_header, primary_button_with_icon, section, stat_card, styled_button_with_icon};
use super::records_panel::{status_text, sync_text};
use crate::scanner::ScanSource;

const RECENT_LIMIT: usize = 5;

/// Show the scanner panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "QR Attendance Scanner");

    show_scan_controls(app, ui);

    ui.add_space(20.0);

    show_quick_stats(app, ui);

    ui.add_space(20.0);

    show_recent_activity(app, ui);
}

fn show_scan_controls(app: &mut App, ui: &mut Ui) {
    section(ui, "Scan QR Code", |ui| {
        let idle = !app.is_scanning();

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, CAMERA, "Start QR Scan", idle).clicked() {
                app.start_scan(ScanSource::Camera);
            }
            ui.add_space(10.0);
            if primary_button_with_icon(ui, IMAGE, "Upload QR Image", idle).clicked() {
                app.scan_image();
            }

            if let ScanState::InProgress { label } = &app.scan_state {
                ui.add_space(10.0);
                ui.spinner();
                ui.label(*label);
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label(KEYBOARD);
            ui.label("Roll number:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut app.manual_roll_input)
                    .hint_text("e.g. 2025003")
                    .desired_width(160.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if styled_button_with_icon(ui, KEYBOARD, "Record").clicked() || submitted {
                app.submit_manual_roll();
            }
        });
    });
}

fn show_quick_stats(app: &App, ui: &mut Ui) {
    let status = app.workflow.status();
    let summary = app.workflow.compute_summary();

    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            "Scans Today",
            &status.total_scans_today.to_string(),
            "Since the log started",
        );
        stat_card(
            ui,
            "Pending Sync",
            &status.pending_sync_count.to_string(),
            &format!("{} pending in log", summary.pending),
        );
        stat_card(
            ui,
            "Last Sync",
            &status.last_sync_label(Local::now()),
            if status.google_sheets_connected {
                "Google Sheets connected"
            } else {
                "Google Sheets disconnected"
            },
        );
    });
}

fn show_recent_activity(app: &App, ui: &mut Ui) {
    section(ui, "Recent Activity", |ui| {
        let records = app.workflow.records();
        if records.is_empty() {
            ui.label(RichText::new("No scans yet").weak());
            return;
        }

        egui::Grid::new("recent_activity_grid")
            .num_columns(4)
            .striped(true)
            .spacing([20.0, 6.0])
            .show(ui, |ui| {
                for record in records.iter().take(RECENT_LIMIT) {
                    ui.label(RichText::new(&record.name).strong());
                    ui.label(RichText::new(&record.roll_number).color(colors::NEUTRAL));
                    ui.label(format!("{} {}", status_text(record).text(), record.time.format("%H:%M")));
                    ui.label(sync_text(record));
                    ui.end_row();
                }
            });
    });
}
