//! Attendance records table with sync-state filter and Excel export.

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{CHECK_CIRCLE, CLOCK, FILE_XLS};

use super::app::App;
use super::components::{colors, panel_header, styled_button_with_icon};
use crate::models::{AttendanceRecord, AttendanceStatus, RecordFilter};

/// Colored status label for a record.
pub fn status_text(record: &AttendanceRecord) -> RichText {
    let color = match record.status {
        AttendanceStatus::Present => colors::SUCCESS,
        AttendanceStatus::Late => colors::WARNING,
    };
    RichText::new(record.status.as_str()).color(color)
}

/// Sync badge for a record.
pub fn sync_text(record: &AttendanceRecord) -> RichText {
    if record.synced {
        RichText::new(format!("{CHECK_CIRCLE} {}", record.sync_label())).color(colors::SUCCESS)
    } else {
        RichText::new(format!("{CLOCK} {}", record.sync_label())).color(colors::WARNING)
    }
}

/// Show the records panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Attendance Records");

    ui.horizontal(|ui| {
        for filter in RecordFilter::ALL {
            if ui.selectable_label(app.record_filter == filter, filter.name()).clicked() {
                app.record_filter = filter;
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export").clicked() {
                app.export_records();
            }
        });
    });

    ui.add_space(10.0);

    let records: Vec<&AttendanceRecord> = app.workflow.filter_records(app.record_filter).collect();

    if records.is_empty() {
        ui.label(RichText::new("No records").weak());
        return;
    }

    // The central panel already scrolls
    TableBuilder::new(ui)
        .vscroll(false)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(150.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(90.0))
        .header(24.0, |mut header| {
            for title in ["ID", "Roll No", "Name", "Date", "Time", "Status", "Sync"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(22.0, records.len(), |mut row| {
                let record = records[row.index()];
                row.col(|ui| {
                    ui.label(record.id.to_string());
                });
                row.col(|ui| {
                    ui.label(&record.roll_number);
                });
                row.col(|ui| {
                    ui.label(&record.name);
                });
                row.col(|ui| {
                    ui.label(record.date.format("%Y-%m-%d").to_string());
                });
                row.col(|ui| {
                    ui.label(record.time.format("%H:%M:%S").to_string());
                });
                row.col(|ui| {
                    ui.label(status_text(record));
                });
                row.col(|ui| {
                    ui.label(sync_text(record));
                });
            });
        });
}
