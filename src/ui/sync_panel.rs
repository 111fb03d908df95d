//! Sync panel with summary, connection status, sync control, and log viewer.

use chrono::Local;
use eframe::egui::{self, Color32, ProgressBar, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, TRASH, WIFI_HIGH, WIFI_SLASH};

use super::app::{App, LogLevel, SyncState};
use super::components::{colors, panel_header, section, stat_card, status_dot, styled_button_with_icon};

/// Show the sync panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Sync Status");

    show_summary(app, ui);

    ui.add_space(20.0);

    // Connection + Sync Control side by side
    ui.columns(2, |columns| {
        show_connection(app, &mut columns[0]);
        show_sync_control(app, &mut columns[1]);
    });

    ui.add_space(20.0);

    show_log_viewer(app, ui);
}

fn show_summary(app: &App, ui: &mut Ui) {
    let summary = app.workflow.compute_summary();

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Total Records", &summary.total.to_string(), "In the attendance log");
        stat_card(ui, "Synced", &summary.synced.to_string(), "Uploaded to Google Sheets");
        stat_card(ui, "Pending", &summary.pending.to_string(), "Waiting for sync");
    });
}

fn show_connection(app: &mut App, ui: &mut Ui) {
    section(ui, "Connection", |ui| {
        let status = app.workflow.status();
        let online = status.is_online;
        let sheets = status.google_sheets_connected;
        let last_sync = status.last_sync_label(Local::now());
        let label = status.connection_label();

        egui::Grid::new("connection_grid")
            .num_columns(2)
            .spacing([20.0, 6.0])
            .show(ui, |ui| {
                ui.label("Network:");
                ui.horizontal(|ui| {
                    status_dot(ui, online);
                    ui.label(label);
                });
                ui.end_row();

                ui.label("Google Sheets:");
                ui.horizontal(|ui| {
                    status_dot(ui, sheets);
                    ui.label(if sheets { "Connected" } else { "Disconnected" });
                });
                ui.end_row();

                ui.label("Last Sync:");
                ui.label(last_sync);
                ui.end_row();
            });

        ui.add_space(10.0);

        let (icon, text) = if online {
            (WIFI_SLASH, "Go Offline")
        } else {
            (WIFI_HIGH, "Go Online")
        };
        if styled_button_with_icon(ui, icon, text).clicked() {
            app.toggle_online();
        }
    });
}

fn show_sync_control(app: &mut App, ui: &mut Ui) {
    section(ui, "Sync Control", |ui| {
        // Status indicator
        match &app.sync_state {
            SyncState::Idle => {
                ui.colored_label(colors::NEUTRAL, "Status: Idle");
            }
            SyncState::InProgress { progress, message } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Syncing: {message}"));
                });
                ui.add_space(10.0);
                ui.add(ProgressBar::new(*progress).show_percentage().animate(true));
            }
            SyncState::Completed { records_synced } => {
                ui.colored_label(colors::SUCCESS, format!("Completed: {records_synced} records synced"));
            }
            SyncState::Error(err) => {
                ui.colored_label(colors::ERROR, format!("Error: {err}"));
            }
        }

        if !app.workflow.is_online() {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "Offline: {} scans queued for sync",
                    app.workflow.status().pending_sync_count
                ))
                .small()
                .color(colors::WARNING),
            );
        }

        ui.add_space(15.0);

        // Offline sync attempts are let through so the user gets the error dialog
        let can_sync = !app.is_syncing();
        if ui
            .add_enabled(
                can_sync,
                egui::Button::new(RichText::new(format!("{ARROWS_CLOCKWISE} Sync Now"))),
            )
            .clicked()
        {
            app.start_sync();
        }
    });
}

fn show_log_viewer(app: &mut App, ui: &mut Ui) {
    section(ui, "Activity Log", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} entries", app.log_messages.len())).weak());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if styled_button_with_icon(ui, TRASH, "Clear").clicked() {
                    app.clear_log();
                }
            });
        });

        ui.add_space(10.0);

        ScrollArea::vertical()
            .max_height(200.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                // Constrain width to enable text wrapping
                ui.set_width(ui.available_width());

                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No log entries").weak());
                } else {
                    for entry in &app.log_messages {
                        let color = match entry.level {
                            LogLevel::Info => Color32::GRAY,
                            LogLevel::Success => colors::SUCCESS,
                            LogLevel::Warning => colors::WARNING,
                            LogLevel::Error => colors::ERROR,
                        };

                        let formatted = format!("[{}] {}", entry.timestamp.format("%H:%M:%S"), entry.message);
                        ui.add(egui::Label::new(RichText::new(formatted).color(color)).wrap());
                    }
                }
            });
    });
}
