//! Main application UI.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Color32, CornerRadius, Layout, Margin, ProgressBar, RichText};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, LIST_CHECKS, QR_CODE, USERS};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export;
use crate::models::{AttendanceRecord, RecordFilter, Student};
use crate::scanner::{ScanProgress, ScanSource, SyncProgress, run_scan_background, run_sync_background};
use crate::workflow::{AttendanceWorkflow, WorkflowError};

use super::components::{colors, status_dot};
use super::{records_panel, scanner_panel, students_panel, sync_panel};

const HELP_TEXT: &str = "Keyboard Shortcuts:

  Ctrl + O: Toggle Online/Offline status
  Ctrl + H: Show this help

Demo Features:
  - Simulated QR code scanning
  - Offline-first record keeping
  - Live sync status

Navigation:
  - Use the bottom bar to switch between pages
  - Search students by name, roll number, or class
  - Filter attendance records by sync status
  - View the system architecture from the Help menu

Try uploading any image file to simulate QR code scanning.
An image named after a roll number (e.g. 2025003.png) scans that student.";

const ARCHITECTURE_LAYERS: [(&str, &str); 4] = [
    ("QR Scanner", "Camera or uploaded image produces a roll number"),
    ("Attendance Workflow", "Roster lookup, record creation, status counters"),
    ("Offline Queue", "Records scanned while offline stay pending"),
    ("Google Sheets", "Manual sync marks pending records as synced"),
];

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Scanner,
    Students,
    Records,
    Sync,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Scanner, Panel::Students, Panel::Records, Panel::Sync];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Scanner => "Scanner",
            Panel::Students => "Students",
            Panel::Records => "Records",
            Panel::Sync => "Sync",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Panel::Scanner => QR_CODE,
            Panel::Students => USERS,
            Panel::Records => LIST_CHECKS,
            Panel::Sync => ARROWS_CLOCKWISE,
        }
    }
}

/// Scan operation state.
#[derive(Debug, Clone, Default)]
pub enum ScanState {
    #[default]
    Idle,
    InProgress {
        label: &'static str,
    },
}

/// Sync operation state.
#[derive(Debug, Clone, Default)]
pub enum SyncState {
    #[default]
    Idle,
    InProgress {
        progress: f32,
        message: String,
    },
    Completed {
        records_synced: usize,
    },
    Error(String),
}

/// Outcome shown in the scan result dialog.
#[derive(Debug, Clone)]
pub enum ScanResult {
    Recorded { student: Student, record: AttendanceRecord },
    Failed(String),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Transient banner shown after toggling connectivity.
struct Notification {
    message: String,
    online: bool,
    shown_at: Instant,
}

/// Main application state.
pub struct App {
    rt: tokio::runtime::Runtime,
    pub config: AppConfig,

    // Attendance state, written only from the UI thread
    pub workflow: AttendanceWorkflow,

    // Navigation
    pub current_panel: Panel,

    // Scan state
    pub scan_state: ScanState,
    scan_progress_rx: Option<mpsc::UnboundedReceiver<ScanProgress>>,
    pub scan_result: Option<ScanResult>,
    pub manual_roll_input: String,

    // Sync state
    pub sync_state: SyncState,
    sync_progress_rx: Option<mpsc::UnboundedReceiver<SyncProgress>>,
    last_background_check: Instant,

    // Search/filter state
    pub student_search: String,
    pub record_filter: RecordFilter,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub info_message: Option<String>,
    pub show_help: bool,
    pub show_architecture: bool,
    notification: Option<Notification>,
}

impl App {
    pub fn new(workflow: AttendanceWorkflow, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let mut app = Self {
            rt,
            config,
            workflow,
            current_panel: Panel::default(),
            scan_state: ScanState::default(),
            scan_progress_rx: None,
            scan_result: None,
            manual_roll_input: String::new(),
            sync_state: SyncState::default(),
            sync_progress_rx: None,
            last_background_check: Instant::now(),
            student_search: String::new(),
            record_filter: RecordFilter::default(),
            log_messages: Vec::new(),
            error_message: None,
            success_message: None,
            info_message: None,
            show_help: false,
            show_architecture: false,
            notification: None,
        };

        let status = app.workflow.status();
        let message = format!(
            "Loaded {} students and {} records ({})",
            app.workflow.students().len(),
            app.workflow.records().len(),
            status.connection_label()
        );
        app.log_info(message);

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.scan_state, ScanState::InProgress { .. })
    }

    pub fn is_syncing(&self) -> bool {
        matches!(self.sync_state, SyncState::InProgress { .. })
    }

    /// Start a simulated scan. Ignored while another scan is in flight.
    pub fn start_scan(&mut self, source: ScanSource) {
        if self.is_scanning() {
            return;
        }

        let delay = match source {
            ScanSource::Camera => self.config.scanner.scan_delay(),
            ScanSource::ImageUpload(_) => self.config.scanner.upload_delay(),
        };
        let roster: Vec<String> = self
            .workflow
            .students()
            .iter()
            .map(|s| s.roll_number.clone())
            .collect();

        let (tx, rx) = mpsc::unbounded_channel();
        self.scan_progress_rx = Some(rx);
        self.scan_state = ScanState::InProgress {
            label: source.busy_label(),
        };

        self.rt.spawn(run_scan_background(source, roster, delay, tx));
    }

    /// Pick an image and scan it.
    pub fn scan_image(&mut self) {
        if let Some(path) = export::show_image_dialog() {
            self.log_info(format!("Processing QR image {}", path.display()));
            self.start_scan(ScanSource::ImageUpload(path));
        }
    }

    /// Record the roll number typed into the manual entry box.
    pub fn submit_manual_roll(&mut self) {
        let roll = self.manual_roll_input.trim().to_string();
        if roll.is_empty() {
            return;
        }
        self.apply_scan(&roll);
        self.manual_roll_input.clear();
    }

    /// Run a scan through the workflow and show the result.
    fn apply_scan(&mut self, roll_number: &str) {
        match self.workflow.process_scan(roll_number).into_result() {
            Ok((student, record)) => {
                self.log_success(format!(
                    "Attendance recorded: {} ({}) - {}, {}",
                    student.name,
                    student.roll_number,
                    record.status,
                    record.sync_label()
                ));
                self.scan_result = Some(ScanResult::Recorded { student, record });
            }
            Err(e) => {
                self.log_error(e.to_string());
                self.scan_result = Some(ScanResult::Failed(e.to_string()));
            }
        }
    }

    /// Start manual sync. Refused up front while offline.
    pub fn start_sync(&mut self) {
        if self.is_syncing() {
            return;
        }
        if !self.workflow.is_online() {
            let e = WorkflowError::Offline;
            self.log_warning(e.to_string());
            self.error_message = Some(e.to_string());
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.sync_progress_rx = Some(rx);
        self.sync_state = SyncState::InProgress {
            progress: 0.0,
            message: "Starting...".to_string(),
        };
        self.log_info("Manual sync started");

        let delay = self.config.sync.sync_delay();
        self.rt.spawn(run_sync_background(delay, tx));
    }

    /// Apply the sync once the remote side has acknowledged.
    fn finish_sync(&mut self) {
        match self.workflow.manual_sync() {
            Ok(outcome) => {
                self.sync_state = SyncState::Completed {
                    records_synced: outcome.records_synced,
                };
                self.log_success(format!("Sync completed: {}", outcome.summary()));
                self.success_message = Some("Sync completed successfully!".to_string());
            }
            Err(e) => {
                self.sync_state = SyncState::Error(e.to_string());
                self.log_error(e.to_string());
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Flip online/offline and show a notification.
    pub fn toggle_online(&mut self) {
        let online = self.workflow.toggle_online();
        let label = self.workflow.status().connection_label();
        if online {
            self.log_success(format!("Status: {label}"));
        } else {
            self.log_warning(format!("Status: {label}"));
        }
        self.notification = Some(Notification {
            message: format!("Status: {label}"),
            online,
            shown_at: Instant::now(),
        });
    }

    /// Export the records currently shown to Excel.
    pub fn export_records(&mut self) {
        let default_name = export::generate_export_filename("attendance_records");
        let Some(path) = export::show_save_dialog(&default_name) else {
            return;
        };

        let records: Vec<&AttendanceRecord> = self.workflow.filter_records(self.record_filter).collect();
        let count = records.len();

        match export::export_records_to_excel(&records, &path).map_err(AppError::from) {
            Ok(()) => {
                self.success_message = Some(format!("Exported {} records to: {}", count, path.display()));
                self.log_success(format!("Exported records: {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.error_message = Some(format!("Export failed: {}", e));
                self.log_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        // Poll scan progress
        if let Some(mut rx) = self.scan_progress_rx.take() {
            let mut done = false;
            loop {
                match rx.try_recv() {
                    Ok(ScanProgress::Started) => {}
                    Ok(ScanProgress::Decoded { roll_number }) => {
                        self.scan_state = ScanState::Idle;
                        self.apply_scan(&roll_number);
                        done = true;
                    }
                    Ok(ScanProgress::Failed(e)) => {
                        self.scan_state = ScanState::Idle;
                        self.log_error(format!("Scan failed: {e}"));
                        self.scan_result = Some(ScanResult::Failed(e));
                        done = true;
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        if !done {
                            let e = AppError::task("scanner task stopped unexpectedly");
                            self.scan_state = ScanState::Idle;
                            self.log_error(e.to_string());
                            done = true;
                        }
                        break;
                    }
                }
            }
            if !done {
                self.scan_progress_rx = Some(rx);
            }
        }

        // Poll sync progress
        if let Some(mut rx) = self.sync_progress_rx.take() {
            let mut done = false;
            loop {
                match rx.try_recv() {
                    Ok(SyncProgress::Started) => {
                        self.sync_state = SyncState::InProgress {
                            progress: 0.0,
                            message: "Preparing sync...".to_string(),
                        };
                    }
                    Ok(SyncProgress::Progress { percent, message }) => {
                        self.sync_state = SyncState::InProgress {
                            progress: percent,
                            message,
                        };
                    }
                    Ok(SyncProgress::Ready) => {
                        self.finish_sync();
                        done = true;
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        if !done {
                            let e = AppError::task("sync task stopped unexpectedly");
                            self.sync_state = SyncState::Error(e.to_string());
                            self.log_error(e.to_string());
                            done = true;
                        }
                        break;
                    }
                }
            }
            if !done {
                self.sync_progress_rx = Some(rx);
            }
        }
    }

    /// Periodic check for records stuck offline.
    fn background_sync_check(&mut self) {
        if self.last_background_check.elapsed() < self.config.sync.background_check_interval() {
            return;
        }
        self.last_background_check = Instant::now();

        let status = self.workflow.status();
        if !status.is_online && status.pending_sync_count > 0 {
            let message = format!(
                "Background sync attempt deferred: offline with {} pending",
                status.pending_sync_count
            );
            tracing::info!("{}", message);
            self.log_info(message);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::O)) {
            self.toggle_online();
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::H)) {
            self.show_help = true;
        }
    }

    /// Render menu bar with connection status.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Tools", |ui| {
                    let label = if self.workflow.is_online() {
                        "Go Offline"
                    } else {
                        "Go Online"
                    };
                    if ui.button(label).clicked() {
                        self.toggle_online();
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(!self.is_syncing(), egui::Button::new("Manual Sync"))
                        .clicked()
                    {
                        self.start_sync();
                        ui.close();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Keyboard Shortcuts").clicked() {
                        self.show_help = true;
                        ui.close();
                    }
                    if ui.button("Architecture").clicked() {
                        self.show_architecture = true;
                        ui.close();
                    }
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let online = self.workflow.is_online();
                    ui.label(self.workflow.status().connection_label());
                    status_dot(ui, online);
                });
            });
        });
    }

    /// Render bottom navigation with sync progress.
    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("nav_bar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    for panel in Panel::ALL {
                        let text = RichText::new(format!("{} {}", panel.icon(), panel.name())).size(15.0);
                        if ui.selectable_label(self.current_panel == panel, text).clicked() {
                            self.current_panel = panel;
                        }
                        ui.add_space(12.0);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let SyncState::InProgress { progress, message } = &self.sync_state {
                            ui.add(
                                ProgressBar::new(*progress)
                                    .desired_width(250.0)
                                    .text(message.as_str())
                                    .animate(true),
                            );
                        }
                    });
                });
            });
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let timeout = Duration::from_secs(self.config.ui.notification_secs);
        let Some(notification) = &self.notification else {
            return;
        };
        if notification.shown_at.elapsed() >= timeout {
            self.notification = None;
            return;
        }

        let fill = if notification.online { colors::SUCCESS } else { colors::WARNING };
        egui::Area::new(egui::Id::new("status_notification"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 80.0])
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .inner_margin(Margin::symmetric(24, 12))
                    .corner_radius(CornerRadius::same(8))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&notification.message).color(Color32::WHITE).strong());
                    });
            });
        ctx.request_repaint_after(timeout.saturating_sub(notification.shown_at.elapsed()));
    }

    /// Render scan result dialog.
    fn show_scan_result(&mut self, ctx: &egui::Context) {
        let Some(result) = self.scan_result.clone() else {
            return;
        };

        let mut close = false;
        egui::Window::new("Scan Result")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| match &result {
                ScanResult::Recorded { student, record } => {
                    ui.colored_label(colors::SUCCESS, RichText::new("Attendance Recorded").heading());
                    ui.add_space(10.0);

                    egui::Grid::new("scan_result_grid")
                        .num_columns(2)
                        .spacing([20.0, 6.0])
                        .show(ui, |ui| {
                            ui.strong("Name:");
                            ui.label(&student.name);
                            ui.end_row();

                            ui.strong("Roll Number:");
                            ui.label(&student.roll_number);
                            ui.end_row();

                            ui.strong("Class:");
                            ui.label(&student.class);
                            ui.end_row();

                            ui.strong("Status:");
                            ui.label(records_panel::status_text(record));
                            ui.end_row();

                            ui.strong("Time:");
                            ui.label(record.time.format("%H:%M:%S").to_string());
                            ui.end_row();

                            ui.strong("Sync Status:");
                            ui.label(records_panel::sync_text(record));
                            ui.end_row();
                        });

                    ui.add_space(10.0);
                    if ui.button("Continue").clicked() {
                        close = true;
                    }
                }
                ScanResult::Failed(message) => {
                    ui.colored_label(colors::ERROR, RichText::new("Scan Failed").heading());
                    ui.add_space(10.0);
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("Try Again").clicked() {
                        close = true;
                    }
                }
            });

        if close {
            self.scan_result = None;
        }
    }

    /// Render modal dialogs (error, success, info, help, architecture).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        if let Some(ref msg) = self.info_message.clone() {
            egui::Window::new("Info")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.info_message = None;
                    }
                });
        }

        if self.show_help {
            let mut open = true;
            egui::Window::new("Attendance Scanner Help")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(RichText::new(HELP_TEXT).monospace());
                });
            self.show_help = open;
        }

        if self.show_architecture {
            let mut open = true;
            egui::Window::new("System Architecture")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    for (i, (layer, description)) in ARCHITECTURE_LAYERS.iter().enumerate() {
                        if i > 0 {
                            ui.vertical_centered(|ui| ui.label(RichText::new("↓").weak()));
                        }
                        egui::Frame::new()
                            .fill(ui.style().visuals.extreme_bg_color)
                            .inner_margin(Margin::same(10))
                            .corner_radius(CornerRadius::same(6))
                            .show(ui, |ui| {
                                ui.set_min_width(320.0);
                                ui.label(RichText::new(*layer).strong());
                                ui.label(RichText::new(*description).small().weak());
                            });
                    }
                });
            self.show_architecture = open;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();
        self.background_sync_check();
        self.handle_shortcuts(ctx);

        // Request repaint during async operations
        if self.is_scanning() || self.is_syncing() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.config.sync.background_check_interval());
        }

        // Menu bar
        self.show_menu_bar(ctx);

        // Navigation bar
        self.show_nav_bar(ctx);

        // Dialogs
        self.show_scan_result(ctx);
        self.show_dialogs(ctx);
        self.show_notification(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.current_panel {
                Panel::Scanner => scanner_panel::show(self, ui),
                Panel::Students => students_panel::show(self, ui),
                Panel::Records => records_panel::show(self, ui),
                Panel::Sync => sync_panel::show(self, ui),
            });
        });
    }
}
