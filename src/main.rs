//! Attendance Scanner - QR attendance front-end with offline sync tracking.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eframe::egui;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use attendance_scanner as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::error::AppError;
use app::seed::SeedData;
use app::ui::App;
use app::workflow::AttendanceWorkflow;

/// QR attendance scanner with offline sync tracking.
#[derive(Parser)]
#[command(name = "attendance-scanner")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON seed file with students, records, and status
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Start in offline mode
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };
    let load_result = AppConfig::try_load(&config_path);
    let log_to_file = match &load_result {
        ConfigLoadResult::Loaded(config) => config.ui.log_to_file,
        _ => AppConfig::default().ui.log_to_file,
    };

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(log_to_file && !cli.dev);

    tracing::info!("Attendance Scanner starting...");
    tracing::info!("Config path: {:?}", config_path);

    let config = match load_result {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("{}", AppError::config(e.to_string()));
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Attendance Scanner failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Stdout logging, plus a daily rolling file when enabled.
fn init_logging(log_to_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = if log_to_file {
        let appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "attendance-scanner.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Load the dataset, build the workflow, and run the UI.
fn run(cli: Cli, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let seed_path = cli.seed.or_else(|| config.data.seed_file.clone());
    let seed = match SeedData::load(seed_path.as_deref()) {
        Ok(seed) => seed,
        Err(e) if seed_path.is_some() => {
            tracing::error!("Failed to load seed data: {}. Using bundled sample data", e);
            SeedData::builtin()?
        }
        Err(e) => return Err(e.into()),
    };

    let mut workflow = AttendanceWorkflow::from_seed(seed).with_late_after_hour(config.scanner.late_after_hour);
    if cli.offline && workflow.is_online() {
        workflow.toggle_online();
    }

    tracing::info!(
        "Roster: {} students, {} records, {} pending",
        workflow.students().len(),
        workflow.records().len(),
        workflow.compute_summary().pending
    );

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Attendance Scanner")
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Attendance Scanner",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(App::new(workflow, config, rt)))
        }),
    )?;

    Ok(())
}
