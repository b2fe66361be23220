//! Employee Directory - desktop client for the employee API.

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use eframe::egui;
use employee_directory as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use app::client::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::location::provider_from_config;
use app::ui::DirectoryApp;

/// Desktop employee directory with table, map and add form.
#[derive(Parser)]
#[command(name = "employee-directory")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Install the stdout subscriber plus a daily log file when a log directory is available.
fn init_logging() -> Option<WorkerGuard> {
    let file_writer = ProjectDirs::from("com", "findofficers", "employee-directory")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .and_then(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("employee-directory")
                .filename_suffix("log")
                .build(dir)
                .ok()
        })
        .map(tracing_appender::non_blocking);

    let (file_layer, guard) = match file_writer {
        Some((writer, guard)) => (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging();

    tracing::info!("Employee Directory starting...");

    // Determine config path based on mode
    let config_path = match cli.config {
        Some(path) => path,
        None if cli.dev => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        None => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    let (config, startup_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), Some(format!("Invalid config, using defaults: {e}")))
        }
    };

    run_app(config, startup_error)
}

/// Run the main application.
fn run_app(config: AppConfig, startup_error: Option<String>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Directory")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    let client = ApiClient::new(&config.api).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    let location = provider_from_config(&config.location);
    tracing::info!("API: {}, location provider: {:?}", config.api.base_url, config.location.provider);

    eframe::run_native(
        "Employee Directory",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(DirectoryApp::new(config, rt, client, location, startup_error)))
        }),
    )
}
