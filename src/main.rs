// Thermograph - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Headless summary mode (--summary)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use thermograph::app;

pub use thermograph::core;
pub use thermograph::platform;
pub use thermograph::ui;
pub use thermograph::util;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Configure fonts for the egui context.
///
/// On Windows, adds Segoe UI and Segoe UI Symbol from the system font
/// directory ahead of the egui built-ins so symbols such as the degree sign
/// and arrows never render as squares. Elsewhere the defaults are used.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                }
                Err(e) => {
                    tracing::warn!(font = name, error = %e, "Failed to load Windows system font");
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }
            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// Thermograph - temperature time-series viewer.
///
/// Loads a shared spreadsheet export of sensor readings, normalises it, and
/// charts the series with summary statistics.
#[derive(Parser, Debug)]
#[command(name = "thermograph", version, about)]
struct Cli {
    /// Sheet link or local CSV path (defaults to config, then the built-in link).
    link: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Load once, print min/mean/max per series to stdout, and exit.
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Directory containing config.toml (overrides the platform default).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,
}

/// Headless load of the full range and all series; prints the stats table.
fn run_summary(link: &str, options: &platform::fetch::FetchOptions) -> ExitCode {
    match app::load::run_pipeline(link, options) {
        Ok(outcome) => {
            let filter = crate::core::filter::FilterState::select_all(&outcome.table);
            let view = crate::core::filter::apply_filter(&outcome.table, &filter);
            let stats = crate::core::stats::summarize(&view);
            println!(
                "{} rows, {} series (timestamp column '{}', {} rows dropped)",
                outcome.table.len(),
                outcome.table.sensors.len(),
                outcome.report.timestamp_column,
                outcome.report.dropped_rows
            );
            print!("{}", crate::core::stats::render_text_table(&stats));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Summary load failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is read before logging so [logging] can take effect; its
    // warnings are logged once the subscriber exists.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "Thermograph starting"
    );
    for w in &config_warnings {
        tracing::warn!(warning = %w, "Config warning");
    }

    let link = cli.link.clone().unwrap_or_else(|| config.link.clone());
    let fetch_options = platform::fetch::FetchOptions {
        timeout: config.fetch_timeout,
        ..Default::default()
    };

    if cli.summary {
        return run_summary(&link, &fetch_options);
    }

    let mut state = app::state::AppState::new(&config, cli.debug);
    state.link = link;
    state.pending_load = true;
    state.config_dir = Some(config_dir);
    state.config_warnings = config_warnings.iter().map(ToString::to_string).collect();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(util::constants::WINDOW_TITLE)
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::ThermographApp::new(state, fetch_options)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Thermograph GUI: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
