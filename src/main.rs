//! MDI Editor - multi-document plain text editor
//!
//! Every command line argument is a file to open once the main window is up.

mod app;
mod core;
mod ui;

use std::path::PathBuf;

use eframe::egui;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::MdiEditorApp;
use crate::core::config::AppConfig;

fn main() -> eframe::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(LevelFilter::from(config.log_level))
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Using default settings: {:#}", e);
    }

    let startup_paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    tracing::info!("Starting MDI Editor with {} file(s)...", startup_paths.len());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([400.0, 300.0])
            .with_title("MDI Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "MDI Editor",
        native_options,
        Box::new(move |cc| Ok(Box::new(MdiEditorApp::new(cc, config, startup_paths)))),
    )
}
