// Application entry point for the Samsung Galaxy Book control panel

// Command line parsing
mod cli;
// Headless get/set/status commands
mod commands;
// Optional TOML configuration
mod config;
// Error types
mod error;
// Import the GUI module containing the main application state
mod gui;
// Attribute store, path catalogue and sensors
mod hardware;
// Tracing subscriber setup
mod logging;
// Data models for attributes and readings
mod models;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use hardware::{Catalog, HardwareAttributeStore};
use std::io;

/// Entry point for the application.
/// Loads configuration, sets up logging, then either opens the panel or runs
/// a headless command.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(root) = cli.root {
        config.sysfs_root = root;
    }

    if let Some(path) = logging::initialize_logging(&config.logging, cli.verbose > 0) {
        tracing::debug!(path = %path.display(), "logging to file");
    }

    let catalog = Catalog::new(&config.sysfs_root, &config.battery);
    let store = HardwareAttributeStore::new();

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(catalog, config),
        Command::Status => commands::status(&store, &catalog, &mut io::stdout().lock()),
        Command::Get { attribute } => {
            commands::get(&store, &catalog, &attribute, &mut io::stdout().lock())
        }
        Command::Set { attribute, value } => commands::set(&store, &catalog, &attribute, &value),
        Command::Choices => commands::choices(&store, &catalog, &mut io::stdout().lock()),
    }
}

/// Opens the eframe window and blocks until it is closed.
fn run_gui(catalog: Catalog, config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Samsung Galaxy Book Control")
            .with_inner_size([800.0, 800.0]),
        ..Default::default()
    };

    let intervals = config.intervals;
    eframe::run_native(
        "Samsung Galaxy Book Control",
        options,
        Box::new(move |cc| Ok(Box::new(gui::AppState::new(cc, catalog, &intervals)))),
    )
    .map_err(|e| anyhow!("failed to run the control panel: {}", e))
}
