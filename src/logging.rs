// Tracing setup: stderr plus the first writable log file

use crate::config::LoggingConfig;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the configured level applies to
/// this crate, raised to debug when `verbose` is set. Returns the log file in
/// use, if any candidate could be opened.
pub fn initialize_logging(config: &LoggingConfig, verbose: bool) -> Option<PathBuf> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)));

    let opened = open_first_writable(&config.files);
    let file_layer = opened.as_ref().and_then(|(_, file)| file.try_clone().ok()).map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    match opened {
        Some((path, _)) => Some(path),
        None => {
            eprintln!("Warning: Could not set up file logging");
            None
        }
    }
}

/// Opens the first candidate that can be appended to.
fn open_first_writable(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates.iter().find_map(|path| match open_append(path) {
        Ok(file) => Some((path.clone(), file)),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::PermissionDenied {
                eprintln!("Error setting up logging to {}: {}", path.display(), err);
            }
            None
        }
    })
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
