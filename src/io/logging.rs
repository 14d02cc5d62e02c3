use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "STINT_LOG";

/// Send tracing output to `<data_dir>/stint.log`.
///
/// The terminal belongs to the TUI, so if the file cannot be opened logging
/// is simply off.
pub fn init(data_dir: &Path) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let log_path = data_dir.join("stint.log");

    let file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match file {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init();
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(_) => {
            let _ = tracing_subscriber::registry().with(filter).try_init();
        }
    }
}
