use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter, e.g. `IONQUIZ_LOG=debug`.
pub const LOG_ENV: &str = "IONQUIZ_LOG";

/// Send tracing output to `path` when `IONQUIZ_LOG` is set.
///
/// The terminal belongs to the TUI, so nothing is ever written to stdout or
/// stderr. Returns whether a subscriber was installed.
pub fn init(path: &Path) -> std::io::Result<bool> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => return Ok(false),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();

    Ok(installed)
}
