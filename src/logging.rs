use anyhow::{Context, Result};
use std::fs::File;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file base path.
pub const LOG_ENV: &str = "DISM_WRAPPER_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so the console looks exactly like the
/// wrapped tool's. Set `DISM_WRAPPER_LOG` to a file path to enable it.
///
/// Log files get unique names so concurrent invocations don't collide:
/// `{path}.{timestamp}.{pid}`
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|p| !p.is_empty()) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match create_log_file(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("WARNING: {e:#}");
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn create_log_file(base: &str) -> Result<File> {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs();
    let unique_path = format!("{}.{}.{}", base, timestamp, pid);

    File::create(&unique_path)
        .with_context(|| format!("Failed to create log file: {}", unique_path))
}
