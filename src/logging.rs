use std::fs;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";

/// Create the directory the rolling file appender writes into.
pub fn prepare_log_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    // No subscriber exists yet, so hold on to the error and report it below
    let dir_result = prepare_log_dir(Path::new(LOG_DIR));

    // Daily rolling file, written off the main thread
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "store_locations.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Console output goes to stderr so stdout stays clean for `sources`
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise info for our crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("store_locations=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Err(e) = dir_result {
        warn!("Failed to create log directory '{}': {}; file logging disabled", LOG_DIR, e);
    }

    // The guard flushes on drop; keep it for the life of the process
    std::mem::forget(guard);
}
