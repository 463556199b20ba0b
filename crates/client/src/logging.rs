//! File-backed tracing setup.
//!
//! Narration goes to stdout, so diagnostics are written to a per-slot log
//! file instead of stderr.
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn setup_logging(session_key: &str) -> Result<()> {
    let session_log_dir = log_directory().join(session_key);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer thread alive for the whole process.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: slot={}", session_key);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(())
}

/// Platform cache directory, e.g. `~/.cache/battle-farm-saga/logs` on Linux.
fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "battle-farm-saga")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("battle-farm-saga").join("logs"))
}
