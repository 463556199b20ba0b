//! Battle Farm Saga console client.
//!
//! Composition root that assembles a file-backed [`Runtime`] driven by the
//! [`Autopilot`] and prints the session log as it grows.
//!
//! # Examples
//!
//! ```bash
//! # Fixed seed, bincode saves, stop after 60 turns
//! SAGA_SEED=42 SAGA_SAVE_FORMAT=bincode SAGA_MAX_TURNS=60 cargo run -p saga-client
//!
//! # Continue the autosaved session
//! SAGA_RESUME=true cargo run -p saga-client
//! ```
mod autopilot;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;

use autopilot::Autopilot;
use config::ClientConfig;
use saga_core::{LogEntry, SessionStatus};
use saga_runtime::{Event, FileSnapshotRepository, Runtime, SnapshotRepository, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(&config.session_key)?;

    let save_dir = config
        .save_data_dir
        .clone()
        .or_else(FileSnapshotRepository::default_dir)
        .unwrap_or_else(|| PathBuf::from("saves"));
    let repository: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(&save_dir, config.save_format)?);
    tracing::info!(
        "Save slots in {} ({})",
        save_dir.display(),
        config.save_format
    );

    let mut builder = Runtime::builder()
        .config(config.runtime_config())
        .repository(repository.clone())
        .provider(Autopilot::default());
    if config.resume && repository.exists(&config.session_key)? {
        tracing::info!("Resuming slot {}", config.session_key);
        builder = builder.resume_from(config.session_key.clone());
    }
    let mut runtime = builder.build().await?;

    let handle = runtime.handle();
    let initial = handle.query_session().await?;
    initial.log.iter().for_each(print_entry);

    let mut log_rx = handle.subscribe(Topic::Log);
    let printer = tokio::spawn(async move {
        loop {
            match log_rx.recv().await {
                Ok(Event::Log(log)) => log.entries.iter().for_each(print_entry),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Log printer lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    if initial.status == SessionStatus::Idle {
        handle.start(config.player_name.clone()).await?;
    }

    let last = runtime.run_until(config.max_turns).await?;
    tracing::info!(
        "Session {} stopped: {} at wave {}, turn {}",
        last.id,
        last.status,
        last.wave,
        last.turn
    );

    drop(handle);
    runtime.shutdown().await?;
    printer.await?;

    println!();
    match last.status {
        SessionStatus::Defeat => println!(
            "{} fell on wave {} after {} turns.",
            last.player.name, last.wave, last.turn
        ),
        _ => println!(
            "{} holds on wave {} at turn {} (slot \"{}\").",
            last.player.name, last.wave, last.turn, config.session_key
        ),
    }

    Ok(())
}

fn print_entry(entry: &LogEntry) {
    println!("{:>6} | {}", entry.tone.as_ref(), entry.text);
}
