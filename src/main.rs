// simed - Terminal scene editor for the particle simulator
//
// Edits scene files for the particle-collision simulator: a table of
// particle populations, each with a spawn polygon, plus the piston.
//
// Architecture:
// - sim: domain model (scene, populations, piston) and the binary wire format
// - edit: master-detail editing core (population table, selection routing)
// - TUI (ratatui): table and detail panels in a terminal interface

mod cli;
mod config;
mod edit;
mod logging;
mod sim;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use sim::Scene;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show, --reset, --path)
    // If a command was handled, exit early
    let args = cli::Cli::parse();
    if cli::handle_cli(&args) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Create log buffer; the TUI reads it each frame
    let log_buffer = LogBuffer::new();

    // Initialize tracing. Logs are captured to the buffer (writing to stdout
    // would garble the alternate screen), optionally also to rotating files.
    //
    // Precedence: SIMED_LOG env var > config file > default "info"
    let default_filter = format!("simed={}", config.logging.level);
    let filter = EnvFilter::try_from_env("SIMED_LOG").unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to ensure
    // file logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to buffer-only logging
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
                None
            } else {
                // Rolling file appender based on configured rotation
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Wrap in non-blocking writer (writes happen in a background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // Pick the starting scene: --sample, an existing file, or a new empty scene
    let scene = if args.sample {
        tracing::info!("Starting from the built-in sample scene");
        Scene::sample()
    } else if let Some(path) = &args.scene {
        if path.exists() {
            let scene = Scene::load(path)
                .with_context(|| format!("failed to open scene {}", path.display()))?;
            tracing::info!(
                populations = scene.populations.len(),
                "Loaded scene from {}",
                path.display()
            );
            scene
        } else {
            tracing::info!("Scene file {} does not exist yet, starting empty", path.display());
            Scene::default()
        }
    } else {
        Scene::default()
    };

    // Run the TUI; blocks until the user quits
    tui::run(scene, args.scene.clone(), config, log_buffer)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
