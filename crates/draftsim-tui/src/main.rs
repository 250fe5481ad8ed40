// Draft simulator entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the catalogue from the configured source
// 4. Build the draft engine
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::sync::Arc;

use draftsim_core::config;
use draftsim_core::draft::DraftEngine;
use draftsim_tui::app;
use draftsim_tui::loader;
use draftsim_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Draft simulator starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} bans, {} picks per side, rules {:?}",
        config.board.bans, config.board.picks, config.rules
    );

    // 3. Load the catalogue
    let source = loader::source_from_config(&config.catalogue)
        .context("failed to build catalogue source")?;
    info!("Loading catalogue from {}", source.describe());
    let catalogue = match source.load().await {
        Ok(catalogue) => Arc::new(catalogue),
        Err(e) => {
            error!("Catalogue load failed: {}", e);
            eprintln!("Failed to load champions: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} entries (version {})",
        catalogue.len(),
        catalogue.version().unwrap_or("unversioned")
    );

    // 4. Build the draft engine
    let engine = DraftEngine::new(catalogue.clone(), config.board, config.rules);
    let app_state = app::AppState::new(engine);

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocking until user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, catalogue, config.board).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Draft simulator shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftsim.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("draftsim=info,draftsim_tui=info,draftsim_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
