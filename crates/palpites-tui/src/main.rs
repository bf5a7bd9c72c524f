// palpites entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (copying defaults on first run)
// 3. Load fixtures
// 4. Build the form transport
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use directories::ProjectDirs;
use tokio::sync::mpsc;
use tracing::{error, info};

use palpites_app::app::{self, AppState};
use palpites_app::transport::FormspreeTransport;
use palpites_core::config;
use palpites_core::fixture;
use palpites_tui::tui;

const DEFAULT_LOG_FILTER: &str = "palpites=info,palpites_tui=info,palpites_app=info,palpites_core=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    let log_path = init_tracing()?;
    info!("palpites starting up (logging to {})", log_path.display());

    // 2. Load config
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let config = config::load_config(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: fixtures={}, timeout={}s",
        config.fixtures.path, config.submission.timeout_secs
    );

    // 3. Load fixtures
    let fixtures_path = config.fixtures_path(&base_dir);
    let fixtures = fixture::load_fixtures(&fixtures_path)
        .with_context(|| format!("failed to load fixtures from {}", fixtures_path.display()))?;
    info!(
        "Loaded {} matches over {} days",
        fixtures.match_count(),
        fixtures.days.len()
    );

    // 4. Build the form transport
    let transport =
        FormspreeTransport::from_config(&config).context("failed to build form transport")?;

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (submit_tx, submit_rx) = mpsc::channel(4);

    let app_state = AppState::new(fixtures.clone(), Arc::new(transport), submit_tx);

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, submit_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocks until the user quits)
    info!("Application ready");
    if let Err(e) = tui::run(fixtures, config.display.clone(), ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("palpites shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
///
/// Logs go to the platform data directory, or `./logs` when it cannot be
/// determined. Returns the log file path.
fn init_tracing() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match ProjectDirs::from("br", "palpites", "palpites") {
        Some(dirs) => dirs.data_dir().join("logs"),
        None => std::env::current_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("palpites.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}
