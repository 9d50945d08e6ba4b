// BidRoom entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config, seeding config/ from defaults/ on first run
// 3. Load the player catalog and tournament directory
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use bidroom_core::catalog::Catalog;
use bidroom_core::config;
use bidroom_core::prefs::PrefsStore;
use bidroom_core::tournament::TournamentDirectory;
use bidroom_tui::app;
use bidroom_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("BidRoom starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: min increment {}, +{}s per bid, {}s window",
        config.auction.min_increment,
        config.auction.time_bonus_secs,
        config.auction.max_window_secs
    );

    let catalog = Catalog::builtin().context("failed to load player catalog")?;
    info!("Loaded {} players", catalog.len());

    let tournaments = TournamentDirectory::sample();

    let prefs_store = PrefsStore::default_location();
    match &prefs_store {
        Some(store) => info!("Preferences at {}", store.path().display()),
        None => warn!("No home directory found; preferences will not persist"),
    }

    let (session_tx, session_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(config, catalog, tournaments, prefs_store, session_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(session_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user quits.
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("BidRoom shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("bidroom.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("bidroom=info,bidroom_core=info,bidroom_tui=info,warn")
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
