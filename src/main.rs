//! Simple Countdown - A state-managed countdown display
//!
//! This is the main entry point for the simple-countdown application.

use std::{sync::Arc, time::Duration};
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use simple_countdown::{
    api::create_router,
    config::Config,
    services::load_alert,
    state::AppState,
    tasks::{keyboard_control_task, terminal_view_task},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout belongs to the countdown view
    tracing_subscriber::fmt()
        .with_env_filter(format!("simple_countdown={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting simple-countdown v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let alert = load_alert(config.sound_file.as_deref())
        .context("failed to load alert sound")?;

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        Duration::from_millis(config.tick_ms),
        alert,
    ));

    tokio::spawn(terminal_view_task(state.subscribe()));

    if !config.no_keyboard {
        tokio::spawn(keyboard_control_task(Arc::clone(&state)));
    }

    // Open the startup countdown, if one was given on the command line
    if let Some(form) = config.startup_form() {
        let countdown = form
            .validate()
            .with_context(|| format!("invalid --time {:?}", form.total_time))?;
        state.apply_config(countdown)?;
        if config.autoplay {
            state.play()?;
        }
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /countdown - Open or update the countdown (totalTime, showLabels, soundEnabled)");
    info!("  DELETE /countdown - Close the countdown");
    info!("  POST   /toggle    - Play/Pause");
    info!("  POST   /play      - Play");
    info!("  POST   /pause     - Pause");
    info!("  GET    /status    - Current countdown and server status");
    info!("  GET    /health    - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Closing the view cancels its tick task
    if state.snapshot()?.is_some() {
        state.close_view()?;
    }

    info!("Shutdown complete");
    Ok(())
}
