//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::{info, warn};

fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGTERM => "SIGTERM",
        SIGINT => "SIGINT",
        SIGHUP => "SIGHUP",
        _ => "unknown signal",
    }
}

/// Wait for a shutdown signal (SIGTERM, SIGINT, SIGHUP)
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([SIGTERM, SIGINT, SIGHUP]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handlers, falling back to Ctrl-C: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to wait for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received {}", signal_name(signal));
    }
}
