//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::{error, info};

/// Wait for SIGTERM or SIGINT
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to install signal handler, falling back to ctrl-c: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to wait for ctrl-c: {}", e);
            }
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        let name = match signal {
            SIGTERM => "SIGTERM",
            SIGINT => "SIGINT",
            _ => "unknown",
        };
        info!("Received {}, shutting down", name);
    }
}
