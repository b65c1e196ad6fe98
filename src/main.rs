//! PvP Timer - periodically toggles a game server's PvP rule
//!
//! This is the main entry point for the pvp-timer host bridge.

use std::sync::Arc;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use tokio::net::TcpListener;
use tracing::{info, warn};

use pvp_timer::{
    api::create_router,
    config::Config,
    services::{ApplyOutcome, CommandRuleApplier, EventRuleApplier, RuleApplier},
    session::Session,
    state::{AppState, FileStore, KeyValueStore, MemoryStore},
    tasks::heartbeat_task,
    timer::TimerController,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pvp_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pvp-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, ticks/s={}, prefix={}",
          config.host, config.port, config.ticks_per_second, config.prefix);

    let store: Box<dyn KeyValueStore> = if config.ephemeral {
        info!("Timer record kept in memory only");
        Box::new(MemoryStore::new())
    } else {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;
        info!("Timer record stored in {}", config.data_dir.display());
        Box::new(FileStore::new(config.data_dir.clone()))
    };

    let events_tx = AppState::event_channel();
    let rules: Box<dyn RuleApplier> = match &config.rule_command {
        Some(template) => {
            info!("Applying rule with command: {}", template);
            Box::new(CommandRuleApplier::new(template.clone()))
        }
        None => {
            // Subscribers receive the current rule when they connect
            info!("Applying rule through the /events stream");
            Box::new(EventRuleApplier::new(events_tx.clone()))
        }
    };

    let timer = TimerController::load(store, rules, Box::new(StdRng::from_entropy()));
    if config.rule_command.is_some() {
        if let ApplyOutcome::Failed(reason) = timer.sync_rule() {
            warn!("Initial rule sync failed: {}", reason);
        }
    }

    let session = Session::new(timer)
        .with_prefix(config.prefix)
        .with_ticks_per_second(config.ticks_per_second);
    let state = Arc::new(AppState::new(session, events_tx, config.port, config.host.clone()));

    // Start the heartbeat background task
    let heartbeat_state = Arc::clone(&state);
    let ticks_per_second = config.ticks_per_second;
    tokio::spawn(async move {
        heartbeat_task(heartbeat_state, ticks_per_second).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!("Host bridge running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /chat                  - Forward a chat line");
    info!("  POST   /players               - Player joined");
    info!("  DELETE /players/:name         - Player left");
    info!("  GET    /players/:name/display - Countdown label for a player");
    info!("  GET    /status                - Timer status");
    info!("  GET    /events                - World event stream");
    info!("  GET    /health                - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}
