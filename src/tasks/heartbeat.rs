//! Heartbeat background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Interval between heartbeats for a given rate
pub fn heartbeat_period(ticks_per_second: u64) -> Duration {
    Duration::from_micros(1_000_000 / ticks_per_second.max(1))
}

/// Background task driving the session at a fixed tick rate
pub async fn heartbeat_task(state: Arc<AppState>, ticks_per_second: u64) {
    let period = heartbeat_period(ticks_per_second);
    info!("Starting heartbeat task at {} ticks/s ({:?} per tick)", ticks_per_second, period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut tick: u64 = 0;

    loop {
        interval.tick().await;
        tick = tick.wrapping_add(1);

        if let Err(e) = state.heartbeat(tick) {
            error!("Heartbeat {} failed: {}", tick, e);
        }
    }
}
