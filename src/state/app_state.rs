//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use tokio::sync::broadcast;
use tracing::debug;

use super::{TimerState, WorldEvent};
use crate::session::Session;

/// Capacity of the world event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared state handed to the HTTP handlers and the heartbeat task
pub struct AppState {
    /// Timer and world, one lock so heartbeat and chat never interleave
    session: Mutex<Session>,
    /// World events for the host
    pub events_tx: broadcast::Sender<WorldEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Wrap a session; `events_tx` must be the sender the session's rule applier uses
    pub fn new(
        session: Session,
        events_tx: broadcast::Sender<WorldEvent>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            session: Mutex::new(session),
            events_tx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Create the world event channel
    pub fn event_channel() -> broadcast::Sender<WorldEvent> {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tx
    }

    /// Lock the session for one callback
    pub fn session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Run one heartbeat and publish whatever it produced
    pub fn heartbeat(&self, tick: u64) -> Result<(), String> {
        let events = self.session()?.on_heartbeat(tick);
        for event in events {
            self.publish(event);
        }
        Ok(())
    }

    /// Send an event to every subscribed host
    pub fn publish(&self, event: WorldEvent) {
        match self.events_tx.send(event) {
            Ok(receivers) => debug!("World event delivered to {} subscriber(s)", receivers),
            Err(e) => debug!("No host subscribed, dropping world event: {:?}", e.0.action),
        }
    }

    /// Copy of the current timer record
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.session().map(|session| session.timer().status().clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::WorldAction, timer::controller::tests::controller_with};

    fn app_with_countdown(countdown: u32) -> AppState {
        let mut state = TimerState::new();
        state.enabled = true;
        state.current_countdown = countdown;
        let (timer, _, _) = controller_with(state);
        let mut session = Session::new(timer);
        session.world_mut().join("Steve", true);
        AppState::new(session, AppState::event_channel(), 0, "127.0.0.1".to_string())
    }

    #[test]
    fn heartbeat_publishes_toggle_events() {
        let app = app_with_countdown(0);
        let mut rx = app.events_tx.subscribe();

        app.heartbeat(0).unwrap();

        assert!(matches!(rx.try_recv().unwrap().action, WorldAction::Broadcast { .. }));
        assert!(matches!(rx.try_recv().unwrap().action, WorldAction::Sound { .. }));
        assert!(app.get_timer_state().unwrap().rule_state);
    }

    #[test]
    fn heartbeat_without_subscribers_still_advances() {
        let app = app_with_countdown(3);
        app.heartbeat(25).unwrap();
        assert_eq!(app.get_timer_state().unwrap().current_countdown, 2);
    }

    #[test]
    fn uptime_starts_in_seconds() {
        let app = app_with_countdown(3);
        assert!(app.get_uptime().ends_with('s'));
    }
}
