//! The two host callbacks: heartbeat and chat

use tracing::{debug, warn};

use crate::{
    commands::{dispatch, parse_command, Sender, DEFAULT_PREFIX},
    state::{World, WorldEvent, DISPLAY_TAG},
    timer::{action_bar_text, TickOutcome, TimerController},
};

/// Heartbeat rate the host runs at
pub const DEFAULT_TICKS_PER_SECOND: u64 = 25;

/// Timer plus the world it acts on
///
/// Callers must not run `on_heartbeat` and `on_chat` concurrently; the host
/// bridge keeps the session behind a single lock.
pub struct Session {
    timer: TimerController,
    world: World,
    prefix: char,
    ticks_per_second: u64,
}

impl Session {
    pub fn new(timer: TimerController) -> Self {
        Self {
            timer,
            world: World::new(),
            prefix: DEFAULT_PREFIX,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }

    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_ticks_per_second(mut self, ticks_per_second: u64) -> Self {
        self.ticks_per_second = ticks_per_second.max(1);
        self
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    /// Heartbeat callback; `tick` is the host's monotonically increasing counter
    pub fn on_heartbeat(&mut self, tick: u64) -> Vec<WorldEvent> {
        if !self.world.has_online_players() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if tick % self.ticks_per_second == 0 {
            if let TickOutcome::Toggled { rule_state, .. } = self.timer.tick() {
                events.extend(WorldEvent::toggled(rule_state));
            }
        }

        events.extend(self.refresh_displays());
        events
    }

    /// Chat callback; `None` means the message is ordinary chat
    pub fn on_chat(&mut self, player: &str, op: bool, message: &str) -> Option<Vec<String>> {
        let command = parse_command(message, self.prefix)?;
        let sender = Sender { name: player, op };
        let replies = dispatch(&mut self.timer, &mut self.world, sender, &command, self.prefix);
        if replies.is_empty() {
            warn!("Command {} produced no reply", command.name);
        }
        debug!("Replying to {} with {} line(s)", player, replies.len());
        Some(replies)
    }

    /// Update labels, one event per player whose label changed
    fn refresh_displays(&mut self) -> Vec<WorldEvent> {
        let text = action_bar_text(self.timer.status());
        self.world
            .set_action_bar_for_tag(DISPLAY_TAG, &text)
            .into_iter()
            .map(|player| WorldEvent::action_bar(player, text.clone()))
            .collect()
    }
}
