//! Countdown controller flipping the PvP rule

use std::fmt;

use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use crate::{
    services::{ApplyOutcome, RuleApplier},
    state::{load_timer_state, save_timer_state, KeyValueStore, TimerState},
};

/// Result of [`TimerController::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { countdown: u32 },
    AlreadyEnabled,
}

/// Result of [`TimerController::stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    AlreadyDisabled,
}

/// Result of [`TimerController::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Cycle is disabled
    Idle,
    Counted { remaining: u32 },
    Toggled { rule_state: bool, countdown: u32 },
}

/// Rejected bounds update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    Missing,
    /// Not a number, zero, or negative
    NotPositive,
    MinAboveMax { min: u32, max: u32 },
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::Missing => write!(f, "Invalid argument."),
            BoundsError::NotPositive => write!(f, "Not a valid number or Zero."),
            BoundsError::MinAboveMax { .. } => {
                write!(f, "Min seconds must not exceed max seconds.")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

/// Owns the timer record and everything it touches
pub struct TimerController {
    state: TimerState,
    store: Box<dyn KeyValueStore>,
    rules: Box<dyn RuleApplier>,
    rng: Box<dyn RngCore + Send>,
}

impl TimerController {
    pub fn new(
        state: TimerState,
        store: Box<dyn KeyValueStore>,
        rules: Box<dyn RuleApplier>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self { state, store, rules, rng }
    }

    /// Build a controller from whatever the store holds
    pub fn load(
        store: Box<dyn KeyValueStore>,
        rules: Box<dyn RuleApplier>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        let state = load_timer_state(store.as_ref());
        info!(
            "Loaded timer record: enabled={}, countdown={}s, pvp={}, bounds={}..={}s",
            state.enabled, state.current_countdown, state.rule_state,
            state.min_seconds, state.max_seconds
        );
        Self::new(state, store, rules, rng)
    }

    pub fn status(&self) -> &TimerState {
        &self.state
    }

    /// Begin cycling with the rule forced off
    pub fn start(&mut self) -> StartOutcome {
        if self.state.enabled {
            debug!("Start requested while already enabled");
            return StartOutcome::AlreadyEnabled;
        }

        self.switch_rule(false);
        let countdown = self.draw_countdown();
        self.state.current_countdown = countdown;
        self.state.enabled = true;
        self.persist();

        info!("PvP switching started, first toggle in {}s", countdown);
        StartOutcome::Started { countdown }
    }

    /// Halt cycling and force the rule off
    pub fn stop(&mut self) -> StopOutcome {
        if !self.state.enabled {
            debug!("Stop requested while already disabled");
            return StopOutcome::AlreadyDisabled;
        }

        self.switch_rule(false);
        self.state.enabled = false;
        self.state.current_countdown = 0;
        self.persist();

        info!("PvP switching stopped");
        StopOutcome::Stopped
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.enabled {
            return TickOutcome::Idle;
        }

        if self.state.current_countdown == 0 {
            let rule_state = !self.state.rule_state;
            self.switch_rule(rule_state);
            let countdown = self.draw_countdown();
            self.state.current_countdown = countdown;
            self.persist();

            info!("PvP toggled to {}, next toggle in {}s", rule_state, countdown);
            return TickOutcome::Toggled { rule_state, countdown };
        }

        self.state.current_countdown -= 1;
        self.persist();
        TickOutcome::Counted { remaining: self.state.current_countdown }
    }

    /// Replace the countdown bounds
    pub fn set_bounds(&mut self, min: u32, max: u32) -> Result<(), BoundsError> {
        if min == 0 || max == 0 {
            return Err(BoundsError::NotPositive);
        }
        if min > max {
            return Err(BoundsError::MinAboveMax { min, max });
        }

        self.state.min_seconds = min;
        self.state.max_seconds = max;
        self.persist();

        info!("Countdown bounds set to {}..={}s", min, max);
        Ok(())
    }

    /// Push the stored rule value to the host again
    pub fn sync_rule(&self) -> ApplyOutcome {
        info!("Synchronizing host rule with stored state pvp={}", self.state.rule_state);
        self.rules.apply(self.state.rule_state)
    }

    /// Uniform draw over `[min, max]`
    fn draw_countdown(&mut self) -> u32 {
        self.rng.gen_range(self.state.countdown_range())
    }

    fn switch_rule(&mut self, enabled: bool) {
        self.state.rule_state = enabled;
        if let ApplyOutcome::Failed(reason) = self.rules.apply(enabled) {
            warn!("Failed to apply pvp={}: {}", enabled, reason);
        }
    }

    fn persist(&self) {
        if let Err(e) = save_timer_state(self.store.as_ref(), &self.state) {
            warn!("Failed to persist timer record: {}", e);
        }
    }
}
