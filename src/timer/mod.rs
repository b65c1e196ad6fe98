//! Countdown timer module
//!
//! The controller that flips the PvP rule and the label shown to players.

pub mod controller;
pub mod display;

// Re-export main types
pub use controller::{
    BoundsError, StartOutcome, StopOutcome, TickOutcome, TimerController,
};
pub use display::action_bar_text;
