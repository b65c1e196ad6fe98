//! PvP Timer - periodically toggles a game server's PvP rule
//!
//! A randomized countdown flips the player-vs-player rule each time it runs
//! out. Operators drive it with chat commands (`!start`, `!stop`, `!timer`,
//! `!setup`); the game host reaches the service through a small HTTP bridge.

pub mod api;
pub mod commands;
pub mod config;
pub mod services;
pub mod session;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use session::Session;
pub use state::{AppState, TimerState};
pub use timer::TimerController;
pub use utils::signals::shutdown_signal;
