//! State management module
//!
//! This module contains the persisted timer record, its store, the player
//! roster, the events sent to the host, and the shared application state.

pub mod app_state;
pub mod events;
pub mod store;
pub mod timer_state;
pub mod world;

// Re-export main types
pub use app_state::AppState;
pub use events::{WorldAction, WorldEvent, TOGGLE_SOUND};
pub use store::{
    load_timer_state, save_timer_state, FileStore, KeyValueStore, MemoryStore, TIMER_KEY,
};
pub use timer_state::TimerState;
pub use world::{Player, World, DISPLAY_TAG};
