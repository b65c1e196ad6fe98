//! Operator chat commands
//!
//! Parsing of `!command args` lines and their routing to the timer.

pub mod dispatcher;
pub mod parser;

// Re-export main functions
pub use dispatcher::{dispatch, Sender};
pub use parser::{parse_command, parse_seconds, ChatCommand, DEFAULT_PREFIX};
