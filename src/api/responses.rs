//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Player, TimerState};

/// Chat line forwarded by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub player: String,
    pub message: String,
    /// Whether the host considers the sender an operator
    #[serde(default)]
    pub op: bool,
}

/// Reply to a forwarded chat line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The host should drop the line from public chat
    pub cancel: bool,
    /// Lines to send privately to the sender
    pub replies: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    pub fn new(replies: Option<Vec<String>>) -> Self {
        Self {
            cancel: replies.is_some(),
            replies: replies.unwrap_or_default(),
            timestamp: Utc::now(),
        }
    }
}

/// Player presence update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub name: String,
    #[serde(default)]
    pub op: bool,
}

/// A player as tracked by the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player: Player,
    pub timestamp: DateTime<Utc>,
}

impl PlayerResponse {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            timestamp: Utc::now(),
        }
    }
}

/// Countdown label for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub player: String,
    /// `None` when the player is offline or not in the display group
    pub text: Option<String>,
}

/// Status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub next_rule_state: bool,
    pub online_players: Vec<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
