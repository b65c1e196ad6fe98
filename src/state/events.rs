//! Events sent from the service to the game host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sound played to every online player when the rule flips
pub const TOGGLE_SOUND: &str = "random.levelup";

/// Something the host has to carry out in the world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldAction {
    /// Set the PvP game rule
    ApplyRule { enabled: bool },
    /// Chat message to every player
    Broadcast { message: String },
    /// Sound cue for every online player
    Sound { sound: String },
    /// New countdown label for one player in the display group
    ActionBar { player: String, text: String },
}

/// A timestamped [`WorldAction`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    #[serde(flatten)]
    pub action: WorldAction,
    pub timestamp: DateTime<Utc>,
}

impl WorldEvent {
    pub fn new(action: WorldAction) -> Self {
        Self {
            action,
            timestamp: Utc::now(),
        }
    }

    pub fn apply_rule(enabled: bool) -> Self {
        Self::new(WorldAction::ApplyRule { enabled })
    }

    pub fn broadcast(message: impl Into<String>) -> Self {
        Self::new(WorldAction::Broadcast { message: message.into() })
    }

    pub fn sound(sound: impl Into<String>) -> Self {
        Self::new(WorldAction::Sound { sound: sound.into() })
    }

    pub fn action_bar(player: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(WorldAction::ActionBar { player: player.into(), text: text.into() })
    }

    /// Announcement for a rule flip
    pub fn toggled(rule_state: bool) -> Vec<Self> {
        let message = if rule_state {
            " + PVP is Enabled"
        } else {
            " - PVP is Disabled"
        };
        vec![Self::broadcast(message), Self::sound(TOGGLE_SOUND)]
    }
}
