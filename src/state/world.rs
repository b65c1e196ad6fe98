//! Player roster as seen by the game host

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Tag marking players who see the countdown label
pub const DISPLAY_TAG: &str = "pvptimer.display";

/// A player known to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub op: bool,
    pub online: bool,
    pub tags: BTreeSet<String>,
    /// Last action-bar label rendered for this player
    pub action_bar: Option<String>,
}

impl Player {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            op: false,
            online: false,
            tags: BTreeSet::new(),
            action_bar: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Players by name; tagged entries outlive disconnects so tags persist
#[derive(Debug, Clone, Default)]
pub struct World {
    players: BTreeMap<String, Player>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a player online, registering them if new
    pub fn join(&mut self, name: &str, op: bool) -> &Player {
        let player = self.players
            .entry(name.to_string())
            .or_insert_with(|| Player::new(name));
        player.online = true;
        player.op = op;
        player
    }

    /// Mark a player offline and return their final record, `None` if never seen
    ///
    /// Players without tags are forgotten; tagged players stay for their next join.
    pub fn leave(&mut self, name: &str) -> Option<Player> {
        let player = self.players.get_mut(name)?;
        player.online = false;
        player.action_bar = None;

        if player.tags.is_empty() {
            self.players.remove(name)
        } else {
            Some(player.clone())
        }
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn add_tag(&mut self, name: &str, tag: &str) {
        self.players
            .entry(name.to_string())
            .or_insert_with(|| Player::new(name))
            .tags
            .insert(tag.to_string());
    }

    pub fn remove_tag(&mut self, name: &str, tag: &str) {
        if let Some(player) = self.players.get_mut(name) {
            player.tags.remove(tag);
            if tag == DISPLAY_TAG {
                player.action_bar = None;
            }
        }
    }

    pub fn has_online_players(&self) -> bool {
        self.players.values().any(|p| p.online)
    }

    pub fn online_players(&self) -> impl Iterator<Item = &Player> {
        self.players.values().filter(|p| p.online)
    }

    /// Set the label of every online player carrying `tag`
    ///
    /// Returns the names whose label actually changed.
    pub fn set_action_bar_for_tag(&mut self, tag: &str, text: &str) -> Vec<String> {
        let mut changed = Vec::new();
        for player in self.players.values_mut().filter(|p| p.online && p.has_tag(tag)) {
            if player.action_bar.as_deref() != Some(text) {
                player.action_bar = Some(text.to_string());
                changed.push(player.name.clone());
            }
        }
        changed
    }
}
