//! On-screen countdown label

use crate::state::TimerState;

/// Action-bar text for players in the display group
pub fn action_bar_text(state: &TimerState) -> String {
    if !state.enabled {
        return "PVP timer: Off".to_string();
    }

    let verb = if state.next_rule_state() { "Enable" } else { "Disable" };
    format!("PVP timer: {}s for {} pvp", state.current_countdown, verb)
}
