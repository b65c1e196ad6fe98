//! Routes operator chat commands to the timer

use tracing::{debug, info};

use super::parser::{parse_seconds, ChatCommand};
use crate::{
    state::{World, DISPLAY_TAG},
    timer::{BoundsError, StartOutcome, StopOutcome, TimerController},
};

/// Who sent a chat command
#[derive(Debug, Clone, Copy)]
pub struct Sender<'a> {
    pub name: &'a str,
    pub op: bool,
}

/// Run a parsed command and return the lines to send back to the sender
pub fn dispatch(
    timer: &mut TimerController,
    world: &mut World,
    sender: Sender<'_>,
    command: &ChatCommand,
    prefix: char,
) -> Vec<String> {
    if !sender.op {
        debug!("{} is not an operator, hiding command {}", sender.name, command.name);
        return not_found(command);
    }

    info!("{} ran {}{} {:?}", sender.name, prefix, command.name, command.args);

    match command.name.as_str() {
        "start" => start(timer),
        "stop" => stop(timer),
        "timer" => timer_action(timer, world, sender, command, prefix),
        "setup" => setup(timer, command, prefix),
        _ => not_found(command),
    }
}

fn start(timer: &mut TimerController) -> Vec<String> {
    match timer.start() {
        StartOutcome::AlreadyEnabled => lines(&["PVP switching is already enabled."]),
        StartOutcome::Started { .. } => lines(&[
            "Started PVP switching.",
            "PvP initialized as: Off",
            "ALERT: Do NOT use /gamerule pvp",
        ]),
    }
}

fn stop(timer: &mut TimerController) -> Vec<String> {
    match timer.stop() {
        StopOutcome::AlreadyDisabled => lines(&["PVP switching is already disabled."]),
        StopOutcome::Stopped => lines(&["Stopped PVP switching.", "PVP set to: OFF"]),
    }
}

fn timer_action(
    timer: &TimerController,
    world: &mut World,
    sender: Sender<'_>,
    command: &ChatCommand,
    prefix: char,
) -> Vec<String> {
    let action = command.arg(0).map(str::to_lowercase);
    match action.as_deref() {
        Some("show") => {
            world.add_tag(sender.name, DISPLAY_TAG);
            lines(&["Timer displaying (self) (only OPs)"])
        }
        Some("hide") => {
            world.remove_tag(sender.name, DISPLAY_TAG);
            lines(&["Timer hidden (self) (only OPs)"])
        }
        Some("info") => {
            let state = timer.status();
            vec![
                " --- TIMER INFO ---".to_string(),
                format!("- State:   {}", if state.enabled { "ON" } else { "OFF" }),
                format!("- Current Time:   {}", state.current_countdown),
                format!("- MIN seconds:   {}", state.min_seconds),
                format!("- MAX seconds:   {}", state.max_seconds),
                format!("- Next PVP state:   {}", state.next_rule_state()),
                " ------------------".to_string(),
            ]
        }
        _ => vec![
            "Invalid argument.".to_string(),
            format!("Valid Syntax: {}timer <show | hide | info>", prefix),
        ],
    }
}

fn setup(timer: &mut TimerController, command: &ChatCommand, prefix: char) -> Vec<String> {
    let (min, max) = match parse_bounds(command) {
        Ok(bounds) => bounds,
        Err(e) => return bounds_rejection(e, prefix),
    };

    if let Err(e) = timer.set_bounds(min, max) {
        return bounds_rejection(e, prefix);
    }

    vec![
        "PVP timer updated Sucesfully.".to_string(),
        format!("Min countdown time: {}s", min),
        format!("Max countdown time: {}s", max),
        "The PVP will switch in a random time (in seconds) between those two values.".to_string(),
    ]
}

fn parse_bounds(command: &ChatCommand) -> Result<(u32, u32), BoundsError> {
    let (Some(min), Some(max)) = (command.arg(0), command.arg(1)) else {
        return Err(BoundsError::Missing);
    };
    match (parse_seconds(min), parse_seconds(max)) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(BoundsError::NotPositive),
    }
}

fn bounds_rejection(error: BoundsError, prefix: char) -> Vec<String> {
    match error {
        BoundsError::Missing => vec![
            error.to_string(),
            format!("Valid Syntax: {}setup <min seconds: int> <max seconds: int>", prefix),
        ],
        _ => vec![error.to_string()],
    }
}

fn not_found(command: &ChatCommand) -> Vec<String> {
    vec![format!("Command \"{}\" not found.", command.name)]
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::parser::{parse_command, DEFAULT_PREFIX},
        state::TimerState,
        timer::controller::tests::controller_with,
    };

    const OP: Sender<'static> = Sender { name: "Steve", op: true };

    fn run(timer: &mut TimerController, world: &mut World, sender: Sender<'_>, text: &str) -> Vec<String> {
        let command = parse_command(text, DEFAULT_PREFIX).expect("command");
        dispatch(timer, world, sender, &command, DEFAULT_PREFIX)
    }

    #[test]
    fn start_and_repeat_start() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();

        let replies = run(&mut timer, &mut world, OP, "!start");
        assert_eq!(replies[0], "Started PVP switching.");
        assert_eq!(replies.len(), 3);

        let before = timer.status().clone();
        let replies = run(&mut timer, &mut world, OP, "!start");
        assert_eq!(replies, vec!["PVP switching is already enabled."]);
        assert_eq!(timer.status(), &before);
    }

    #[test]
    fn stop_replies() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();

        assert_eq!(
            run(&mut timer, &mut world, OP, "!stop"),
            vec!["PVP switching is already disabled."]
        );
        run(&mut timer, &mut world, OP, "!start");
        assert_eq!(
            run(&mut timer, &mut world, OP, "!STOP"),
            vec!["Stopped PVP switching.", "PVP set to: OFF"]
        );
        assert!(!timer.status().enabled);
    }

    #[test]
    fn non_operator_sees_not_found() {
        let (mut timer, applier, _) = controller_with(TimerState::new());
        let mut world = World::new();
        let guest = Sender { name: "Alex", op: false };

        assert_eq!(
            run(&mut timer, &mut world, guest, "!start"),
            vec!["Command \"start\" not found."]
        );
        assert!(!timer.status().enabled);
        assert!(applier.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_command() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();
        assert_eq!(
            run(&mut timer, &mut world, OP, "!dance now"),
            vec!["Command \"dance\" not found."]
        );
    }

    #[test]
    fn timer_show_and_hide_manage_tag() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();
        world.join("Steve", true);

        run(&mut timer, &mut world, OP, "!timer show");
        assert!(world.player("Steve").unwrap().has_tag(DISPLAY_TAG));

        run(&mut timer, &mut world, OP, "!timer HIDE");
        assert!(!world.player("Steve").unwrap().has_tag(DISPLAY_TAG));
    }

    #[test]
    fn timer_info_reports_state() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();

        let replies = run(&mut timer, &mut world, OP, "!timer info");
        assert_eq!(replies.len(), 7);
        assert_eq!(replies[1], "- State:   OFF");
        assert_eq!(replies[3], "- MIN seconds:   60");
        assert_eq!(replies[4], "- MAX seconds:   180");
        assert_eq!(replies[5], "- Next PVP state:   true");
    }

    #[test]
    fn timer_without_action_shows_usage() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();
        assert_eq!(
            run(&mut timer, &mut world, OP, "!timer"),
            vec!["Invalid argument.", "Valid Syntax: !timer <show | hide | info>"]
        );
    }

    #[test]
    fn setup_updates_bounds() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();

        let replies = run(&mut timer, &mut world, OP, "!setup 10 20.7");
        assert_eq!(replies[0], "PVP timer updated Sucesfully.");
        assert_eq!(replies[1], "Min countdown time: 10s");
        assert_eq!(replies[2], "Max countdown time: 20s");
        assert_eq!(timer.status().countdown_range(), 10..=20);
    }

    #[test]
    fn setup_rejections_leave_bounds() {
        let (mut timer, _, _) = controller_with(TimerState::new());
        let mut world = World::new();

        assert_eq!(
            run(&mut timer, &mut world, OP, "!setup 10"),
            vec![
                "Invalid argument.",
                "Valid Syntax: !setup <min seconds: int> <max seconds: int>",
            ]
        );
        assert_eq!(
            run(&mut timer, &mut world, OP, "!setup 5 x"),
            vec!["Not a valid number or Zero."]
        );
        assert_eq!(
            run(&mut timer, &mut world, OP, "!setup 0 10"),
            vec!["Not a valid number or Zero."]
        );
        assert_eq!(
            run(&mut timer, &mut world, OP, "!setup 50 10"),
            vec!["Min seconds must not exceed max seconds."]
        );
        assert_eq!(timer.status().countdown_range(), 60..=180);
    }
}
