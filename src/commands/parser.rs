//! Chat command parsing

/// Marker a chat line must start with to count as a command
pub const DEFAULT_PREFIX: char = '!';

/// A chat line split into command name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCommand {
    /// Lowercased command name, without the prefix
    pub name: String,
    pub args: Vec<String>,
}

impl ChatCommand {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Split a chat line into a command, `None` if it lacks the prefix
pub fn parse_command(message: &str, prefix: char) -> Option<ChatCommand> {
    let rest = message.strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.map(str::to_string).collect();
    Some(ChatCommand { name, args })
}

/// Read a whole number of seconds the way operators type them
///
/// Fractions are truncated; zero, negatives and non-numbers give `None`.
pub fn parse_seconds(value: &str) -> Option<u32> {
    let number: f64 = value.trim().parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let whole = number.trunc();
    if whole < 1.0 || whole > f64::from(u32::MAX) {
        return None;
    }
    Some(whole as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_plain_chat() {
        assert_eq!(parse_command("hello there", DEFAULT_PREFIX), None);
        assert_eq!(parse_command(" !start", DEFAULT_PREFIX), None);
    }

    #[test]
    fn lowercases_name_and_keeps_args() {
        assert_eq!(
            parse_command("!SetUp 10  20", DEFAULT_PREFIX),
            Some(ChatCommand {
                name: "setup".to_string(),
                args: vec!["10".to_string(), "20".to_string()],
            })
        );
    }

    #[test]
    fn bare_prefix_gives_empty_name() {
        let command = parse_command("!", DEFAULT_PREFIX).unwrap();
        assert_eq!(command.name, "");
        assert!(command.args.is_empty());
    }

    #[test]
    fn custom_prefix() {
        let command = parse_command(".timer Info", '.').unwrap();
        assert_eq!(command.name, "timer");
        assert_eq!(command.arg(0), Some("Info"));
        assert_eq!(command.arg(1), None);
    }

    #[test]
    fn seconds_parsing() {
        assert_eq!(parse_seconds("90"), Some(90));
        assert_eq!(parse_seconds("12.9"), Some(12));
        assert_eq!(parse_seconds("0"), None);
        assert_eq!(parse_seconds("0.5"), None);
        assert_eq!(parse_seconds("-5"), None);
        assert_eq!(parse_seconds("x"), None);
        assert_eq!(parse_seconds("inf"), None);
        assert_eq!(parse_seconds("NaN"), None);
    }
}
