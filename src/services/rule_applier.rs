//! Ways of pushing the PvP rule value out to the game host

use tokio::{
    process::Command,
    runtime::Handle,
    sync::{broadcast, mpsc},
};
use tracing::{debug, error, info, warn};

use crate::state::WorldEvent;

/// Result of handing a rule value to the host
///
/// `Dispatched` only means the request left; the host applies it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Dispatched,
    Failed(String),
}

/// Capability to set the PvP rule; implementations must not block
pub trait RuleApplier: Send {
    fn apply(&self, enabled: bool) -> ApplyOutcome;
}

/// Publishes the rule value on the world event stream
pub struct EventRuleApplier {
    events: broadcast::Sender<WorldEvent>,
}

impl EventRuleApplier {
    pub fn new(events: broadcast::Sender<WorldEvent>) -> Self {
        Self { events }
    }
}

impl RuleApplier for EventRuleApplier {
    fn apply(&self, enabled: bool) -> ApplyOutcome {
        match self.events.send(WorldEvent::apply_rule(enabled)) {
            Ok(receivers) => {
                debug!("Rule pvp={} sent to {} subscriber(s)", enabled, receivers);
                ApplyOutcome::Dispatched
            }
            Err(_) => {
                warn!("No host subscribed, rule pvp={} not delivered", enabled);
                ApplyOutcome::Failed("no host subscribed to world events".to_string())
            }
        }
    }
}

/// Runs a shell command template with `{state}` replaced by `true`/`false`
///
/// Commands run one at a time on a single worker task, in the order they
/// were requested, so the last value applied is the last value asked for.
#[derive(Debug)]
pub struct CommandRuleApplier {
    template: String,
    queue: Option<mpsc::UnboundedSender<bool>>,
}

impl CommandRuleApplier {
    /// Create the applier and spawn its worker on the current runtime
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let queue = match Handle::try_current() {
            Ok(handle) => {
                let (tx, rx) = mpsc::unbounded_channel();
                handle.spawn(run_rule_commands(template.clone(), rx));
                Some(tx)
            }
            Err(e) => {
                error!("Cannot run rule commands outside the runtime: {}", e);
                None
            }
        };
        Self { template, queue }
    }

    /// Command line for a given rule value
    pub fn render(&self, enabled: bool) -> String {
        render_template(&self.template, enabled)
    }
}

impl RuleApplier for CommandRuleApplier {
    fn apply(&self, enabled: bool) -> ApplyOutcome {
        let Some(queue) = &self.queue else {
            return ApplyOutcome::Failed("no async runtime for rule commands".to_string());
        };

        match queue.send(enabled) {
            Ok(()) => {
                debug!("Queued rule command for pvp={}", enabled);
                ApplyOutcome::Dispatched
            }
            Err(_) => {
                error!("Rule command worker is gone, pvp={} not applied", enabled);
                ApplyOutcome::Failed("rule command worker stopped".to_string())
            }
        }
    }
}

fn render_template(template: &str, enabled: bool) -> String {
    template.replace("{state}", if enabled { "true" } else { "false" })
}

/// Worker draining the queue, one command at a time
async fn run_rule_commands(template: String, mut queue: mpsc::UnboundedReceiver<bool>) {
    while let Some(enabled) = queue.recv().await {
        let command_line = render_template(&template, enabled);
        debug!("Running rule command: {}", command_line);

        let output = Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                info!("Rule command succeeded: {}", command_line);
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("Rule command failed ({}): {}", output.status, stderr.trim());
            }
            Err(e) => {
                error!("Failed to execute rule command: {}", e);
            }
        }
    }
    debug!("Rule command queue closed");
}
