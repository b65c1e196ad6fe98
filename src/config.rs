//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{commands::DEFAULT_PREFIX, session::DEFAULT_TICKS_PER_SECOND};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pvp-timer")]
#[command(about = "A heartbeat-driven PvP rule toggler with operator chat commands")]
#[command(version)]
pub struct Config {
    /// Port to bind the host bridge to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the persisted timer record
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Keep the timer record in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Shell command applying the rule, `{state}` becomes true/false;
    /// without it the rule is sent on the event stream
    #[arg(short, long)]
    pub rule_command: Option<String>,

    /// Heartbeat rate of the game host
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_SECOND)]
    pub ticks_per_second: u64,

    /// Character marking a chat line as a command
    #[arg(long, default_value_t = DEFAULT_PREFIX)]
    pub prefix: char,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
