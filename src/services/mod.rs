//! External service module
//!
//! This module contains the ways the PvP rule value reaches the game host.

pub mod rule_applier;

// Re-export main types
pub use rule_applier::{ApplyOutcome, CommandRuleApplier, EventRuleApplier, RuleApplier};
