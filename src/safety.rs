//! Safety Checker
//!
//! Warns about destructive statements sent through the checked entry point.

use crate::config::ValidatorConfig;
use crate::diagnostic::Diagnostic;
use crate::normalizer::ProbeString;
use serde::Serialize;
use tracing::debug;

/// Which entry point the query literal was submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryPoint {
    Checked,
    Unsafe,
}

impl EntryPoint {
    pub fn name<'a>(&self, config: &'a ValidatorConfig) -> &'a str {
        match self {
            EntryPoint::Checked => &config.checked_name,
            EntryPoint::Unsafe => &config.unsafe_name,
        }
    }

    pub fn from_name(name: &str, config: &ValidatorConfig) -> Option<Self> {
        if name == config.checked_name {
            Some(EntryPoint::Checked)
        } else if name == config.unsafe_name {
            Some(EntryPoint::Unsafe)
        } else {
            None
        }
    }
}

pub fn is_destructive(probe: &ProbeString) -> bool {
    probe.as_str().trim_start().starts_with("drop")
}

pub fn check_safety(
    probe: &ProbeString,
    entry_point: EntryPoint,
    config: &ValidatorConfig,
) -> Option<Diagnostic> {
    if entry_point == EntryPoint::Unsafe || !is_destructive(probe) {
        return None;
    }
    debug!(probe = %probe, "Destructive statement through checked entry point");
    Some(Diagnostic::destructive_statement(&config.unsafe_name))
}
