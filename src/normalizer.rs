//! Query Normalizer
//!
//! Builds the lower-case probe string submitted to the engine.

use crate::classifier::{ClassifiedSegment, PlaceholderRole};
use crate::config::ValidatorConfig;
use serde::Serialize;
use std::fmt;

/// Stand-in for a subquery written between literal parentheses, keeping
/// `(...)` a valid scalar subquery in the probe.
pub const PARENTHESIZED_SUBQUERY_STAND_IN: &str = "select null";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeString(String);

impl ProbeString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProbeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(segments: &[ClassifiedSegment], config: &ValidatorConfig) -> ProbeString {
    let mut probe = String::new();

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            ClassifiedSegment::Literal(fragment) => probe.push_str(&fragment.text),
            ClassifiedSegment::Placeholder { hole, role } => match role {
                PlaceholderRole::Table | PlaceholderRole::Column => {
                    probe.push_str(hole.identifier().unwrap_or(config.identifier_stand_in.as_str()));
                }
                PlaceholderRole::Subquery if is_parenthesized(segments, index) => {
                    probe.push_str(PARENTHESIZED_SUBQUERY_STAND_IN);
                }
                // Label errors are already reported; dropping the hole keeps
                // the rest of the probe close to what was meant.
                PlaceholderRole::Subquery
                | PlaceholderRole::Unlabeled
                | PlaceholderRole::Unrecognized(_) => {}
            },
        }
    }

    ProbeString(probe.to_lowercase())
}

fn is_parenthesized(segments: &[ClassifiedSegment], index: usize) -> bool {
    let opens = index
        .checked_sub(1)
        .and_then(|before| segments.get(before))
        .map_or(false, |segment| match segment {
            ClassifiedSegment::Literal(fragment) => fragment.text.trim_end().ends_with('('),
            ClassifiedSegment::Placeholder { .. } => false,
        });
    let closes = segments.get(index + 1).map_or(false, |segment| match segment {
        ClassifiedSegment::Literal(fragment) => fragment.text.trim_start().starts_with(')'),
        ClassifiedSegment::Placeholder { .. } => false,
    });
    opens && closes
}
