//! Segment Classifier
//!
//! Assigns every interpolation hole a [`PlaceholderRole`] from its label and
//! reports label errors. Classification never stops at the first bad hole.

use crate::diagnostic::Diagnostic;
use crate::segment::{InterpolationHole, LiteralFragment, Segment};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlaceholderRole {
    Table,
    Column,
    Subquery,
    Unlabeled,
    Unrecognized(String),
}

impl PlaceholderRole {
    /// Labels accepted on a hole, in fix-it order.
    pub const RECOGNIZED_LABELS: [&'static str; 3] = ["table", "column", "subquery"];

    /// Labels are case-sensitive.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("table") => PlaceholderRole::Table,
            Some("column") => PlaceholderRole::Column,
            Some("subquery") => PlaceholderRole::Subquery,
            Some(other) => PlaceholderRole::Unrecognized(other.to_string()),
            None => PlaceholderRole::Unlabeled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClassifiedSegment {
    Literal(LiteralFragment),
    Placeholder {
        hole: InterpolationHole,
        role: PlaceholderRole,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub segments: Vec<ClassifiedSegment>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    /// Holes of the literal in source order, with their roles.
    pub fn placeholders(&self) -> impl Iterator<Item = (&InterpolationHole, &PlaceholderRole)> {
        self.segments.iter().filter_map(|segment| match segment {
            ClassifiedSegment::Placeholder { hole, role } => Some((hole, role)),
            ClassifiedSegment::Literal(_) => None,
        })
    }
}

pub fn classify(segments: Vec<Segment>) -> Classification {
    let mut classification = Classification::default();

    for segment in segments {
        match segment {
            Segment::Literal(fragment) => {
                classification.segments.push(ClassifiedSegment::Literal(fragment));
            }
            Segment::Placeholder(hole) => {
                let role = PlaceholderRole::from_label(hole.label.as_deref());
                trace!(expression = %hole.expression, ?role, "Classified interpolation");

                match &role {
                    PlaceholderRole::Unlabeled => classification.diagnostics.push(
                        Diagnostic::unlabeled_interpolation(&hole, &PlaceholderRole::RECOGNIZED_LABELS),
                    ),
                    PlaceholderRole::Unrecognized(label) => classification.diagnostics.push(
                        Diagnostic::unrecognized_label(&hole, label, &PlaceholderRole::RECOGNIZED_LABELS),
                    ),
                    _ => {}
                }

                classification.segments.push(ClassifiedSegment::Placeholder { hole, role });
            }
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::segment::parse_literal;

    fn roles(literal: &str) -> Vec<PlaceholderRole> {
        classify(parse_literal(literal).unwrap())
            .placeholders()
            .map(|(_, role)| role.clone())
            .collect()
    }

    #[test]
    fn test_recognized_labels() {
        assert_eq!(
            roles("SELECT {column: c} FROM {table: t} WHERE x = ({subquery: s})"),
            vec![PlaceholderRole::Column, PlaceholderRole::Table, PlaceholderRole::Subquery]
        );
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(
            roles("SELECT * FROM {Table: t}"),
            vec![PlaceholderRole::Unrecognized("Table".to_string())]
        );
    }

    #[test]
    fn test_non_ascii_label_is_unrecognized() {
        let classification = classify(parse_literal("SELECT * FROM {tàble: x}").unwrap());
        let (_, role) = classification.placeholders().next().unwrap();
        assert_eq!(role, &PlaceholderRole::Unrecognized("tàble".to_string()));

        let diagnostic = &classification.diagnostics[0];
        assert_eq!(
            diagnostic.message,
            "Interpolations must be labeled 'table', 'column' or 'subquery'"
        );
        assert_eq!(diagnostic.fix_its[0].description, "Replace 'tàble:' with 'table:'");
        assert_eq!(diagnostic.fix_its[0].replacement, "{table: x}");
    }

    #[test]
    fn test_unlabeled_hole_error() {
        let classification = classify(parse_literal("SELECT * FROM {t}").unwrap());
        assert_eq!(classification.diagnostics.len(), 1);

        let diagnostic = &classification.diagnostics[0];
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "Interpolation must be labeled");
        let replacements: Vec<_> = diagnostic.fix_its.iter().map(|f| f.replacement.as_str()).collect();
        assert_eq!(replacements, vec!["{table: t}", "{column: t}", "{subquery: t}"]);
        assert_eq!(diagnostic.fix_its[0].description, "Add 'table:'");
    }

    #[test]
    fn test_every_bad_hole_is_reported() {
        let classification = classify(parse_literal("SELECT {c} FROM {name: t}").unwrap());
        let messages: Vec<_> = classification.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Interpolation must be labeled",
                "Interpolations must be labeled 'table', 'column' or 'subquery'",
            ]
        );
        assert!(classification.diagnostics.iter().all(|d| d.fix_its.len() == 3));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let literal = "SELECT {c} FROM {table: t}";
        assert_eq!(
            classify(parse_literal(literal).unwrap()),
            classify(parse_literal(literal).unwrap())
        );
    }
}
