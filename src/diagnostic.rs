//! Diagnostics
//!
//! Diagnostic records produced by validation, their fix-its, and the
//! assembly of all findings into a single [`ValidationOutcome`].

use crate::segment::InterpolationHole;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub const DIAGNOSTIC_DOMAIN: &str = "QueryValidation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable identifier for tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageId {
    pub domain: &'static str,
    pub id: &'static str,
}

impl MessageId {
    pub const QUERY: MessageId = MessageId { domain: DIAGNOSTIC_DOMAIN, id: "Query" };
    pub const INTERPOLATION: MessageId = MessageId { domain: DIAGNOSTIC_DOMAIN, id: "Interpolation" };
    pub const SAFETY: MessageId = MessageId { domain: DIAGNOSTIC_DOMAIN, id: "Safety" };
}

/// Where a diagnostic or fix-it points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SourceAnchor {
    /// The whole macro invocation.
    Invocation,
    /// The macro name of the invocation.
    EntryPointName,
    /// Byte range inside the query literal.
    Literal(Range<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixIt {
    pub description: String,
    pub anchor: SourceAnchor,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub id: MessageId,
    pub fix_its: Vec<FixIt>,
    pub anchor: SourceAnchor,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Hole written without any label.
    pub fn unlabeled_interpolation(hole: &InterpolationHole, roles: &[&str]) -> Self {
        Self::label_error(hole, "Interpolation must be labeled".to_string(), roles, |role| {
            format!("Add '{}:'", role)
        })
    }

    /// Hole carrying a label other than the recognized ones.
    pub fn unrecognized_label(hole: &InterpolationHole, label: &str, roles: &[&str]) -> Self {
        Self::label_error(
            hole,
            "Interpolations must be labeled 'table', 'column' or 'subquery'".to_string(),
            roles,
            |role| format!("Replace '{}:' with '{}:'", label, role),
        )
    }

    fn label_error(
        hole: &InterpolationHole,
        message: String,
        roles: &[&str],
        describe: impl Fn(&str) -> String,
    ) -> Self {
        let fix_its = roles
            .iter()
            .map(|role| FixIt {
                description: describe(role),
                anchor: SourceAnchor::Literal(hole.range.clone()),
                replacement: hole.relabeled(role),
            })
            .collect();

        Self {
            severity: Severity::Error,
            message,
            id: MessageId::INTERPOLATION,
            fix_its,
            anchor: SourceAnchor::Literal(hole.range.clone()),
        }
    }

    /// Syntax error reported by the engine.
    pub fn query_error(message: String, anchor: SourceAnchor) -> Self {
        Self {
            severity: Severity::Error,
            message,
            id: MessageId::QUERY,
            fix_its: Vec::new(),
            anchor,
        }
    }

    /// Warning for a destructive statement sent through the checked entry
    /// point; the fix-it renames the invocation to `unsafe_name`.
    pub fn destructive_statement(unsafe_name: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: "Dropping the table may be dangerous".to_string(),
            id: MessageId::SAFETY,
            fix_its: vec![FixIt {
                description: "Mark it unsafe to mute this warning".to_string(),
                anchor: SourceAnchor::EntryPointName,
                replacement: unsafe_name.to_string(),
            }],
            anchor: SourceAnchor::Invocation,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Result of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationOutcome {
    /// No findings; carries the literal unchanged.
    Ok(String),
    /// At least one finding. `expansion` is `None` whenever an error is
    /// present and must not be used as SQL text in that case.
    Diagnostics {
        expansion: Option<String>,
        diagnostics: Vec<Diagnostic>,
    },
}

impl ValidationOutcome {
    pub fn expansion(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Ok(text) => Some(text),
            ValidationOutcome::Diagnostics { expansion, .. } => expansion.as_deref(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ValidationOutcome::Ok(_) => &[],
            ValidationOutcome::Diagnostics { diagnostics, .. } => diagnostics,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(Diagnostic::is_error)
    }
}

/// Combine findings in detection order: label errors, then the syntax error,
/// then the safety warning.
pub fn assemble(
    original: &str,
    label_errors: Vec<Diagnostic>,
    syntax_error: Option<Diagnostic>,
    safety_warning: Option<Diagnostic>,
) -> ValidationOutcome {
    let mut diagnostics = label_errors;
    diagnostics.extend(syntax_error);
    diagnostics.extend(safety_warning);

    if diagnostics.is_empty() {
        return ValidationOutcome::Ok(original.to_string());
    }

    let expansion = if diagnostics.iter().any(Diagnostic::is_error) {
        None
    } else {
        Some(original.to_string())
    };

    ValidationOutcome::Diagnostics { expansion, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole() -> InterpolationHole {
        InterpolationHole {
            label: Some("name".to_string()),
            expression: "t".to_string(),
            range: 14..23,
            expression_range: 21..22,
        }
    }

    #[test]
    fn test_unrecognized_label_fix_its() {
        let diagnostic =
            Diagnostic::unrecognized_label(&hole(), "name", &["table", "column", "subquery"]);

        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.id, MessageId::INTERPOLATION);
        let descriptions: Vec<_> = diagnostic.fix_its.iter().map(|f| f.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Replace 'name:' with 'table:'",
                "Replace 'name:' with 'column:'",
                "Replace 'name:' with 'subquery:'",
            ]
        );
        assert_eq!(diagnostic.fix_its[2].replacement, "{subquery: t}");
        assert_eq!(diagnostic.fix_its[0].anchor, SourceAnchor::Literal(14..23));
    }

    #[test]
    fn test_assemble_empty_is_ok() {
        let outcome = assemble("SELECT 1", Vec::new(), None, None);
        assert_eq!(outcome, ValidationOutcome::Ok("SELECT 1".to_string()));
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_assemble_warning_keeps_expansion() {
        let warning = Diagnostic::destructive_statement("sql_query_unsafe");
        let outcome = assemble("DROP TABLE t", Vec::new(), None, Some(warning));
        assert_eq!(outcome.expansion(), Some("DROP TABLE t"));
        assert_eq!(outcome.diagnostics().len(), 1);
    }

    #[test]
    fn test_assemble_orders_and_blocks_on_error() {
        let label = Diagnostic::unlabeled_interpolation(&hole(), &["table", "column", "subquery"]);
        let syntax = Diagnostic::query_error("Query incomplete".to_string(), SourceAnchor::Invocation);
        let warning = Diagnostic::destructive_statement("sql_query_unsafe");

        let outcome = assemble("DROP {t}", vec![label], Some(syntax), Some(warning));
        assert_eq!(outcome.expansion(), None);
        let messages: Vec<_> = outcome.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Interpolation must be labeled",
                "Query incomplete",
                "Dropping the table may be dangerous",
            ]
        );
    }

    #[test]
    fn test_display() {
        let warning = Diagnostic::destructive_statement("sql_query_unsafe");
        assert_eq!(warning.to_string(), "warning: Dropping the table may be dangerous");
    }
}
