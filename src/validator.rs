//! Validation pipeline
//!
//! scanner -> classifier -> normalizer -> syntax validator + safety checker
//! -> assembler. Every call is self-contained: nothing is cached between
//! calls and each one owns its probe database.

use crate::classifier::{classify, ClassifiedSegment};
use crate::config::ValidatorConfig;
use crate::diagnostic::{assemble, Diagnostic, ValidationOutcome};
use crate::error::Result;
use crate::normalizer::{normalize, ProbeString};
use crate::safety::{check_safety, EntryPoint};
use crate::segment::parse_literal;
use crate::syntax_validator::check_syntax;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub segments: Vec<ClassifiedSegment>,
    pub probe: ProbeString,
    pub outcome: ValidationOutcome,
}

impl ValidationReport {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.outcome.diagnostics()
    }

    pub fn has_errors(&self) -> bool {
        self.outcome.has_errors()
    }

    /// The literal to hand back to the caller, or `None` if any error was found.
    pub fn expansion(&self) -> Option<&str> {
        self.outcome.expansion()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one query literal submitted through `entry_point`.
    ///
    /// Only a malformed literal or a failure to open the probe database is
    /// returned as `Err`; every problem with the query is a diagnostic.
    pub fn validate(&self, literal: &str, entry_point: EntryPoint) -> Result<ValidationReport> {
        let classification = classify(parse_literal(literal)?);
        let probe = normalize(&classification.segments, &self.config);
        debug!(probe = %probe, ?entry_point, "Normalized query literal");

        let syntax_error = check_syntax(&probe)?.and_then(|category| category.to_diagnostic(literal));
        let safety_warning = check_safety(&probe, entry_point, &self.config);

        let outcome = assemble(literal, classification.diagnostics, syntax_error, safety_warning);
        if !outcome.diagnostics().is_empty() {
            info!(
                diagnostics = outcome.diagnostics().len(),
                errors = outcome.has_errors(),
                "Query literal produced diagnostics"
            );
        }

        Ok(ValidationReport {
            segments: classification.segments,
            probe,
            outcome,
        })
    }
}

/// Validate with the default configuration.
pub fn validate(literal: &str, entry_point: EntryPoint) -> Result<ValidationReport> {
    Validator::default().validate(literal, entry_point)
}
