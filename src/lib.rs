//! Compile-time validation of SQLite query literals with labeled
//! interpolations.

pub mod classifier;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod normalizer;
pub mod safety;
pub mod segment;
pub mod syntax_validator;
pub mod validator;

pub use classifier::{ClassifiedSegment, PlaceholderRole};
pub use config::ValidatorConfig;
pub use diagnostic::{Diagnostic, FixIt, MessageId, Severity, SourceAnchor, ValidationOutcome};
pub use error::{Result, ValidatorError};
pub use normalizer::ProbeString;
pub use safety::EntryPoint;
pub use segment::{InterpolationHole, LiteralFragment, Segment};
pub use syntax_validator::SqlErrorCategory;
pub use validator::{validate, ValidationReport, Validator};
