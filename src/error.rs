use thiserror::Error;

/// Hard failures of a validation call.
///
/// Problems with the query itself are never reported through this type; they
/// become [`crate::diagnostic::Diagnostic`] values instead.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("argument must be a literal")]
    NotALiteral,

    #[error("unterminated interpolation starting at byte {offset}")]
    UnterminatedInterpolation { offset: usize },

    #[error("unmatched '}}' at byte {offset}; use '}}}}' for a literal brace")]
    UnmatchedBrace { offset: usize },

    #[error("SQLite engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
