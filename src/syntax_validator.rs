//! Syntax Validator
//!
//! Runs the probe string against a throwaway in-memory SQLite database and
//! maps the engine's error text onto [`SqlErrorCategory`].
//!
//! Only the messages listed below are reported. Anything else the engine says
//! (most commonly `no such table`, since the database is empty) is ignored.
//!
//! | engine prefix         | category            | message                        |
//! |-----------------------|---------------------|--------------------------------|
//! | `no tables specified` | `TableNotSpecified` | `Table not specified in query` |
//! | `incomplete`          | `IncompleteQuery`   | `Query incomplete`             |
//! | `near "<kw>": ...`    | `UnknownKeyword`    | `Keyword '<kw>' not found`     |

use crate::diagnostic::{Diagnostic, SourceAnchor};
use crate::error::Result;
use crate::normalizer::ProbeString;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SqlErrorCategory {
    IncompleteQuery,
    TableNotSpecified,
    UnknownKeyword(String),
    Other,
}

impl SqlErrorCategory {
    /// Match engine error text by prefix, first match wins.
    pub fn from_engine_message(message: &str) -> Self {
        if message.starts_with("no tables specified") {
            SqlErrorCategory::TableNotSpecified
        } else if message.starts_with("incomplete") {
            SqlErrorCategory::IncompleteQuery
        } else if let Some(rest) = message.strip_prefix("near ") {
            let keyword = rest.split(':').next().unwrap_or_default();
            SqlErrorCategory::UnknownKeyword(keyword.trim_matches('"').to_string())
        } else {
            SqlErrorCategory::Other
        }
    }

    /// User-facing message; `None` for categories that are not reported.
    pub fn message(&self) -> Option<String> {
        match self {
            SqlErrorCategory::IncompleteQuery => Some("Query incomplete".to_string()),
            SqlErrorCategory::TableNotSpecified => Some("Table not specified in query".to_string()),
            SqlErrorCategory::UnknownKeyword(keyword) => Some(format!("Keyword '{}' not found", keyword)),
            SqlErrorCategory::Other => None,
        }
    }

    /// Diagnostic for this category, anchored on the offending keyword when it
    /// can be found in `original`.
    pub fn to_diagnostic(&self, original: &str) -> Option<Diagnostic> {
        let message = self.message()?;
        let anchor = match self {
            SqlErrorCategory::UnknownKeyword(keyword) => locate_keyword(original, keyword),
            _ => SourceAnchor::Invocation,
        };
        Some(Diagnostic::query_error(message, anchor))
    }
}

/// An isolated in-memory database, closed when dropped.
pub struct ProbeSession {
    conn: Option<Connection>,
}

impl ProbeSession {
    pub fn open() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn: Some(conn) })
    }

    /// Execute `sql` and return the engine's error text, if any.
    pub fn error_text(&self, sql: &str) -> Option<String> {
        let conn = self.conn.as_ref()?;
        match conn.execute_batch(sql) {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        }
    }
}

impl Drop for ProbeSession {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!("Failed to close probe database: {}", e);
            }
        }
    }
}

/// Compile `probe` against an empty database. `Ok(None)` means the engine
/// accepted it.
pub fn check_syntax(probe: &ProbeString) -> Result<Option<SqlErrorCategory>> {
    let session = ProbeSession::open()?;
    let Some(text) = session.error_text(probe.as_str()) else {
        debug!(probe = %probe, "Probe accepted by engine");
        return Ok(None);
    };

    let category = SqlErrorCategory::from_engine_message(&text);
    debug!(probe = %probe, engine_error = %text, ?category, "Probe rejected by engine");
    Ok(Some(category))
}

/// First whitespace-delimited token of `original` matching `keyword`,
/// ignoring case and surrounding punctuation.
pub fn locate_keyword(original: &str, keyword: &str) -> SourceAnchor {
    let mut offset = 0;
    for token in original.split_whitespace() {
        let start = original[offset..].find(token).map_or(offset, |i| offset + i);
        offset = start + token.len();

        if token.to_lowercase() == keyword {
            return SourceAnchor::Literal(start..offset);
        }
        let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '_');
        if !trimmed.is_empty() && trimmed.to_lowercase() == keyword {
            let inner = start + token.find(trimmed).unwrap_or(0);
            return SourceAnchor::Literal(inner..inner + trimmed.len());
        }
    }
    SourceAnchor::Invocation
}
