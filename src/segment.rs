//! Literal Segments
//!
//! Splits a query literal into literal text runs and interpolation holes.
//!
//! The hole syntax follows `format!`: `{label: expr}` for a labeled hole,
//! `{expr}` for an unlabeled one, and `{{` / `}}` for literal braces.

use crate::error::{Result, ValidatorError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^(?:r#)?[\p{XID_Start}_]\p{XID_Continue}*$").unwrap();
    static ref LABEL: Regex = Regex::new(r"^\s*([\p{XID_Start}_]\p{XID_Continue}*)\s*:").unwrap();
}

/// A run of plain text between holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralFragment {
    /// Text as the query sees it, with `{{`/`}}` already unescaped.
    pub text: String,
    /// Byte range of the raw fragment within the literal.
    pub range: Range<usize>,
}

/// A single `{...}` site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpolationHole {
    pub label: Option<String>,
    /// Expression text as written, trimmed.
    pub expression: String,
    /// Byte range of the whole hole, braces included.
    pub range: Range<usize>,
    /// Byte range of `expression` within the literal.
    pub expression_range: Range<usize>,
}

impl InterpolationHole {
    /// The statically-known name when the expression is a bare identifier.
    pub fn identifier(&self) -> Option<&str> {
        if IDENTIFIER.is_match(&self.expression) {
            Some(self.expression.trim_start_matches("r#"))
        } else {
            None
        }
    }

    /// The hole rewritten with a different label and the same expression.
    pub fn relabeled(&self, label: &str) -> String {
        format!("{{{}: {}}}", label, self.expression)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Segment {
    Literal(LiteralFragment),
    Placeholder(InterpolationHole),
}

/// Split `literal` into segments in source order.
///
/// Adjacent text is merged into one fragment; escaped braces never start a
/// new one.
pub fn parse_literal(literal: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut fragment_start = 0;
    let mut chars = literal.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                text.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                text.push('}');
            }
            '}' => return Err(ValidatorError::UnmatchedBrace { offset }),
            '{' => {
                if offset > fragment_start {
                    segments.push(Segment::Literal(LiteralFragment {
                        text: std::mem::take(&mut text),
                        range: fragment_start..offset,
                    }));
                }

                let close = find_closing_brace(literal, offset)?;
                segments.push(Segment::Placeholder(parse_hole(literal, offset..close + 1)));

                // Skip the hole body; the iterator is byte-indexed so drain
                // until we pass the closing brace.
                while let Some((next, _)) = chars.peek() {
                    if *next > close {
                        break;
                    }
                    chars.next();
                }
                fragment_start = close + 1;
            }
            _ => text.push(ch),
        }
    }

    if literal.len() > fragment_start {
        segments.push(Segment::Literal(LiteralFragment {
            text,
            range: fragment_start..literal.len(),
        }));
    }

    Ok(segments)
}

/// Offset of the `}` matching the `{` at `open`. Braces nested inside the
/// expression (struct literals, blocks) are balanced.
fn find_closing_brace(literal: &str, open: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (offset, byte) in literal.bytes().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(offset);
                }
            }
            _ => {}
        }
    }
    Err(ValidatorError::UnterminatedInterpolation { offset: open })
}

fn parse_hole(literal: &str, range: Range<usize>) -> InterpolationHole {
    let body_start = range.start + 1;
    let body = &literal[body_start..range.end - 1];

    let (label, expr_offset) = match LABEL.captures(body) {
        // `{path::to::value}` is an expression, not a label.
        Some(caps) if !body[caps[0].len()..].starts_with(':') => {
            (Some(caps[1].to_string()), caps[0].len())
        }
        _ => (None, 0),
    };

    let raw_expr = &body[expr_offset..];
    let leading = raw_expr.len() - raw_expr.trim_start().len();
    let expression = raw_expr.trim().to_string();
    let expr_start = body_start + expr_offset + leading;

    InterpolationHole {
        label,
        expression_range: expr_start..expr_start + expression.len(),
        expression,
        range,
    }
}
