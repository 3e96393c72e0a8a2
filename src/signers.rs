// src/signers.rs
//! Signer-ID extraction for the `signers` field of a transaction.
//!
//! The field arrives in several shapes depending on which export produced it:
//! a native list, a string holding a list literal (sometimes with `null`
//! placeholders), or free text with 7-digit contact IDs embedded in it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

static SEVEN_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{7})\b").expect("static regex"));

/// One element of a list literal.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Int(i64),
    Str(String),
    Null,
}

/// First and second signer of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signers {
    pub first: Option<i64>,
    pub second: Option<i64>,
}

impl Signers {
    pub fn from_ids(ids: &[i64]) -> Self {
        Self {
            first: ids.first().copied(),
            second: ids.get(1).copied(),
        }
    }
}

/// Extract signer IDs from a raw field value. Stages, first success wins:
///  1. missing → empty
///  2. native sequence → integers and all-digit strings, in order
///  3. list literal in text → same filter; an empty result falls through
///  4. every standalone 7-digit token in the text
pub fn parse_signers(value: &Value) -> Vec<i64> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(usable_json).collect(),
        Value::String(s) => parse_signer_text(s),
        other => parse_signer_text(&other.to_string()),
    }
}

/// Convenience for callers that only need positions 0 and 1.
pub fn resolve_signers(value: &Value) -> Signers {
    Signers::from_ids(&parse_signers(value))
}

fn parse_signer_text(raw: &str) -> Vec<i64> {
    let s = raw.trim();

    if let Some(items) = parse_list_literal(s) {
        let ids: Vec<i64> = items.iter().filter_map(usable_literal).collect();
        if !ids.is_empty() {
            trace!(?ids, "signers from list literal");
            return ids;
        }
    }

    let ids: Vec<i64> = SEVEN_DIGITS
        .captures_iter(s)
        .filter_map(|c| c.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect();
    trace!(?ids, "signers from digit scan");
    ids
}

fn digit_string(s: &str) -> Option<i64> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn usable_json(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => digit_string(s),
        _ => None,
    }
}

fn usable_literal(l: &Literal) -> Option<i64> {
    match l {
        Literal::Int(n) => Some(*n),
        Literal::Str(s) => digit_string(s),
        Literal::Null => None,
    }
}

/// Parse `[a, b, ...]` or `(a, b, ...)` where every element is an integer,
/// a quoted string, or `None`/`null`. Anything else is not a list literal.
///
/// Parentheses around a single element without a comma, as in `(555)`, are
/// grouping and not a tuple.
fn parse_list_literal(s: &str) -> Option<Vec<Literal>> {
    let (inner, tuple) = match s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) => (inner, false),
        None => (s.strip_prefix('(').and_then(|r| r.strip_suffix(')'))?, true),
    };

    let mut items = Vec::new();
    let mut saw_comma = false;
    let mut chars = inner.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(&c) = chars.peek() else {
            break;
        };

        let item = if c == '\'' || c == '"' {
            chars.next();
            let mut buf = String::new();
            let mut closed = false;
            while let Some(ch) = chars.next() {
                if ch == '\\' {
                    buf.push(chars.next()?);
                } else if ch == c {
                    closed = true;
                    break;
                } else {
                    buf.push(ch);
                }
            }
            if !closed {
                return None;
            }
            Literal::Str(buf)
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == ',' || ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            match token.as_str() {
                "None" | "null" => Literal::Null,
                t => Literal::Int(t.replace('_', "").parse().ok()?),
            }
        };
        items.push(item);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            Some(',') => saw_comma = true,
            None => {}
            Some(_) => return None,
        }
    }
    if tuple && !items.is_empty() && !saw_comma {
        return None;
    }
    Some(items)
}
