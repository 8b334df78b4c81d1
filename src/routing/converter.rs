//! Typed path converters.
//!
//! # Responsibilities
//! - Define the character class each placeholder may consume
//! - Decode a matched run of characters into a typed value
//! - Validate values handed to reverse resolution
//!
//! # Design Decisions
//! - Character classes are plain predicates (no regex)
//! - Structural match and decoding are separate steps: a run can satisfy the
//!   character class and still fail to decode (e.g. `int` overflow)
//! - UUIDs accept only the canonical hyphenated layout, in any case

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use crate::routing::error::PatternError;

/// A typed placeholder kind, written `<kind:name>` in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Converter {
    /// Any non-empty run without `/`.
    Str,
    /// Non-negative decimal integer.
    Int,
    /// ASCII letters, digits, hyphens and underscores.
    Slug,
    /// Canonical hyphenated UUID.
    Uuid,
    /// Any non-empty run, `/` included.
    Path,
}

impl Converter {
    /// Whether `c` may appear in a run consumed by this converter.
    pub fn accepts_char(self, c: char) -> bool {
        match self {
            Converter::Str => c != '/',
            Converter::Int => c.is_ascii_digit(),
            Converter::Slug => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Converter::Uuid => c.is_ascii_hexdigit() || c == '-',
            Converter::Path => true,
        }
    }

    /// Whether every character of `text` is in the class and `text` is non-empty.
    pub fn accepts(self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.accepts_char(c))
    }

    /// Decode a structurally matched run.
    ///
    /// Returns `None` when the run does not decode, in which case the route
    /// holding this placeholder does not match.
    pub fn decode(self, text: &str) -> Option<ParamValue> {
        if !self.accepts(text) {
            return None;
        }
        match self {
            Converter::Str | Converter::Slug | Converter::Path => {
                Some(ParamValue::Str(text.to_string()))
            }
            Converter::Int => text.parse::<u64>().ok().map(ParamValue::Int),
            Converter::Uuid => parse_canonical_uuid(text).map(ParamValue::Uuid),
        }
    }

    /// Keyword used in pattern text.
    pub fn as_str(self) -> &'static str {
        match self {
            Converter::Str => "str",
            Converter::Int => "int",
            Converter::Slug => "slug",
            Converter::Uuid => "uuid",
            Converter::Path => "path",
        }
    }
}

impl FromStr for Converter {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" => Ok(Converter::Str),
            "int" => Ok(Converter::Int),
            "slug" => Ok(Converter::Slug),
            "uuid" => Ok(Converter::Uuid),
            "path" => Ok(Converter::Path),
            other => Err(PatternError::UnknownConverter(other.to_string())),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyphen offsets of the 8-4-4-4-12 layout.
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];
const UUID_TEXT_LEN: usize = 36;

/// Parse canonical UUID text only.
///
/// `Uuid::try_parse` also takes the simple, braced and URN forms, so the
/// layout is checked first.
fn parse_canonical_uuid(text: &str) -> Option<Uuid> {
    if text.len() != UUID_TEXT_LEN {
        return None;
    }
    let layout_ok = text.bytes().enumerate().all(|(i, b)| {
        if UUID_HYPHENS.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    });
    if !layout_ok {
        return None;
    }
    Uuid::try_parse(text).ok()
}

/// A decoded path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(u64),
    Uuid(Uuid),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ParamValue::Uuid(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Uuid(id) => write!(f, "{}", id.hyphenated()),
        }
    }
}

impl From<Uuid> for ParamValue {
    fn from(id: Uuid) -> Self {
        ParamValue::Uuid(id)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}
