//! Path pattern parsing, matching and formatting.
//!
//! # Syntax
//! Literal text interleaved with placeholders:
//! - `<uuid:pk>`: parameter `pk` using the `uuid` converter
//! - `<slug>`: parameter `slug` using the default `str` converter
//!
//! # Design Decisions
//! - Patterns are compiled once into tokens; matching walks the tokens
//! - Anchored at both ends: the whole path must be consumed
//! - A placeholder takes the longest run its converter accepts, backing off
//!   until the rest of the pattern matches
//! - Decoding happens after the structural match; a decode failure is a no-match
//! - Failed (token, offset) states are remembered, so a crafted path cannot
//!   force exponential backtracking

use std::collections::HashSet;
use std::fmt;

use crate::routing::converter::Converter;
use crate::routing::error::{PatternError, ReverseError};
use crate::routing::params::Params;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile pattern text.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut tokens = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(open) = rest.find('<') {
            if open > 0 {
                tokens.push(Token::Literal(rest[..open].to_string()));
            }
            let start = offset + open;
            let after_open = &rest[open + 1..];
            let close = after_open
                .find('>')
                .ok_or(PatternError::UnclosedPlaceholder(start))?;
            let inner = &after_open[..close];
            if inner.is_empty() {
                return Err(PatternError::EmptyPlaceholder(start));
            }

            let (converter, name) = match inner.split_once(':') {
                Some((conv, name)) => (conv.parse::<Converter>()?, name),
                None => (Converter::Str, inner),
            };
            if !is_identifier(name) {
                return Err(PatternError::InvalidParameterName(name.to_string()));
            }
            if seen.contains(&name) {
                return Err(PatternError::DuplicateParameter(name.to_string()));
            }
            seen.push(name);
            tokens.push(Token::Param {
                name: name.to_string(),
                converter,
            });

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            tokens.push(Token::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// The pattern text as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Declared parameters in order of appearance.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Param { name, converter } => Some((name.as_str(), *converter)),
            Token::Literal(_) => None,
        })
    }

    /// Match a whole path and decode its parameters.
    ///
    /// Returns `None` on a structural mismatch or a failed decode.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let mut captures = Vec::new();
        let mut failed = HashSet::new();
        if !self.match_from(0, path, 0, &mut captures, &mut failed) {
            return None;
        }

        let mut params = Params::new();
        for ((name, converter), text) in self.parameters().zip(captures) {
            params.insert(name, converter.decode(text)?);
        }
        Some(params)
    }

    /// Structural match of `tokens[idx..]` against `path[pos..]`.
    ///
    /// `failed` holds `(idx, pos)` states already known not to match, which
    /// keeps backtracking over several placeholders polynomial. A failed call
    /// leaves `captures` as it found it.
    fn match_from<'p>(
        &self,
        idx: usize,
        path: &'p str,
        pos: usize,
        captures: &mut Vec<&'p str>,
        failed: &mut HashSet<(usize, usize)>,
    ) -> bool {
        let Some(token) = self.tokens.get(idx) else {
            return pos == path.len();
        };
        if failed.contains(&(idx, pos)) {
            return false;
        }

        let rest = &path[pos..];
        let matched = match token {
            Token::Literal(lit) => {
                rest.starts_with(lit.as_str())
                    && self.match_from(idx + 1, path, pos + lit.len(), captures, failed)
            }
            Token::Param { converter, .. } => {
                let run_end = rest
                    .char_indices()
                    .find(|(_, c)| !converter.accepts_char(*c))
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());

                // longest first
                let mut found = false;
                for (i, c) in rest[..run_end].char_indices().rev() {
                    let end = pos + i + c.len_utf8();
                    captures.push(&path[pos..end]);
                    if self.match_from(idx + 1, path, end, captures, failed) {
                        found = true;
                        break;
                    }
                    captures.pop();
                }
                found
            }
        };

        if !matched {
            failed.insert((idx, pos));
        }
        matched
    }

    /// Format a path from string arguments.
    ///
    /// `route` only labels errors.
    pub fn reverse(&self, route: &str, args: &[(&str, &str)]) -> Result<String, ReverseError> {
        if let Some((unknown, _)) = args
            .iter()
            .find(|(arg, _)| !self.parameters().any(|(name, _)| name == *arg))
        {
            return Err(ReverseError::UnexpectedArgument {
                route: route.to_string(),
                param: unknown.to_string(),
            });
        }

        let mut path = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                Token::Literal(lit) => path.push_str(lit),
                Token::Param { name, converter } => {
                    let value = args
                        .iter()
                        .rev()
                        .find(|(arg, _)| *arg == name.as_str())
                        .map(|(_, value)| *value)
                        .ok_or_else(|| ReverseError::MissingArgument {
                            route: route.to_string(),
                            param: name.clone(),
                        })?;
                    let decoded = converter.decode(value).ok_or_else(|| {
                        ReverseError::InvalidArgument {
                            route: route.to_string(),
                            param: name.clone(),
                            value: value.to_string(),
                            converter: converter.as_str(),
                        }
                    })?;
                    // decoded form: UUIDs come out lowercase
                    path.push_str(&decoded.to_string());
                }
            }
        }
        Ok(path)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    #[test]
    fn test_literal_pattern_is_exact() {
        let p = Pattern::parse("event_list_create").unwrap();
        assert_eq!(p.match_path("event_list_create"), Some(Params::new()));
        assert_eq!(p.match_path("event_list_create/"), None);
        assert_eq!(p.match_path("event_list"), None);
        assert_eq!(p.match_path("xevent_list_create"), None);
        assert_eq!(p.parameters().count(), 0);
    }

    #[test]
    fn test_uuid_placeholder() {
        let p = Pattern::parse("event_detail/<uuid:pk>/").unwrap();
        let params = p
            .match_path("event_detail/123e4567-e89b-12d3-a456-426614174000/")
            .unwrap();
        let expected: Uuid = "123e4567-e89b-12d3-a456-426614174000".parse().unwrap();
        assert_eq!(params.uuid("pk"), Some(expected));

        assert_eq!(p.match_path("event_detail/not-a-uuid/"), None);
        // trailing slash is part of the pattern
        assert_eq!(p.match_path("event_detail/123e4567-e89b-12d3-a456-426614174000"), None);
        assert_eq!(p.match_path("event_detail//"), None);
    }

    #[test]
    fn test_default_converter_is_str() {
        let p = Pattern::parse("tags/<name>/").unwrap();
        assert_eq!(
            p.parameters().collect::<Vec<_>>(),
            vec![("name", Converter::Str)]
        );
        assert_eq!(p.match_path("tags/rust/").unwrap().str("name"), Some("rust"));
        assert_eq!(p.match_path("tags/a/b/"), None);
    }

    #[test]
    fn test_backtracks_over_shared_characters() {
        // `str` could swallow the `-` separator; the matcher must back off
        let p = Pattern::parse("<str:a>-<int:b>").unwrap();
        let params = p.match_path("x-y-42").unwrap();
        assert_eq!(params.str("a"), Some("x-y"));
        assert_eq!(params.int("b"), Some(42));
    }

    #[test]
    fn test_many_permissive_placeholders_stay_fast() {
        let p = Pattern::parse("<str:a>x<str:b>x<str:c>x<str:d>y").unwrap();
        let input = "x".repeat(400);

        let start = Instant::now();
        assert_eq!(p.match_path(&input), None);
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "took {:?}",
            start.elapsed()
        );

        let params = p.match_path(&format!("{}y", input)).unwrap();
        assert_eq!(params.str("d"), Some("x"));
        assert_eq!(params.str("a").map(str::len), Some(input.len() - 6));
    }

    #[test]
    fn test_path_converter_spans_segments() {
        let p = Pattern::parse("files/<path:rest>").unwrap();
        assert_eq!(p.match_path("files/a/b/c.txt").unwrap().str("rest"), Some("a/b/c.txt"));
        assert_eq!(p.match_path("files/"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Pattern::parse("a/<uuid:pk"),
            Err(PatternError::UnclosedPlaceholder(2))
        );
        assert_eq!(Pattern::parse("a/<>/"), Err(PatternError::EmptyPlaceholder(2)));
        assert_eq!(
            Pattern::parse("<float:x>"),
            Err(PatternError::UnknownConverter("float".into()))
        );
        assert_eq!(
            Pattern::parse("<int:1x>"),
            Err(PatternError::InvalidParameterName("1x".into()))
        );
        assert_eq!(
            Pattern::parse("<int:id>/<str:id>"),
            Err(PatternError::DuplicateParameter("id".into()))
        );
    }

    #[test]
    fn test_reverse_formats_and_validates() {
        let p = Pattern::parse("event_detail/<uuid:pk>/").unwrap();
        assert_eq!(
            p.reverse("event_detail", &[("pk", "123E4567-E89B-12D3-A456-426614174000")])
                .unwrap(),
            "event_detail/123e4567-e89b-12d3-a456-426614174000/"
        );
        assert!(matches!(
            p.reverse("event_detail", &[]),
            Err(ReverseError::MissingArgument { .. })
        ));
        assert!(matches!(
            p.reverse("event_detail", &[("pk", "nope")]),
            Err(ReverseError::InvalidArgument { converter: "uuid", .. })
        ));
        assert!(matches!(
            p.reverse(
                "event_detail",
                &[("pk", "123e4567-e89b-12d3-a456-426614174000"), ("id", "1")]
            ),
            Err(ReverseError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn test_display_keeps_declared_text() {
        let p = Pattern::parse("event_detail/<uuid:pk>/").unwrap();
        assert_eq!(p.to_string(), "event_detail/<uuid:pk>/");
    }
}
