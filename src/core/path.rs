//! Object path grammar, validation and parsing
//!
//! An object path addresses a field inside a tree of mappings and sequences:
//! `foo.bar`, `foo[0]`, `foo["bar"].baz[0]`. Single quotes are accepted and
//! treated exactly like double quotes.
//!
//! Validation and parsing are the same left-to-right scan ([`PathScanner`]);
//! `validate_path` runs it and drops the segments, `parse_path` keeps them.

use crate::error::{FieldPathError, Result};
use std::fmt;
use std::str::FromStr;

/// Scanner state. The two bracket states exclude each other by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    NumberBracket,
    StringBracket,
}

/// Characters that may start an identifier, after a `.` or inside `["`.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Replace every `'` with `"`.
///
/// Quoted keys therefore can never contain a literal `"`; there is no escape
/// sequence.
pub fn normalize_quotes(path: &str) -> String {
    path.replace('\'', "\"")
}

/// Single pass scanner over a quote-normalized path.
struct PathScanner<'a> {
    raw: &'a str,
    raw_chars: Vec<char>,
    chars: Vec<char>,
}

impl<'a> PathScanner<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            raw_chars: raw.chars().collect(),
            chars: normalize_quotes(raw).chars().collect(),
        }
    }

    /// Error pointing at `index`, reporting the character as the caller wrote it.
    fn error(&self, index: usize, reason: &str) -> FieldPathError {
        FieldPathError::invalid_path(self.raw_chars.get(index).copied(), index, self.raw, reason)
    }

    fn scan(self) -> Result<Vec<String>> {
        if self.chars.is_empty() {
            return Ok(vec![String::new()]);
        }

        match self.chars[0] {
            '.' => return Err(self.error(0, "path may not start with '.'")),
            '[' => {}
            c if is_identifier_start(c) => {}
            _ => {
                return Err(self.error(
                    0,
                    "expected a letter, '_', '$' or '[' at the start of a path",
                ))
            }
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut state = ScanState::Outside;
        let mut after_bracket = false;
        let mut i = 0;

        while i < self.chars.len() {
            let c = self.chars[i];
            let next = self.chars.get(i + 1).copied();

            match state {
                ScanState::Outside => match c {
                    '.' => {
                        if !next.is_some_and(is_identifier_start) {
                            return Err(self.error(
                                i + 1,
                                "expected a letter, '_' or '$' to follow '.'",
                            ));
                        }
                        flush(&mut current, &mut segments);
                        after_bracket = false;
                        i += 1;
                    }
                    '[' => {
                        flush(&mut current, &mut segments);
                        match next {
                            Some(d) if d.is_ascii_digit() => {
                                state = ScanState::NumberBracket;
                                i += 1;
                            }
                            Some('"') => {
                                match self.chars.get(i + 2).copied() {
                                    Some(k) if is_identifier_start(k) => {}
                                    Some('"') => {
                                        return Err(self.error(
                                            i + 2,
                                            "the string between the quotation-marks may not be empty",
                                        ))
                                    }
                                    _ => {
                                        return Err(self.error(
                                            i + 2,
                                            "expected a letter, '_' or '$' to follow '[\"'",
                                        ))
                                    }
                                }
                                state = ScanState::StringBracket;
                                i += 2;
                            }
                            _ => {
                                return Err(
                                    self.error(i + 1, "expected number or '\"' to follow a '['")
                                )
                            }
                        }
                        after_bracket = false;
                    }
                    ']' => return Err(self.error(i, "expected '[' to proceed")),
                    _ => {
                        if after_bracket {
                            return Err(self.error(i, "expected '.' or '[' to follow ']'"));
                        }
                        current.push(c);
                        i += 1;
                    }
                },
                ScanState::NumberBracket => match c {
                    ']' => {
                        flush(&mut current, &mut segments);
                        state = ScanState::Outside;
                        after_bracket = true;
                        i += 1;
                    }
                    d if d.is_ascii_digit() => {
                        current.push(d);
                        i += 1;
                    }
                    _ => return Err(self.error(i, "number expected inside of brackets")),
                },
                ScanState::StringBracket => match c {
                    '"' => {
                        if next != Some(']') {
                            return Err(self.error(i + 1, "expected ']' to follow a '\"'"));
                        }
                        flush(&mut current, &mut segments);
                        state = ScanState::Outside;
                        after_bracket = true;
                        i += 2;
                    }
                    '.' | '[' | ']' => {
                        return Err(self.error(i, "not allowed inside a quoted key"))
                    }
                    _ => {
                        current.push(c);
                        i += 1;
                    }
                },
            }
        }

        if state != ScanState::Outside {
            return Err(self.error(self.chars.len(), "unterminated bracket"));
        }
        flush(&mut current, &mut segments);

        Ok(segments)
    }
}

fn flush(current: &mut String, segments: &mut Vec<String>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Validate an object path without keeping its segments.
pub fn validate_path(path: &str) -> Result<()> {
    PathScanner::new(path).scan().map(|_| ())
}

/// Parse an object path into its segments.
///
/// The empty path parses to `[""]`; consumers treat the empty segment as
/// "stop here and return the current value".
pub fn parse_path(path: &str) -> Result<Vec<String>> {
    PathScanner::new(path).scan()
}

/// A validated, parsed object path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    segments: Vec<String>,
}

impl ObjectPath {
    /// Parse and validate a path string
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            segments: parse_path(input)?,
        })
    }

    /// The path that addresses the root itself
    pub fn identity() -> Self {
        Self {
            segments: vec![String::new()],
        }
    }

    /// Segments in traversal order, `[""]` for the identity path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_identity(&self) -> bool {
        self.segments.first().map_or(true, |s| s.is_empty())
    }

    /// Number of addressed levels; zero for the identity path
    pub fn len(&self) -> usize {
        if self.is_identity() {
            0
        } else {
            self.segments.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_identity()
    }

    /// Final segment (the child key), `None` for the identity path
    pub fn last(&self) -> Option<&str> {
        if self.is_identity() {
            None
        } else {
            self.segments.last().map(|s| s.as_str())
        }
    }

    /// Path of the containing node, `None` for the identity path
    pub fn parent(&self) -> Option<ObjectPath> {
        if self.is_identity() {
            return None;
        }
        if self.segments.len() == 1 {
            return Some(Self::identity());
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl Default for ObjectPath {
    fn default() -> Self {
        Self::identity()
    }
}

/// Canonical form: digit segments as `[n]`, keys in dot notation.
impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return Ok(());
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.chars().all(|c| c.is_ascii_digit()) {
                write!(f, "[{}]", segment)?;
            } else if i == 0 {
                write!(f, "{}", segment)?;
            } else {
                write!(f, ".{}", segment)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ObjectPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_at(path: &str) -> (Option<char>, usize) {
        match validate_path(path) {
            Err(FieldPathError::InvalidPath {
                character, index, ..
            }) => (character, index),
            other => panic!("expected InvalidPath for {:?}, got {:?}", path, other),
        }
    }

    #[test]
    fn test_valid_paths() {
        for path in [
            "",
            "a",
            "a.b",
            "a[0]",
            "a.b[0]",
            "a.b[0].c",
            "[0]",
            "[0][1][\"a\"]",
            "a['b']",
            "$meta._private",
            "a.a_a.a_a_a",
            "title with spaces",
        ] {
            assert!(validate_path(path).is_ok(), "{:?} should be valid", path);
        }
    }

    #[test]
    fn test_empty_path_parts() {
        for path in [".", "..", "a..b", "a.", ".a"] {
            assert!(validate_path(path).is_err(), "{:?} should be invalid", path);
        }
        assert_eq!(invalid_at(".a"), (Some('.'), 0));
        assert_eq!(invalid_at("a..b"), (Some('.'), 2));
        assert_eq!(invalid_at("a."), (None, 2));
    }

    #[test]
    fn test_invalid_bracket_content() {
        for path in ["[.]", "[]", "[a]", "[\"a.b\"]", "[\"a.\"]", "[\"a[\"]", "a[b].b"] {
            assert!(validate_path(path).is_err(), "{:?} should be invalid", path);
        }
        assert_eq!(invalid_at("a[b].b"), (Some('b'), 2));
        assert_eq!(invalid_at("[1a]"), (Some('a'), 2));
    }

    #[test]
    fn test_quoted_key_rules() {
        assert_eq!(invalid_at("a[\"\"]"), (Some('"'), 3));
        assert_eq!(invalid_at("a[\"1\"]"), (Some('1'), 3));
        assert_eq!(invalid_at("a[\"b\"c]"), (Some('c'), 5));
        // raw quote character is reported, not the normalized one
        assert_eq!(invalid_at("a['']"), (Some('\''), 3));
    }

    #[test]
    fn test_other_invalid_paths() {
        assert_eq!(invalid_at("a]b"), (Some(']'), 1));
        assert_eq!(invalid_at("a[0]b"), (Some('b'), 4));
        assert_eq!(invalid_at("1a"), (Some('1'), 0));
        assert_eq!(invalid_at("a["), (None, 2));
        assert_eq!(invalid_at("a[0"), (None, 3));
        assert_eq!(invalid_at("a[\"b"), (None, 4));
    }

    #[test]
    fn test_parse_segments() {
        assert_eq!(parse_path("").unwrap(), vec![""]);
        assert_eq!(parse_path("a").unwrap(), vec!["a"]);
        assert_eq!(parse_path("a.a_a.a_a_a").unwrap(), vec!["a", "a_a", "a_a_a"]);
        assert_eq!(parse_path("b[1].b_1_a").unwrap(), vec!["b", "1", "b_1_a"]);
        assert_eq!(parse_path("a[\"a_a\"]").unwrap(), vec!["a", "a_a"]);
        assert_eq!(parse_path("a['a_a']").unwrap(), vec!["a", "a_a"]);
        assert_eq!(parse_path("[0][1][\"a\"]").unwrap(), vec!["0", "1", "a"]);
        assert_eq!(parse_path("a[\"my key!\"].b").unwrap(), vec!["a", "my key!", "b"]);
    }

    #[test]
    fn test_parse_rejects_what_validate_rejects() {
        for path in [".a", "a[b]", "a..b", "a]"] {
            assert!(parse_path(path).is_err());
        }
    }

    #[test]
    fn test_object_path_accessors() {
        let path = ObjectPath::parse("a.b[2]").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some("2"));
        assert_eq!(path.parent().unwrap().segments(), &["a", "b"]);

        let single = ObjectPath::parse("a").unwrap();
        assert!(single.parent().unwrap().is_identity());

        let identity = ObjectPath::parse("").unwrap();
        assert!(identity.is_identity());
        assert!(identity.is_empty());
        assert_eq!(identity.len(), 0);
        assert_eq!(identity.last(), None);
        assert!(identity.parent().is_none());
        assert_eq!(identity, ObjectPath::identity());
    }

    #[test]
    fn test_canonical_display() {
        let path: ObjectPath = "a['b'][0].c".parse().unwrap();
        assert_eq!(path.to_string(), "a.b[0].c");
        assert_eq!(ObjectPath::parse(&path.to_string()).unwrap(), path);

        assert_eq!(ObjectPath::parse("[0][1]").unwrap().to_string(), "[0][1]");
        assert_eq!(ObjectPath::identity().to_string(), "");
    }
}
