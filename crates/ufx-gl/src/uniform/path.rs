//! Uniform name paths.
//!
//! Reflected names use GLSL access syntax: `lights[2].color`, `material.diffuse`,
//! `weights[0]`. A path is the sequence of field and index segments that
//! syntax denotes.

use std::fmt;

use crate::error::GlError;

/// One step of a uniform path.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// `name` or `.name`
    Field(String),
    /// `[n]`
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Parses `a.b[0].c` into `[Field(a), Field(b), Index(0), Field(c)]`.
///
/// A path may start with either a field or an index, so suffixes such as
/// `[0].c` (left after navigating to `a.b`) parse too. The empty path parses to
/// no segments.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, GlError> {
    let malformed = |reason| GlError::MalformedName { name: path.to_string(), reason };

    let mut segments = Vec::new();
    let mut rest = path;
    let mut first = true;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']').ok_or_else(|| malformed("unterminated `[`"))?;
            let digits = &after[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed("array index is not a number"));
            }
            let index = digits
                .parse::<usize>()
                .map_err(|_| malformed("array index out of range"))?;
            segments.push(Segment::Index(index));
            rest = &after[close + 1..];
        } else {
            let body = if first {
                rest
            } else {
                rest.strip_prefix('.')
                    .ok_or_else(|| malformed("expected `.` or `[`"))?
            };
            let end = body.find(['.', '[']).unwrap_or(body.len());
            let field = &body[..end];
            if field.is_empty() {
                return Err(malformed("empty field name"));
            }
            if !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(malformed("invalid character in field name"));
            }
            segments.push(Segment::Field(field.to_string()));
            rest = &body[end..];
        }
        first = false;
    }

    Ok(segments)
}

/// Renders segments back to GLSL access syntax.
pub fn render_path(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && matches!(segment, Segment::Field(_)) {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

/// Splits a trailing array subscript: `lights[0]` → `("lights", 0)`.
///
/// Returns `None` when the name does not end in `[n]`.
pub fn split_array_suffix(name: &str) -> Option<(&str, usize)> {
    let body = name.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((&name[..open], index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Segment { Segment::Field(s.to_string()) }

    // ── parse_path ────────────────────────────────────────────────────────

    #[test]
    fn parses_plain_name() {
        assert_eq!(parse_path("u_time").unwrap(), vec![field("u_time")]);
    }

    #[test]
    fn parses_dotted_and_indexed() {
        assert_eq!(
            parse_path("a.b[0].c").unwrap(),
            vec![field("a"), field("b"), Segment::Index(0), field("c")]
        );
    }

    #[test]
    fn parses_leading_index_suffix() {
        assert_eq!(
            parse_path("[3].c").unwrap(),
            vec![Segment::Index(3), field("c")]
        );
    }

    #[test]
    fn parses_consecutive_indices() {
        assert_eq!(
            parse_path("grid[1][2]").unwrap(),
            vec![field("grid"), Segment::Index(1), Segment::Index(2)]
        );
    }

    #[test]
    fn empty_path_has_no_segments() {
        assert!(parse_path("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["a..b", "a[", "a[x]", "a[]", ".a", "a.", "a]b", "a[-1]", "a b"] {
            assert!(parse_path(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    // ── render_path ───────────────────────────────────────────────────────

    #[test]
    fn render_restores_syntax() {
        let path = "lights[2].color";
        assert_eq!(render_path(&parse_path(path).unwrap()), path);
    }

    // ── split_array_suffix ────────────────────────────────────────────────

    #[test]
    fn splits_trailing_subscript() {
        assert_eq!(split_array_suffix("weights[0]"), Some(("weights", 0)));
        assert_eq!(split_array_suffix("s[1].v[0]"), Some(("s[1].v", 0)));
    }

    #[test]
    fn no_subscript_is_none() {
        assert_eq!(split_array_suffix("u_color"), None);
        assert_eq!(split_array_suffix("s[0].x"), None);
        assert_eq!(split_array_suffix("odd[]"), None);
    }
}
