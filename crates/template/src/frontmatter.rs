//! Front matter parser for template sources.
//!
//! Templates may start with a `---` delimited block of `key: value` lines:
//!
//! ```text
//! ---
//! title: Monthly digest
//! preheader: Your highlights for August
//! ---
//! <html>...</html>
//! ```
//!
//! Everything between the delimiters becomes the template's front matter, an
//! ordered string-to-string mapping; everything after the closing delimiter
//! is the template body. Front matter is read-only once parsed: hooks and
//! the render pipeline receive it by shared reference.

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Per-template metadata extracted before compilation
pub type FrontMatter = IndexMap<String, String>;

/// Delimiter line for front matter blocks
const DELIMITER: &str = "---";

/// Split a template source into front matter and body.
///
/// # Rules
///
/// - A source that does not start with `---` has empty front matter and is
///   returned whole as the body.
/// - Empty lines and `#` comment lines inside the block are ignored.
/// - Keys are split from values at the first `:`; both sides are trimmed.
/// - A block line without a `:` or an unterminated block is an error.
///
/// # Errors
///
/// Returns [`Error::FrontMatter`] on a malformed block.
pub fn parse(source: &str) -> Result<(FrontMatter, &str)> {
    let Some(rest) = strip_opening_delimiter(source) else {
        return Ok((FrontMatter::new(), source));
    };

    let mut matter = FrontMatter::new();
    let mut offset = 0;

    for line in rest.split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim();

        if trimmed == DELIMITER {
            return Ok((matter, &rest[offset..]));
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            return Err(Error::FrontMatter(format!(
                "expected 'key: value', got '{trimmed}'"
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::FrontMatter(format!(
                "empty key in line '{trimmed}'"
            )));
        }

        matter.insert(key.to_string(), value.trim().to_string());
    }

    Err(Error::FrontMatter(
        "unterminated front matter block (missing closing '---')".to_string(),
    ))
}

/// Strip the opening `---` line, returning the remainder of the source
fn strip_opening_delimiter(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(DELIMITER)?;
    // The delimiter must be the whole first line.
    match rest.strip_prefix('\n') {
        Some(body) => Some(body),
        None => rest.strip_prefix("\r\n"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_no_front_matter() {
        let source = "<p>plain body</p>";
        let (matter, body) = parse(source).unwrap();
        assert!(matter.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_basic_block() {
        let source = "---\ntitle: Hello\npreheader: World\n---\n<p>body</p>";
        let (matter, body) = parse(source).unwrap();
        assert_eq!(matter["title"], "Hello");
        assert_eq!(matter["preheader"], "World");
        assert_eq!(body, "<p>body</p>");
    }

    #[test]
    fn test_preserves_key_order() {
        let source = "---\nzebra: 1\nalpha: 2\n---\n";
        let (matter, _) = parse(source).unwrap();
        let keys: Vec<&str> = matter.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
    }

    #[test]
    fn test_value_may_contain_colon() {
        let source = "---\nurl: https://example.com/a\n---\n";
        let (matter, _) = parse(source).unwrap();
        assert_eq!(matter["url"], "https://example.com/a");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let source = "---\n# a comment\n\ntitle: Hi\n---\nbody";
        let (matter, body) = parse(source).unwrap();
        assert_eq!(matter.len(), 1);
        assert_eq!(matter["title"], "Hi");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unterminated_block_errors() {
        let source = "---\ntitle: Hi\nfrom: us";
        let result = parse(source);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unterminated"));
    }

    #[test]
    fn test_unterminated_block_with_bad_line_reports_the_line() {
        // The malformed line comes first, before EOF can prove the block
        // unterminated.
        let source = "---\ntitle: Hi\n<p>no closing</p>";
        let result = parse(source);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("key: value"));
    }

    #[test]
    fn test_line_without_colon_errors() {
        let source = "---\nnot a pair\n---\nbody";
        let result = parse(source);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("key: value"));
    }

    #[test]
    fn test_empty_key_errors() {
        let source = "---\n: value\n---\nbody";
        assert!(parse(source).is_err());
    }

    #[test]
    fn test_dashes_inside_body_left_alone() {
        let source = "<p>a</p>\n---\n<p>b</p>";
        let (matter, body) = parse(source).unwrap();
        assert!(matter.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_crlf_delimiters() {
        let source = "---\r\ntitle: Hi\r\n---\r\nbody";
        let (matter, body) = parse(source).unwrap();
        assert_eq!(matter["title"], "Hi");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_block() {
        let source = "---\n---\nbody";
        let (matter, body) = parse(source).unwrap();
        assert!(matter.is_empty());
        assert_eq!(body, "body");
    }
}
