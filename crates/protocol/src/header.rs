//! RFC-822-ish header parsing for prompt documents.
//!
//! A prompt document is a header region and a free-text body, separated by
//! the first blank line. Header lines open a name/value pair at the first
//! colon; indented lines continue the most recently opened header, their
//! trimmed content joined by a single space. This module is pure text
//! handling — it knows nothing about which header names mean anything.

use promptree_core::error::DocumentError;
use std::collections::HashMap;

/// A parsed but uninterpreted prompt document: the accumulated header map
/// and the untouched body text.
///
/// Header names are case-sensitive literal tokens. Unrecognized names stay
/// in the map; downstream interpretation ignores them, but they are never
/// merged into the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Split raw document text into the header map and the body.
///
/// Pure function of the input text. Fails if the blank-line separator is
/// missing, if a header line has no colon, or if a continuation line
/// appears before any header has been opened.
pub fn parse(text: &str) -> Result<RawDocument, DocumentError> {
    let (header_region, body) = text
        .split_once("\n\n")
        .ok_or(DocumentError::MissingSeparator)?;

    let mut headers: HashMap<String, String> = HashMap::new();
    let mut current: Option<String> = None;

    for line in header_region.split('\n') {
        if line.is_empty() {
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            // Continuation line: extend the open header's value. A
            // whitespace-only line continues nothing and must not leave a
            // stray space behind.
            if line.trim().is_empty() {
                continue;
            }
            let Some(name) = &current else {
                return Err(DocumentError::ContinuationWithoutHeader {
                    line: line.to_string(),
                });
            };
            let value = headers.get_mut(name).expect("open header has an entry");
            value.push(' ');
            value.push_str(line.trim());
            continue;
        }
        // New header line: name before the first colon, value after.
        let Some((name, value)) = line.split_once(':') else {
            return Err(DocumentError::HeaderLineWithoutColon {
                line: line.to_string(),
            });
        };
        let name = name.trim().to_string();
        // A later occurrence overwrites; accumulation never spans
        // non-contiguous blocks.
        headers.insert(name.clone(), value.trim().to_string());
        current = Some(name);
    }

    Ok(RawDocument {
        headers,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_body() {
        let doc = parse("In: a.txt b.txt\nOut: c.txt\n\nDo the thing.\n").unwrap();
        assert_eq!(doc.headers["In"], "a.txt b.txt");
        assert_eq!(doc.headers["Out"], "c.txt");
        assert_eq!(doc.body, "Do the thing.\n");
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = parse("In: a.txt\nNo body follows").unwrap_err();
        assert_eq!(err, DocumentError::MissingSeparator);
    }

    #[test]
    fn continuation_lines_fold_with_single_spaces() {
        let doc = parse("Sysmsg: be terse\n  and precise\n\tand kind\n\nbody").unwrap();
        assert_eq!(doc.headers["Sysmsg"], "be terse and precise and kind");
    }

    #[test]
    fn continuation_folds_multiple_values_in_order() {
        let doc = parse("In: a.txt\n  b.txt\n  c.txt\n\nbody").unwrap();
        assert_eq!(doc.headers["In"], "a.txt b.txt c.txt");
    }

    #[test]
    fn header_line_without_colon_is_an_error() {
        let err = parse("In a.txt\n\nbody").unwrap_err();
        assert_eq!(
            err,
            DocumentError::HeaderLineWithoutColon {
                line: "In a.txt".into()
            }
        );
    }

    #[test]
    fn whitespace_only_continuation_adds_no_space() {
        let doc = parse("Sysmsg: be terse\n   \n  and kind\n\nbody").unwrap();
        assert_eq!(doc.headers["Sysmsg"], "be terse and kind");

        let doc = parse("Sysmsg: be terse\n\t\n\nbody").unwrap();
        assert_eq!(doc.headers["Sysmsg"], "be terse");
    }

    #[test]
    fn continuation_before_any_header_is_an_error() {
        let err = parse("  dangling\nIn: a.txt\n\nbody").unwrap_err();
        assert!(matches!(err, DocumentError::ContinuationWithoutHeader { .. }));
    }

    #[test]
    fn later_occurrence_overwrites_earlier() {
        let doc = parse("In: a.txt\nOut: x.txt\nIn: b.txt\n\nbody").unwrap();
        assert_eq!(doc.headers["In"], "b.txt");
    }

    #[test]
    fn continuation_attaches_to_reopened_header() {
        // After "In" is reopened, continuations extend the new value only.
        let doc = parse("In: a.txt\nOut: x.txt\nIn: b.txt\n  c.txt\n\nbody").unwrap();
        assert_eq!(doc.headers["In"], "b.txt c.txt");
        assert_eq!(doc.headers["Out"], "x.txt");
    }

    #[test]
    fn unrecognized_headers_are_preserved() {
        let doc = parse("X-Custom: anything\nIn: a.txt\n\nbody").unwrap();
        assert_eq!(doc.headers["X-Custom"], "anything");
    }

    #[test]
    fn body_is_untouched() {
        let doc = parse("In: a.txt\n\n  leading spaces kept\n\ntrailing too\n\n").unwrap();
        assert_eq!(doc.body, "  leading spaces kept\n\ntrailing too\n\n");
    }

    #[test]
    fn empty_header_region_yields_no_headers() {
        let doc = parse("\n\nonly a body").unwrap();
        assert!(doc.headers.is_empty());
        assert_eq!(doc.body, "only a body");
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "In: a.txt\n  b.txt\nSysmsg: hello\n\nbody text\n";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }
}
