//! Tagged sections in model replies, and attachment blocks in requests.
//!
//! A reply may contain zero or more named sections of the form
//! `<OUT filename="relative/path">...content...</OUT>`, interspersed with
//! arbitrary prose. A section's payload may itself contain the same
//! delimiter syntax (example code, quoted replies), so extraction tracks
//! nesting depth and matches each close to its corresponding open. A naive
//! first-closing-tag match truncates nested payloads and is exactly the
//! failure mode this module exists to avoid.
//!
//! Only the outermost, top-level sections are extracted; inner `<OUT>`
//! occurrences stay verbatim inside their parent's content.

const OPEN: &str = "<OUT";
const CLOSE: &str = "</OUT>";

/// A named span of reply content, destined for a declared output path.
///
/// Transient: lives from extraction until it is matched and written, or
/// discarded with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub filename: String,
    pub content: String,
}

/// Extract all top-level `<OUT filename="...">` sections from a reply.
///
/// Content is taken verbatim between a section's own open and close
/// delimiters. An open tag that never finds its matching close swallows
/// the rest of the reply and is dropped. An open tag without a `filename`
/// attribute is skipped (its span is still consumed so scanning stays at
/// the top level).
pub fn extract_sections(reply: &str) -> Vec<ExtractedSection> {
    let mut sections = Vec::new();
    let mut i = 0;

    while let Some(rel) = reply[i..].find(OPEN) {
        let start = i + rel;
        if !open_tag_at(reply, start) {
            // "<OUTPUT" or similar — not our tag.
            i = start + OPEN.len();
            continue;
        }
        let Some(tag_end_rel) = reply[start..].find('>') else {
            break;
        };
        let tag_end = start + tag_end_rel;
        let filename = filename_attr(&reply[start + OPEN.len()..tag_end]);
        let content_start = tag_end + 1;

        match find_matching_close(reply, content_start) {
            Some((content_end, after)) => {
                if let Some(filename) = filename {
                    sections.push(ExtractedSection {
                        filename,
                        content: reply[content_start..content_end].to_string(),
                    });
                }
                i = after;
            }
            // Unclosed section: everything that follows belongs to it.
            None => break,
        }
    }

    sections
}

/// Render a resolved input file as a delimited attachment block.
pub fn attachment_block(name: &str, content: &str) -> String {
    format!("<IN filename=\"{name}\">\n{content}\n</IN>\n")
}

/// Is the `<OUT` at byte offset `i` a real open tag (followed by
/// whitespace or `>`), not a prefix of a longer name?
fn open_tag_at(text: &str, i: usize) -> bool {
    matches!(
        text[i + OPEN.len()..].chars().next(),
        Some(c) if c.is_whitespace() || c == '>'
    )
}

/// Find the close delimiter matching an open tag whose content starts at
/// `from`, tracking nesting depth. Returns (content end, scan position
/// after the close).
fn find_matching_close(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut i = from;
    loop {
        let close = i + text[i..].find(CLOSE)?;
        // Count nested opens between the last scan point and this close.
        let mut scan = i;
        while let Some(rel) = text[scan..close].find(OPEN) {
            let open = scan + rel;
            if open_tag_at(text, open) {
                depth += 1;
            }
            scan = open + OPEN.len();
        }
        depth -= 1;
        if depth == 0 {
            return Some((close, close + CLOSE.len()));
        }
        i = close + CLOSE.len();
    }
}

/// Pull the value of a `filename="..."` attribute out of an open tag's
/// attribute text.
fn filename_attr(attrs: &str) -> Option<String> {
    let needle = "filename=\"";
    let start = attrs.find(needle)? + needle.len();
    let len = attrs[start..].find('"')?;
    Some(attrs[start..start + len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_section_verbatim_content() {
        let sections = extract_sections("<OUT filename=\"a.txt\">X</OUT>");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].filename, "a.txt");
        assert_eq!(sections[0].content, "X");
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let reply = "Here is the file you asked for:\n\
                     <OUT filename=\"a.txt\">alpha</OUT>\n\
                     Let me know if you need changes.";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "alpha");
    }

    #[test]
    fn multiple_sections_in_order() {
        let reply = "<OUT filename=\"a.txt\">one</OUT>\nprose\n<OUT filename=\"b.txt\">two</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].filename, "a.txt");
        assert_eq!(sections[1].filename, "b.txt");
        assert_eq!(sections[1].content, "two");
    }

    #[test]
    fn nested_delimiters_stay_literal() {
        let reply =
            "<OUT filename=\"a.txt\">before <OUT filename=\"inner\">x</OUT> after</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].filename, "a.txt");
        assert_eq!(
            sections[0].content,
            "before <OUT filename=\"inner\">x</OUT> after"
        );
    }

    #[test]
    fn first_close_matching_would_truncate() {
        // Regression guard: a scanner that stops at the first "</OUT>"
        // would emit this truncated content. The depth-tracking scan must
        // never produce it.
        let reply =
            "<OUT filename=\"a.txt\">before <OUT filename=\"inner\">x</OUT> after</OUT>";
        let naive_content = "before <OUT filename=\"inner\">x";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_ne!(sections[0].content, naive_content);
        assert!(sections[0].content.ends_with(" after"));
    }

    #[test]
    fn two_levels_of_nesting() {
        let reply = "<OUT filename=\"doc.md\">a <OUT x> b <OUT y>c</OUT> d</OUT> e</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "a <OUT x> b <OUT y>c</OUT> d</OUT> e");
    }

    #[test]
    fn zero_sections_yields_empty() {
        assert!(extract_sections("no tagged output here at all").is_empty());
    }

    #[test]
    fn unclosed_section_is_dropped() {
        let reply = "<OUT filename=\"a.txt\">never closed";
        assert!(extract_sections(reply).is_empty());
    }

    #[test]
    fn unclosed_tail_does_not_hide_earlier_sections() {
        let reply = "<OUT filename=\"a.txt\">ok</OUT> then <OUT filename=\"b.txt\">dangling";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].filename, "a.txt");
    }

    #[test]
    fn open_tag_without_filename_is_skipped() {
        let reply = "<OUT>anonymous</OUT> <OUT filename=\"b.txt\">named</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].filename, "b.txt");
    }

    #[test]
    fn longer_tag_names_do_not_match() {
        let reply = "<OUTPUT>nope</OUTPUT> <OUT filename=\"a.txt\">yes</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "yes");
    }

    #[test]
    fn multiline_content_preserved_exactly() {
        let reply = "<OUT filename=\"src/main.rs\">\nfn main() {}\n</OUT>";
        let sections = extract_sections(reply);
        assert_eq!(sections[0].content, "\nfn main() {}\n");
    }

    #[test]
    fn attachment_block_format() {
        let block = attachment_block("notes.txt", "alpha beta");
        assert_eq!(block, "<IN filename=\"notes.txt\">\nalpha beta\n</IN>\n");
    }
}
