//! Document segmentation into per-slide spans.
//!
//! A slide starts at a header line such as `## SLIDE 3: CONTENT SLIDE` or
//! `### **Slide 3: Content**` and runs until the next header or the end of
//! the document. Two and three `#` markers are equivalent.

use crate::blocks::{fence_open, is_fence_close};
use regex::Regex;
use std::sync::LazyLock;

/// 1-3 `#`, optional bold, the word "slide", a number, a colon, and a type label.
static SLIDE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*#{1,3}[ \t]*(?:\*\*|__)?[ \t]*slide[ \t]+(\d{1,9})[ \t]*(?:\*\*|__)?[ \t]*:(.*)$")
        .unwrap()
});

/// A single-`#` heading, used as the deck title when it precedes the first slide.
static DECK_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*#[ \t]+(\S.*)$").unwrap());

/// One slide's raw span within the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSegment<'a> {
    /// 1-based position in the document.
    pub ordinal: usize,

    /// Number as written in the header.
    pub declared_number: u32,

    /// Type label from the header, trimmed.
    pub declared_type: String,

    /// 1-based line number of the header.
    pub line: usize,

    /// Text after the header line, up to the next header.
    pub body: &'a str,
}

/// Result of splitting a document into slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation<'a> {
    /// Text before the first slide header.
    pub preamble: &'a str,

    pub slides: Vec<SlideSegment<'a>>,
}

impl<'a> Segmentation<'a> {
    /// Title from a top-level `# Heading` in the preamble.
    pub fn deck_title(&self) -> Option<&'a str> {
        self.preamble.lines().find_map(|line| {
            DECK_TITLE_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
        })
    }
}

/// Header fields parsed from one line.
struct Header {
    number: u32,
    declared_type: String,
}

fn parse_header(line: &str) -> Option<Header> {
    let caps = SLIDE_HEADER_REGEX.captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let declared_type = caps
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
        .to_string();

    Some(Header {
        number,
        declared_type,
    })
}

/// One line of the document with its byte span (including the newline).
struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|raw| {
            let start = offset;
            offset += raw.len();
            Line {
                start,
                end: offset,
                text: raw.trim_end_matches(['\n', '\r']),
            }
        })
        .collect()
}

/// Whether an open fence is closed before the next slide header.
///
/// Stops at the first header, so each line is scanned at most once per fence.
fn fence_closes_before_header(lines: &[Line<'_>], fence_len: usize) -> bool {
    for line in lines {
        if is_fence_close(line.text, fence_len) {
            return true;
        }
        if parse_header(line.text).is_some() {
            return false;
        }
    }
    false
}

/// Split a document into slide spans.
///
/// A header-looking line inside a fenced code block is ignored when the
/// fence closes before the next header. A fence left open ends at the next
/// slide header, so it never hides later slides. A document without any
/// header yields no slides; that is not an error here.
pub fn segment(text: &str) -> Segmentation<'_> {
    let lines = split_lines(text);
    let mut slides: Vec<SlideSegment<'_>> = Vec::new();
    let mut preamble_end = text.len();

    // Header of the slide currently being collected, and where its body starts.
    let mut open: Option<(Header, usize, usize)> = None;
    let mut fence: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let header = parse_header(line.text);

        match fence {
            Some(fence_len) if is_fence_close(line.text, fence_len) => {
                fence = None;
                continue;
            }
            Some(fence_len) => {
                if header.is_none() || fence_closes_before_header(&lines[idx + 1..], fence_len) {
                    continue;
                }
                log::debug!("Unclosed code fence ends at slide header on line {}", idx + 1);
                fence = None;
            }
            None => {
                if let Some((fence_len, _)) = fence_open(line.text) {
                    fence = Some(fence_len);
                    continue;
                }
            }
        }

        let Some(header) = header else {
            continue;
        };

        match open.take() {
            Some((prev, line_no, body_start)) => {
                slides.push(close_segment(text, slides.len() + 1, prev, line_no, body_start, line.start));
            }
            None => preamble_end = line.start,
        }

        log::trace!("Slide header at line {}: {:?}", idx + 1, line.text);
        open = Some((header, idx + 1, line.end));
    }

    if let Some((prev, line_no, body_start)) = open {
        slides.push(close_segment(text, slides.len() + 1, prev, line_no, body_start, text.len()));
    }

    Segmentation {
        preamble: &text[..preamble_end],
        slides,
    }
}

fn close_segment(
    text: &str,
    ordinal: usize,
    header: Header,
    line: usize,
    start: usize,
    end: usize,
) -> SlideSegment<'_> {
    if header.number as usize != ordinal {
        log::debug!(
            "Slide at line {} declares number {} but is slide {} in document order",
            line,
            header.number,
            ordinal
        );
    }

    SlideSegment {
        ordinal,
        declared_number: header.number,
        declared_type: header.declared_type,
        line,
        body: &text[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_variants() {
        let h = parse_header("## SLIDE 1: TITLE SLIDE").unwrap();
        assert_eq!(h.number, 1);
        assert_eq!(h.declared_type, "TITLE SLIDE");

        let h = parse_header("### **Slide 12: Content**").unwrap();
        assert_eq!(h.number, 12);
        assert_eq!(h.declared_type, "Content");

        let h = parse_header("# slide 3 :   Two Column   ").unwrap();
        assert_eq!(h.number, 3);
        assert_eq!(h.declared_type, "Two Column");

        let h = parse_header("## **Slide 4:** Closing").unwrap();
        assert_eq!(h.declared_type, "Closing");

        let h = parse_header("## Slide 5:").unwrap();
        assert_eq!(h.declared_type, "");
    }

    #[test]
    fn test_parse_header_rejects() {
        assert!(parse_header("#### Slide 1: Too deep").is_none());
        assert!(parse_header("## Slide one: Words").is_none());
        assert!(parse_header("## Slide 1 Title").is_none());
        assert!(parse_header("Slide 1: No marker").is_none());
        assert!(parse_header("## Slideshow 1: Nope").is_none());
    }

    #[test]
    fn test_segment_bodies() {
        let doc = "# Deck\n\n## SLIDE 1: TITLE\n**Title:** A\n### SLIDE 2: CONTENT\n**Title:** B\n";
        let seg = segment(doc);

        assert_eq!(seg.preamble, "# Deck\n\n");
        assert_eq!(seg.deck_title(), Some("Deck"));
        assert_eq!(seg.slides.len(), 2);

        assert_eq!(seg.slides[0].ordinal, 1);
        assert_eq!(seg.slides[0].line, 3);
        assert_eq!(seg.slides[0].body, "**Title:** A\n");
        assert_eq!(seg.slides[1].ordinal, 2);
        assert_eq!(seg.slides[1].declared_type, "CONTENT");
        assert_eq!(seg.slides[1].body, "**Title:** B\n");
    }

    #[test]
    fn test_no_headers() {
        let seg = segment("Just some notes\n- and a list\n");
        assert!(seg.slides.is_empty());
        assert_eq!(seg.preamble, "Just some notes\n- and a list\n");
        assert_eq!(seg.deck_title(), None);
    }

    #[test]
    fn test_duplicate_numbers_are_kept() {
        let doc = "## Slide 2: A\n## Slide 2: B\n## Slide 1: C";
        let seg = segment(doc);

        let ordinals: Vec<_> = seg.slides.iter().map(|s| s.ordinal).collect();
        let declared: Vec<_> = seg.slides.iter().map(|s| s.declared_number).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert_eq!(declared, vec![2, 2, 1]);
        assert_eq!(seg.slides[0].body, "");
        assert_eq!(seg.slides[2].body, "");
    }

    #[test]
    fn test_header_inside_code_fence_ignored() {
        let doc = "## Slide 1: Code\n```md\n## Slide 2: Fake\n```\n## Slide 2: Real\n";
        let seg = segment(doc);

        assert_eq!(seg.slides.len(), 2);
        assert!(seg.slides[0].body.contains("## Slide 2: Fake"));
        assert_eq!(seg.slides[1].declared_type, "Real");
    }

    #[test]
    fn test_unclosed_fence_ends_at_next_header() {
        let doc = "## SLIDE 1: CODE\n**Title:** A\n**Content:**\n```\nlet x = 1;\n\n## SLIDE 2: CONTENT\n**Title:** B\n## SLIDE 3: CONTENT\n**Title:** C\n";
        let seg = segment(doc);

        let types: Vec<_> = seg.slides.iter().map(|s| s.declared_type.as_str()).collect();
        assert_eq!(types, vec!["CODE", "CONTENT", "CONTENT"]);
        assert_eq!(seg.slides[0].body, "**Title:** A\n**Content:**\n```\nlet x = 1;\n\n");
        assert_eq!(seg.slides[1].body, "**Title:** B\n");
    }

    #[test]
    fn test_inline_backticks_do_not_open_fence() {
        let doc = "## Slide 1: A\n```inline``` code\n## Slide 2: B\n";
        let seg = segment(doc);
        assert_eq!(seg.slides.len(), 2);
    }

    #[test]
    fn test_crlf_lines() {
        let seg = segment("## Slide 1: Title\r\nbody\r\n");
        assert_eq!(seg.slides[0].declared_type, "Title");
        assert_eq!(seg.slides[0].body, "body\r\n");
    }
}
