//! Plain-text outline output and legacy projections for renderers.
//!
//! Renderers that predate typed content expect each slide body as a flat list
//! of `(text, level)` pairs. That shape is produced here, at the boundary,
//! from the canonical [`ContentItem`] sequence.

use crate::types::{ContentItem, Deck, SlideRecord};

/// Formatter for a human-readable outline of a parsed deck.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Spaces per nesting level.
    indent_width: usize,

    /// Whether to include speaker notes.
    include_notes: bool,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            indent_width: 2,
            include_notes: false,
        }
    }
}

impl OutlineFormatter {
    /// Create a new formatter with 2-space indentation and no notes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per nesting level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width.max(1);
        self
    }

    /// Set whether speaker notes are included.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Format a deck, slides separated by blank lines.
    ///
    /// # Example output
    /// ```text
    /// Slide 1 [TITLE SLIDE]: Hello World
    ///   Subtitle: A short tour
    ///
    /// Slide 2 [CONTENT]: Agenda
    ///   - Intro
    ///     - Background
    ///   1. Results
    /// ```
    pub fn format(&self, deck: &Deck) -> String {
        let mut blocks: Vec<String> = Vec::new();

        if let Some(title) = deck.title.as_deref().filter(|t| !t.is_empty()) {
            blocks.push(title.to_string());
        }

        blocks.extend(deck.slides.iter().map(|s| self.format_slide(s)));
        blocks.join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, deck: &Deck) -> String {
        let formatted = self.format(deck);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    /// Format a single slide.
    pub fn format_slide(&self, slide: &SlideRecord) -> String {
        let pad = " ".repeat(self.indent_width);
        let mut out = vec![format!(
            "Slide {} [{}]: {}",
            slide.ordinal, slide.declared_type, slide.title
        )];

        if let Some(subtitle) = &slide.subtitle {
            out.push(format!("{}Subtitle: {}", pad, subtitle));
        }

        for (text, level) in legacy_lines(slide) {
            for line in text.lines() {
                out.push(format!("{}{}{}", pad, " ".repeat(level * self.indent_width), line));
            }
        }

        if let Some(graphic) = slide.graphic_description.as_deref().filter(|g| !g.is_empty()) {
            out.push(format!("{}Graphic: {}", pad, graphic));
        }

        if self.include_notes {
            if let Some(notes) = slide.speaker_notes.as_deref().filter(|n| !n.is_empty()) {
                out.push(format!("{}Notes: {}", pad, notes));
            }
        }

        out.join("\n")
    }
}

/// Project a slide's content onto legacy `(text, level)` pairs.
///
/// List items keep their marker so numbering survives; tables become one
/// line per row and code blocks keep their text as a single entry.
pub fn legacy_lines(slide: &SlideRecord) -> Vec<(String, usize)> {
    slide.content.iter().flat_map(legacy_item).collect()
}

fn legacy_item(item: &ContentItem) -> Vec<(String, usize)> {
    match item {
        ContentItem::Bullet { text, level } => vec![(format!("- {}", text), *level)],
        ContentItem::Numbered {
            text,
            level,
            ordinal,
        } => vec![(format!("{}. {}", ordinal, text), *level)],
        ContentItem::Table { headers, rows } => std::iter::once(headers)
            .chain(rows.iter())
            .map(|row| (format!("| {} |", row.join(" | ")), 0))
            .collect(),
        ContentItem::CodeBlock { code, .. } => vec![(code.clone(), 0)],
        ContentItem::Text { text } => vec![(text.clone(), 0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slide() -> SlideRecord {
        let mut slide = SlideRecord::new(2, 2, "CONTENT");
        slide.title = "Agenda".to_string();
        slide.content = vec![
            ContentItem::bullet("Intro", 0),
            ContentItem::bullet("Background", 1),
            ContentItem::numbered("Results", 0, 1),
        ];
        slide.speaker_notes = Some("Keep it short".to_string());
        slide
    }

    #[test]
    fn test_legacy_lines() {
        let lines = legacy_lines(&sample_slide());
        assert_eq!(
            lines,
            vec![
                ("- Intro".to_string(), 0),
                ("- Background".to_string(), 1),
                ("1. Results".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_legacy_table_rows() {
        let mut slide = SlideRecord::new(1, 1, "TABLE");
        slide.content.push(ContentItem::Table {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "".to_string()]],
        });
        let lines = legacy_lines(&slide);
        assert_eq!(lines[0].0, "| A | B |");
        assert_eq!(lines[1].0, "| 1 |  |");
    }

    #[test]
    fn test_format_slide() {
        let formatter = OutlineFormatter::new();
        let expected = "Slide 2 [CONTENT]: Agenda\n  - Intro\n    - Background\n  1. Results";
        assert_eq!(formatter.format_slide(&sample_slide()), expected);
    }

    #[test]
    fn test_format_with_notes() {
        let formatter = OutlineFormatter::new().with_notes(true);
        assert!(formatter
            .format_slide(&sample_slide())
            .ends_with("  Notes: Keep it short"));
    }

    #[test]
    fn test_format_deck() {
        let mut deck = Deck::new();
        deck.title = Some("Quarterly Review".to_string());
        let mut first = SlideRecord::new(1, 1, "TITLE SLIDE");
        first.title = "Hello".to_string();
        first.subtitle = Some("World".to_string());
        deck.add_slide(first);
        deck.add_slide(sample_slide());

        let text = OutlineFormatter::new().format_with_newline(&deck);
        assert!(text.starts_with("Quarterly Review\n\nSlide 1 [TITLE SLIDE]: Hello\n  Subtitle: World\n\n"));
        assert!(text.ends_with("1. Results\n"));
    }

    #[test]
    fn test_format_empty_deck() {
        assert_eq!(OutlineFormatter::new().format_with_newline(&Deck::new()), "");
    }
}
