//! List item classification for single lines.

use crate::fields::is_rule_line;

/// Default number of indentation columns per nesting level.
pub const DEFAULT_INDENT_UNIT: usize = 2;

/// A line recognized as a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLine<'a> {
    /// `- text` or `* text`
    Bulleted { level: usize, text: &'a str },

    /// `3. text`; `ordinal` is the number as written.
    Numbered {
        level: usize,
        ordinal: u64,
        text: &'a str,
    },
}

impl<'a> ListLine<'a> {
    pub fn level(&self) -> usize {
        match self {
            ListLine::Bulleted { level, .. } | ListLine::Numbered { level, .. } => *level,
        }
    }

    pub fn text(&self) -> &'a str {
        match self {
            ListLine::Bulleted { text, .. } | ListLine::Numbered { text, .. } => text,
        }
    }
}

/// Indentation width of a line in columns; a tab counts as one full unit.
pub fn indent_width(line: &str, indent_unit: usize) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { indent_unit } else { 1 })
        .sum()
}

/// Nesting level implied by a line's leading whitespace.
pub fn nesting_level(line: &str, indent_unit: usize) -> usize {
    let unit = indent_unit.max(1);
    indent_width(line, unit) / unit
}

/// Classify a line as a bulleted item, a numbered item, or neither.
pub fn classify_line(line: &str, indent_unit: usize) -> Option<ListLine<'_>> {
    // `* * *` and `- - -` are thematic breaks, not bullets.
    if is_rule_line(line) {
        return None;
    }

    let line = line.trim_end();
    let body = line.trim_start();
    let level = nesting_level(line, indent_unit);

    if let Some(rest) = body.strip_prefix(['-', '*']) {
        if rest.starts_with([' ', '\t']) {
            return Some(ListLine::Bulleted {
                level,
                text: rest.trim_start(),
            });
        }
        return None;
    }

    let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let rest = body[digits..].strip_prefix('.')?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let ordinal = body[..digits].parse().ok()?;
    Some(ListLine::Numbered {
        level,
        ordinal,
        text: rest.trim_start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets() {
        assert_eq!(
            classify_line("- Alpha", 2),
            Some(ListLine::Bulleted {
                level: 0,
                text: "Alpha"
            })
        );
        assert_eq!(
            classify_line("  * Beta  ", 2),
            Some(ListLine::Bulleted {
                level: 1,
                text: "Beta"
            })
        );
        assert_eq!(classify_line("    -   Gamma", 2).map(|l| l.level()), Some(2));
    }

    #[test]
    fn test_numbered() {
        assert_eq!(
            classify_line("1. First", 2),
            Some(ListLine::Numbered {
                level: 0,
                ordinal: 1,
                text: "First"
            })
        );
        assert_eq!(
            classify_line("  42. Answer", 2),
            Some(ListLine::Numbered {
                level: 1,
                ordinal: 42,
                text: "Answer"
            })
        );
    }

    #[test]
    fn test_not_list_items() {
        assert_eq!(classify_line("**Bold** start", 2), None);
        assert_eq!(classify_line("-dash without space", 2), None);
        assert_eq!(classify_line("---", 2), None);
        assert_eq!(classify_line("* * *", 2), None);
        assert_eq!(classify_line("  - - -", 2), None);
        assert_eq!(classify_line("2.5 percent", 2), None);
        assert_eq!(classify_line("2) paren style", 2), None);
        assert_eq!(classify_line("plain text", 2), None);
        assert_eq!(classify_line("- ", 2), None);
        assert_eq!(classify_line("", 2), None);
    }

    #[test]
    fn test_overflowing_number_is_not_numbered() {
        assert_eq!(classify_line("123456789012345678901234. big", 2), None);
    }

    #[test]
    fn test_tabs_count_as_one_unit() {
        assert_eq!(classify_line("\t- Tabbed", 2).map(|l| l.level()), Some(1));
        assert_eq!(classify_line("\t  - Mixed", 2).map(|l| l.level()), Some(2));
        assert_eq!(classify_line("\t- Tabbed", 4).map(|l| l.level()), Some(1));
        assert_eq!(classify_line("   - Odd", 2).map(|l| l.level()), Some(1));
    }

    #[test]
    fn test_zero_indent_unit_is_clamped() {
        assert_eq!(nesting_level("   x", 0), 3);
    }
}
