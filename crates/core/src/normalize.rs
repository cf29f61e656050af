//! Inline formatting removal for extracted slide text.
//!
//! Strips emphasis and code-span markers while keeping the literal text they
//! wrap, plus any dangling markers an author left unbalanced at either end of
//! a line. Output is a fixed point: normalizing it again changes nothing.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// `**strong**`; the inner text must not start or end with whitespace.
static STRONG_STAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*").unwrap());

/// `__strong__`, only when not glued to surrounding word characters.
static STRONG_UNDERSCORE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\W)__(\S(?:.*?\S)?)__(\W|$)").unwrap());

/// `*emphasis*`
static EMPHASIS_STAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").unwrap());

/// `_emphasis_`, leaving snake_case identifiers alone.
static EMPHASIS_UNDERSCORE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\W)_([^_\s](?:[^_]*[^_\s])?)_(\W|$)").unwrap());

static CODE_SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Unpaired markers at the start of a line, e.g. `** Title`.
static LEADING_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*+|__)\s*").unwrap());

/// Unpaired markers at the end of a line.
static TRAILING_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\*+|__)$").unwrap());

/// Removes inline markdown emphasis from slide text.
///
/// Never apply this to code block content; asterisks and backticks there are data.
#[derive(Debug, Clone)]
pub struct InlineNormalizer {
    /// Whether to compose text to Unicode NFC.
    unicode_nfc: bool,
}

impl Default for InlineNormalizer {
    fn default() -> Self {
        Self { unicode_nfc: true }
    }
}

impl InlineNormalizer {
    /// Create a normalizer with NFC composition enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to compose text to Unicode NFC.
    pub fn with_unicode_nfc(mut self, enabled: bool) -> Self {
        self.unicode_nfc = enabled;
        self
    }

    /// Normalize possibly multi-line text.
    ///
    /// Each line is normalized on its own. Blank lines at either end are
    /// dropped; interior blank lines are kept so paragraphs survive.
    pub fn normalize(&self, text: &str) -> String {
        let lines: Vec<String> = text.lines().map(|l| self.normalize_line(l)).collect();

        let first = lines.iter().position(|l| !l.is_empty());
        let last = lines.iter().rposition(|l| !l.is_empty());

        match (first, last) {
            (Some(first), Some(last)) => lines[first..=last].join("\n"),
            _ => String::new(),
        }
    }

    /// Normalize a single line of text.
    ///
    /// Passes run in a fixed order: strong spans, emphasis spans, code spans,
    /// then dangling markers. The sequence repeats until the line stops changing.
    pub fn normalize_line(&self, line: &str) -> String {
        let mut current = line.trim().to_string();

        // After the first pass the line is NFC. From then on a pass either
        // deletes marker characters (NFC never lengthens what is left) or only
        // recomposes, after which the next pass finds nothing to change. The
        // line shrinks on every round that changes it, so this terminates.
        loop {
            let next = self.strip_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn strip_pass(&self, line: &str) -> String {
        let composed;
        let line = if self.unicode_nfc {
            composed = line.nfc().collect::<String>();
            composed.as_str()
        } else {
            line
        };

        let result = STRONG_STAR_REGEX.replace_all(line, "$1");
        let result = STRONG_UNDERSCORE_REGEX.replace_all(&result, "${1}${2}${3}");
        let result = EMPHASIS_STAR_REGEX.replace_all(&result, "$1");
        let result = EMPHASIS_UNDERSCORE_REGEX.replace_all(&result, "${1}${2}${3}");
        let result = CODE_SPAN_REGEX.replace_all(&result, "$1");
        let result = LEADING_MARKER_REGEX.replace(&result, "");
        let result = TRAILING_MARKER_REGEX.replace(&result, "");

        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> String {
        InlineNormalizer::new().normalize(text)
    }

    #[test]
    fn test_strip_strong() {
        assert_eq!(norm("Hello **World**"), "Hello World");
        assert_eq!(norm("__Bold__ move"), "Bold move");
        assert_eq!(norm("**Q3:** revenue"), "Q3: revenue");
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(norm("a *quiet* word"), "a quiet word");
        assert_eq!(norm("a _quiet_ word"), "a quiet word");
        assert_eq!(norm("***both***"), "both");
        assert_eq!(norm("**outer *inner* outer**"), "outer inner outer");
    }

    #[test]
    fn test_strip_code_spans() {
        assert_eq!(norm("run `cargo test` now"), "run cargo test now");
    }

    #[test]
    fn test_dangling_markers() {
        assert_eq!(norm("** Title"), "Title");
        assert_eq!(norm("Title **"), "Title");
        assert_eq!(norm("**Title"), "Title");
        assert_eq!(norm("__Title"), "Title");
        assert_eq!(norm("*"), "");
    }

    #[test]
    fn test_preserves_punctuation() {
        assert_eq!(norm("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(norm("snake_case_name stays"), "snake_case_name stays");
        assert_eq!(norm("Costs: $5 (approx.) - see [1]"), "Costs: $5 (approx.) - see [1]");
        assert_eq!(norm("don't stop"), "don't stop");
    }

    #[test]
    fn test_multiline_keeps_paragraphs() {
        assert_eq!(
            norm("\n\n**First** line\n\n*second* line\n\n"),
            "First line\n\nsecond line"
        );
    }

    #[test]
    fn test_unicode_composition() {
        let decomposed = "Cafe\u{0301}";
        assert_eq!(norm(decomposed), "Caf\u{e9}");
        assert_eq!(
            InlineNormalizer::new().with_unicode_nfc(false).normalize(decomposed),
            decomposed
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello **World**",
            "** Title",
            "***x***",
            "*a**b*",
            "`*`x`*`",
            "*`x`*",
            "** **x** **",
            "__a__b__",
            "_a_ _b_ _c_",
            "e*\u{0301}*",
            "**unclosed *mixed `code",
            "5 * 3 * 2",
            "",
            "   ",
        ];

        let normalizer = InlineNormalizer::new();
        for input in inputs {
            let once = normalizer.normalize(input);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_deep_nesting_settles() {
        let input = format!("{}x{}", "**w *v ".repeat(60), " y* z**".repeat(60));

        let normalizer = InlineNormalizer::new();
        let once = normalizer.normalize_line(&input);

        assert!(once.chars().count() < input.chars().count());
        assert!(once.contains('x'));
        assert_eq!(normalizer.normalize_line(&once), once);
    }
}
