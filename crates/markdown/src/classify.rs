//! Content field classification into typed items.

use crate::blocks::{
    extract_code_block, extract_list, extract_table, extract_text, BlockRecognizer,
    ExtractContext,
};
use crate::lists::DEFAULT_INDENT_UNIT;
use deck_core::{ContentItem, Diagnostics, InlineNormalizer};

/// Recognizers in priority order. Plain text is last and always matches a
/// non-blank line.
const RECOGNIZERS: [(&str, BlockRecognizer); 4] = [
    ("table", extract_table),
    ("code", extract_code_block),
    ("list", extract_list),
    ("text", extract_text),
];

/// Splits a Content field into an ordered sequence of content items.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    indent_unit: usize,
    normalizer: InlineNormalizer,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
            normalizer: InlineNormalizer::new(),
        }
    }
}

impl ContentClassifier {
    /// Create a classifier with 2-column indentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of indentation columns per list nesting level.
    pub fn with_indent_unit(mut self, unit: usize) -> Self {
        self.indent_unit = unit.max(1);
        self
    }

    /// Set the normalizer applied to non-code text.
    pub fn with_normalizer(mut self, normalizer: InlineNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Classify content text in a single forward pass.
    pub fn classify(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<ContentItem> {
        let lines: Vec<&str> = text.lines().collect();
        let mut items = Vec::new();
        let mut ctx = ExtractContext {
            indent_unit: self.indent_unit,
            normalizer: &self.normalizer,
            diagnostics,
        };

        let mut pos = 0;
        while pos < lines.len() {
            if lines[pos].trim().is_empty() {
                pos += 1;
                continue;
            }

            let remaining = &lines[pos..];
            let extracted = RECOGNIZERS.iter().find_map(|(name, recognize)| {
                let extracted = recognize(remaining, &mut ctx)?;
                log::trace!(
                    "Line {}: {} block, {} lines",
                    pos + 1,
                    name,
                    extracted.consumed
                );
                Some(extracted)
            });

            match extracted {
                Some(extracted) => {
                    pos += extracted.consumed.max(1);
                    items.extend(extracted.items);
                }
                None => pos += 1,
            }
        }

        items
    }
}
