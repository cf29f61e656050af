//! WASM-compatible wrapper for markdown slide-outline parsing.
//!
//! Exposes deck parsing and outline formatting to JavaScript for use in
//! Cloudflare Workers.

use deck_core::{Deck, ImageRequest, OutlineFormatter};
use deck_markdown::{DeckParser, ParseOptions};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of parsing an outline.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    /// Number of slides found.
    pub slide_count: usize,
    /// The parsed deck.
    pub deck: Deck,
    /// Human-readable diagnostics, in document order.
    pub diagnostics: Vec<String>,
    /// Whether any slide came out mostly empty.
    pub has_slide_defects: bool,
    /// Image generation requests for slides with a graphic description.
    pub image_requests: Vec<ImageRequest>,
}

/// Result of formatting an outline.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutlineResult {
    pub text: String,
    pub slide_count: usize,
}

/// Parse a markdown slide outline.
///
/// # Arguments
/// * `text` - The outline document
/// * `require_slides` - Throw when the document has no slide headers
///
/// # Returns
/// A JavaScript object with the parse result, or throws on error.
#[wasm_bindgen]
pub fn parse_deck(text: &str, require_slides: bool) -> Result<JsValue, JsValue> {
    let result = parse_deck_impl(text, require_slides).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_deck_impl(text: &str, require_slides: bool) -> Result<ParseResult, String> {
    let parser = DeckParser::with_options(ParseOptions::new().with_require_slides(require_slides));
    let parsed = parser.parse(text).map_err(|e| e.to_string())?;

    Ok(ParseResult {
        slide_count: parsed.slides().len(),
        diagnostics: parsed.diagnostics.iter().map(ToString::to_string).collect(),
        has_slide_defects: parsed.has_slide_defects(),
        image_requests: parsed.deck.image_requests(),
        deck: parsed.deck,
    })
}

/// Format a markdown slide outline as a plain-text outline.
///
/// # Arguments
/// * `text` - The outline document
/// * `include_notes` - Include speaker notes under each slide
#[wasm_bindgen]
pub fn format_outline(text: &str, include_notes: bool) -> Result<JsValue, JsValue> {
    let result = format_outline_impl(text, include_notes).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn format_outline_impl(text: &str, include_notes: bool) -> Result<OutlineResult, String> {
    let parsed = DeckParser::new().parse(text).map_err(|e| e.to_string())?;
    let formatter = OutlineFormatter::new().with_notes(include_notes);

    Ok(OutlineResult {
        text: formatter.format_with_newline(&parsed.deck),
        slide_count: parsed.slides().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
## SLIDE 1: TITLE SLIDE
**Title:** Launch
**Graphic:** Rocket on a pad

## SLIDE 2: CONTENT
**Title:** Plan
**Content:**
- Build
- Ship
**Speaker Notes:** Keep it short
";

    #[test]
    fn test_parse_deck() {
        let result = parse_deck_impl(DOC, false).unwrap();

        assert_eq!(result.slide_count, 2);
        assert_eq!(result.deck.slides[1].content.len(), 2);
        assert!(result.diagnostics.is_empty());
        assert!(!result.has_slide_defects);
        assert_eq!(result.image_requests.len(), 1);
        assert_eq!(result.image_requests[0].description, "Rocket on a pad");
    }

    #[test]
    fn test_parse_deck_reports_diagnostics() {
        let result = parse_deck_impl("## SLIDE 1: CONTENT\n**Content:**\n- A\n", false).unwrap();

        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].starts_with("slide 1: "));
        assert!(result.has_slide_defects);
    }

    #[test]
    fn test_require_slides() {
        assert!(parse_deck_impl("plain prose", false).is_ok());
        assert!(parse_deck_impl("plain prose", true).is_err());
    }

    #[test]
    fn test_format_outline() {
        let without = format_outline_impl(DOC, false).unwrap();
        let with = format_outline_impl(DOC, true).unwrap();

        assert_eq!(without.slide_count, 2);
        assert!(without.text.contains("Slide 2 [CONTENT]: Plan"));
        assert!(!without.text.contains("Keep it short"));
        assert!(with.text.contains("Notes: Keep it short"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_deck_returns_object() {
        let value = parse_deck("## SLIDE 1: TITLE\n**Title:** Hi\n", true).unwrap();
        assert!(value.is_object());
    }
}
