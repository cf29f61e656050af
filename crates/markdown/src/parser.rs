//! Slide deck parser: segmentation, field extraction, and content
//! classification for every slide in a markdown outline.
//!
//! Slides are parsed independently. A slide that is malformed still yields a
//! record in its position; the problem is reported as a diagnostic next to
//! the deck instead of failing the document.

use crate::classify::ContentClassifier;
use crate::fields::{ExtractedFields, FieldExtractor};
use crate::labels::{Field, FieldLabels};
use crate::lists::DEFAULT_INDENT_UNIT;
use crate::segment::{segment, SlideSegment};
use deck_core::{
    Deck, DiagnosticKind, Diagnostics, Error, InlineNormalizer, ParsedDeck, Result, SlideLayout,
    SlideRecord,
};
use std::borrow::Cow;
use std::io::Read;

/// Options controlling how a deck is parsed.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Indentation columns per list nesting level.
    pub indent_unit: usize,

    /// Fail with [`Error::NoSlides`] when the document has no slide headers.
    pub require_slides: bool,

    /// Labels recognized as fields and field boundaries.
    pub labels: FieldLabels,

    /// Compose extracted text to Unicode NFC.
    pub normalize_unicode: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
            require_slides: false,
            labels: FieldLabels::default(),
            normalize_unicode: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_unit(mut self, unit: usize) -> Self {
        self.indent_unit = unit.max(1);
        self
    }

    pub fn with_require_slides(mut self, require: bool) -> Self {
        self.require_slides = require;
        self
    }

    pub fn with_labels(mut self, labels: FieldLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_normalize_unicode(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

/// Parser for markdown slide outlines.
#[derive(Debug, Clone, Default)]
pub struct DeckParser {
    options: ParseOptions,
}

/// Per-document machinery built once from the options.
struct SlideContext {
    extractor: FieldExtractor,
    classifier: ContentClassifier,
    normalizer: InlineNormalizer,
}

impl DeckParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Read a whole document from a reader and parse it.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<ParsedDeck> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }

    /// Parse a document from raw bytes, which must be UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedDeck> {
        let text = std::str::from_utf8(bytes)?;
        self.parse(text)
    }

    /// Parse a document.
    pub fn parse(&self, text: &str) -> Result<ParsedDeck> {
        let text = prepare_text(text);
        let ctx = self.build_context()?;

        let segmentation = segment(&text);
        if segmentation.slides.is_empty() {
            if self.options.require_slides {
                return Err(Error::NoSlides);
            }
            log::debug!("No slide headers found");
        }

        let mut deck = Deck::new();
        deck.title = segmentation
            .deck_title()
            .map(|t| ctx.normalizer.normalize_line(t))
            .filter(|t| !t.is_empty());

        let mut diagnostics = Vec::new();
        for seg in &segmentation.slides {
            let (slide, slide_diagnostics) = parse_slide(seg, &ctx);
            log::debug!(
                "Slide {} [{}]: {} content items, {} diagnostics",
                slide.ordinal,
                slide.declared_type,
                slide.content.len(),
                slide_diagnostics.len()
            );
            deck.add_slide(slide);
            diagnostics.extend(slide_diagnostics.into_vec());
        }

        log::debug!(
            "Parsed {} slides with {} diagnostics",
            deck.slides.len(),
            diagnostics.len()
        );

        Ok(ParsedDeck { deck, diagnostics })
    }

    fn build_context(&self) -> Result<SlideContext> {
        let normalizer = InlineNormalizer::new().with_unicode_nfc(self.options.normalize_unicode);

        Ok(SlideContext {
            extractor: FieldExtractor::new(self.options.labels.clone())?,
            classifier: ContentClassifier::new()
                .with_indent_unit(self.options.indent_unit)
                .with_normalizer(normalizer.clone()),
            normalizer,
        })
    }
}

/// Strip a byte-order mark and normalize line endings to `\n`.
fn prepare_text(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Build one slide record. Never fails; problems go to the returned diagnostics.
fn parse_slide(seg: &SlideSegment<'_>, ctx: &SlideContext) -> (SlideRecord, Diagnostics) {
    let mut diagnostics = Diagnostics::for_slide(seg.ordinal);
    let normalizer = &ctx.normalizer;

    let declared_type = normalizer.normalize_line(&seg.declared_type);
    if SlideLayout::from_declared(&declared_type).is_none() {
        diagnostics.push(DiagnosticKind::UnrecognizedSlideType {
            declared: declared_type.clone(),
        });
    }

    let mut slide = SlideRecord::new(seg.ordinal, seg.declared_number, declared_type);

    let fields = ctx.extractor.extract_all(seg.body);
    if fields.is_empty() {
        diagnostics.push(DiagnosticKind::NoRecognizedFields);
        return (slide, diagnostics);
    }

    report_field_problems(&fields, &mut diagnostics);

    match fields.get(Field::Title) {
        Some(title) => slide.title = normalizer.normalize_line(title),
        None => diagnostics.push(DiagnosticKind::MissingTitle),
    }

    slide.subtitle = fields.get(Field::Subtitle).map(|s| normalizer.normalize(s));
    slide.content = fields
        .get(Field::Content)
        .map(|c| ctx.classifier.classify(c, &mut diagnostics))
        .unwrap_or_default();
    slide.graphic_description = graphic_description(&fields, normalizer);
    slide.speaker_notes = fields.get(Field::SpeakerNotes).map(|s| normalizer.normalize(s));
    slide.background = fields.get(Field::Background).map(|s| normalizer.normalize(s));

    (slide, diagnostics)
}

fn report_field_problems(fields: &ExtractedFields, diagnostics: &mut Diagnostics) {
    for field in fields.duplicates() {
        diagnostics.push(DiagnosticKind::DuplicateField {
            field: field.to_string(),
        });
    }

    let has_graphic_items = !fields.graphic_items().is_empty();
    for (field, value) in fields.fields() {
        // A Graphics header is expected to be empty when numbered entries follow it.
        if field == Field::Graphics && has_graphic_items {
            continue;
        }
        if value.trim().is_empty() {
            diagnostics.push(DiagnosticKind::EmptyField {
                field: field.to_string(),
            });
        }
    }

    for (index, value) in fields.graphic_items() {
        if value.trim().is_empty() {
            diagnostics.push(DiagnosticKind::EmptyField {
                field: format!("{} {}", Field::Graphic, index),
            });
        }
    }
}

/// A plain Graphic field wins; otherwise numbered entries are joined one per
/// line; otherwise the text of a Graphics block is used as is.
fn graphic_description(fields: &ExtractedFields, normalizer: &InlineNormalizer) -> Option<String> {
    let plain = fields.get(Field::Graphic);
    if let Some(text) = plain.filter(|t| !t.trim().is_empty()) {
        return Some(normalizer.normalize(text));
    }

    let entries: Vec<String> = fields
        .graphic_items()
        .iter()
        .map(|(_, text)| normalizer.normalize(text))
        .filter(|t| !t.is_empty())
        .collect();
    if !entries.is_empty() {
        return Some(entries.join("\n"));
    }

    plain
        .or_else(|| fields.get(Field::Graphics))
        .map(|text| normalizer.normalize(text))
}
