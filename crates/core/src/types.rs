//! Domain types for representing parsed slide-deck content.

use crate::diagnostics::{Category, Diagnostic};
use serde::{Deserialize, Serialize};

/// A parsed deck together with the recoverable problems found on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDeck {
    pub deck: Deck,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDeck {
    pub fn slides(&self) -> &[SlideRecord] {
        &self.deck.slides
    }

    /// Diagnostics attached to one slide.
    pub fn diagnostics_for(&self, ordinal: usize) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.slide == Some(ordinal))
    }

    /// Whether any slide came out mostly empty.
    pub fn has_slide_defects(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category() == Category::SlideDefect)
    }
}

/// A parsed slide deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Deck title taken from a top-level heading before the first slide.
    pub title: Option<String>,

    /// Slides in document order.
    pub slides: Vec<SlideRecord>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: SlideRecord) {
        self.slides.push(slide);
    }

    /// Look up a slide by its positional ordinal.
    pub fn slide(&self, ordinal: usize) -> Option<&SlideRecord> {
        self.slides.iter().find(|s| s.ordinal == ordinal)
    }

    /// Requests for every slide that asks for a generated image.
    pub fn image_requests(&self) -> Vec<ImageRequest> {
        self.slides.iter().filter_map(SlideRecord::image_request).collect()
    }
}

/// One slide's parsed result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based position in the document. Authoritative over `declared_number`.
    pub ordinal: usize,

    /// Number written in the slide header. Advisory only; may repeat or skip.
    pub declared_number: u32,

    /// Free-form slide type from the header, e.g. "TITLE SLIDE".
    pub declared_type: String,

    /// Normalized title; empty when the slide has none.
    pub title: String,

    pub subtitle: Option<String>,

    /// Body content in document order.
    pub content: Vec<ContentItem>,

    /// Description handed to image generation. A non-empty value asks for an image.
    pub graphic_description: Option<String>,

    pub speaker_notes: Option<String>,

    /// Rationale and citations. Never rendered.
    pub background: Option<String>,
}

impl SlideRecord {
    /// Create an empty slide record.
    pub fn new(ordinal: usize, declared_number: u32, declared_type: impl Into<String>) -> Self {
        Self {
            ordinal,
            declared_number,
            declared_type: declared_type.into(),
            ..Self::default()
        }
    }

    /// Layout a renderer should use; unknown types fall back to the default.
    pub fn layout(&self) -> SlideLayout {
        SlideLayout::from_declared(&self.declared_type).unwrap_or_default()
    }

    /// Whether the slide asks for a generated image.
    pub fn wants_image(&self) -> bool {
        self.graphic_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Build the input for the image generation collaborator, if one is needed.
    pub fn image_request(&self) -> Option<ImageRequest> {
        if !self.wants_image() {
            return None;
        }

        let context = self
            .content
            .iter()
            .map(ContentItem::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Some(ImageRequest {
            ordinal: self.ordinal,
            description: self.graphic_description.clone().unwrap_or_default(),
            title: self.title.clone(),
            context,
        })
    }

    /// True when no field carried any value.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.subtitle.is_none()
            && self.content.is_empty()
            && self.graphic_description.is_none()
            && self.speaker_notes.is_none()
            && self.background.is_none()
    }
}

/// One typed unit of slide body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// A bulleted list item. Level 0 is top-level.
    Bullet { text: String, level: usize },

    /// A numbered list item. `ordinal` is the number as written.
    Numbered {
        text: String,
        level: usize,
        ordinal: u64,
    },

    /// A pipe table. Every row has exactly `headers.len()` cells.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },

    /// A fenced code block, kept verbatim.
    CodeBlock {
        code: String,
        language: Option<String>,
    },

    /// A plain paragraph.
    Text { text: String },
}

impl ContentItem {
    /// Create a bullet item.
    pub fn bullet(text: impl Into<String>, level: usize) -> Self {
        Self::Bullet {
            text: text.into(),
            level,
        }
    }

    /// Create a numbered item.
    pub fn numbered(text: impl Into<String>, level: usize, ordinal: u64) -> Self {
        Self::Numbered {
            text: text.into(),
            level,
            ordinal,
        }
    }

    /// Create a text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Nesting level for list items, `None` for everything else.
    pub fn level(&self) -> Option<usize> {
        match self {
            Self::Bullet { level, .. } | Self::Numbered { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Flatten the item to plain text, one line per row for tables.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Bullet { text, .. } | Self::Numbered { text, .. } | Self::Text { text } => {
                text.clone()
            }
            Self::Table { headers, rows } => std::iter::once(headers)
                .chain(rows.iter())
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::CodeBlock { code, .. } => code.clone(),
        }
    }
}

/// Input for the external image generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub ordinal: usize,
    pub description: String,
    pub title: String,

    /// Plain-text rendering of the slide content.
    pub context: String,
}

/// Visual layouts a renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlideLayout {
    Title,
    Section,
    #[default]
    Content,
    TwoColumn,
    Image,
    Table,
    Code,
    Quote,
    Closing,
}

impl SlideLayout {
    /// Map a free-form declared slide type onto a known layout.
    ///
    /// Matching ignores case, a trailing "slide" word, and separator style,
    /// so "Title Slide", "TITLE" and "title-slide" all map to [`SlideLayout::Title`].
    pub fn from_declared(declared: &str) -> Option<Self> {
        let key = declared
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '/')
            .filter(|w| !w.is_empty())
            .map(str::to_uppercase)
            .collect::<Vec<_>>();

        let key = match key.split_last() {
            Some((last, rest)) if last == "SLIDE" && !rest.is_empty() => rest.join(" "),
            _ => key.join(" "),
        };

        let layout = match key.as_str() {
            "TITLE" | "OPENING" | "COVER" => Self::Title,
            "SECTION" | "SECTION HEADER" | "SECTION TITLE" | "DIVIDER" | "AGENDA" => {
                Self::Section
            }
            "CONTENT" | "BULLET" | "BULLETS" | "TEXT" | "INTRODUCTION" | "OVERVIEW" => {
                Self::Content
            }
            "TWO COLUMN" | "TWO COLUMNS" | "COMPARISON" => Self::TwoColumn,
            "IMAGE" | "GRAPHIC" | "VISUAL" | "DIAGRAM" | "CHART" => Self::Image,
            "TABLE" | "DATA" => Self::Table,
            "CODE" | "CODE EXAMPLE" => Self::Code,
            "QUOTE" | "QUOTATION" => Self::Quote,
            "CONCLUSION" | "SUMMARY" | "CLOSING" | "THANK YOU" | "Q&A" | "QUESTIONS" => {
                Self::Closing
            }
            _ => return None,
        };

        Some(layout)
    }
}
