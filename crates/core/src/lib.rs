//! Core slide-deck types, inline normalization, diagnostics, and outline
//! output for markdown slide outlines.

pub mod diagnostics;
pub mod error;
pub mod normalize;
pub mod outline;
pub mod types;

pub use diagnostics::{Category, Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{Error, Result};
pub use normalize::InlineNormalizer;
pub use outline::{legacy_lines, OutlineFormatter};
pub use types::{ContentItem, Deck, ImageRequest, ParsedDeck, SlideLayout, SlideRecord};
