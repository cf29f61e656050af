//! Markdown slide-outline parser backend.
//!
//! Turns a document made of `## SLIDE N: TYPE` sections into a
//! [`deck_core::Deck`] of structured slide records. Each section is split into
//! labeled fields (`**Title:**`, `**Content:**`, ...) and the Content field is
//! classified into bullets, numbered items, tables, code blocks, and text.

pub mod blocks;
pub mod classify;
pub mod fields;
pub mod labels;
pub mod lists;
pub mod parser;
pub mod segment;

pub use classify::ContentClassifier;
pub use fields::{ExtractedFields, FieldExtractor, FieldMatch};
pub use labels::{Field, FieldLabels, LabelTarget};
pub use lists::{classify_line, ListLine, DEFAULT_INDENT_UNIT};
pub use parser::{DeckParser, ParseOptions};
pub use segment::{segment, Segmentation, SlideSegment};
