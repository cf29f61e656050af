//! Recoverable parse problems, collected next to the parsed deck.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a recoverable problem reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// A block or field was malformed; parsing of the slide continued.
    StructuralWarning,
    /// A whole slide came out mostly empty but kept its place in the deck.
    SlideDefect,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The label was present but nothing followed it.
    EmptyField { field: String },

    /// The label appeared more than once; the first occurrence was used.
    DuplicateField { field: String },

    /// A table row had a different cell count than the header and was
    /// padded or truncated.
    TableShape { expected: usize, found: usize },

    /// A fenced code block had no closing fence and ran to the end of the field.
    UnterminatedCodeBlock,

    /// The declared slide type does not map to a known layout.
    UnrecognizedSlideType { declared: String },

    MissingTitle,

    /// None of the known field labels appeared in the slide.
    NoRecognizedFields,
}

impl DiagnosticKind {
    pub fn category(&self) -> Category {
        match self {
            Self::MissingTitle | Self::NoRecognizedFields => Category::SlideDefect,
            _ => Category::StructuralWarning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "field '{}' is empty", field),
            Self::DuplicateField { field } => {
                write!(f, "field '{}' appears more than once; using the first", field)
            }
            Self::TableShape { expected, found } => write!(
                f,
                "table row has {} cells, header has {}; row was {}",
                found,
                expected,
                if found < expected { "padded" } else { "truncated" }
            ),
            Self::UnterminatedCodeBlock => write!(f, "code block is never closed"),
            Self::UnrecognizedSlideType { declared } => {
                write!(f, "unrecognized slide type '{}'", declared)
            }
            Self::MissingTitle => write!(f, "slide has no title"),
            Self::NoRecognizedFields => write!(f, "slide has no recognizable fields"),
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Ordinal of the affected slide, if any.
    pub slide: Option<usize>,

    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(slide: Option<usize>, kind: DiagnosticKind) -> Self {
        Self { slide, kind }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slide {
            Some(ordinal) => write!(f, "slide {}: {}", ordinal, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Collects diagnostics for one slide.
#[derive(Debug, Default)]
pub struct Diagnostics {
    slide: Option<usize>,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a collector that tags everything with the given slide ordinal.
    pub fn for_slide(ordinal: usize) -> Self {
        Self {
            slide: Some(ordinal),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(self.slide, kind);
        log::debug!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(DiagnosticKind::MissingTitle.category(), Category::SlideDefect);
        assert_eq!(
            DiagnosticKind::NoRecognizedFields.category(),
            Category::SlideDefect
        );
        assert_eq!(
            DiagnosticKind::UnterminatedCodeBlock.category(),
            Category::StructuralWarning
        );
    }

    #[test]
    fn test_display_includes_slide() {
        let d = Diagnostic::new(
            Some(4),
            DiagnosticKind::TableShape {
                expected: 3,
                found: 2,
            },
        );
        assert_eq!(
            d.to_string(),
            "slide 4: table row has 2 cells, header has 3; row was padded"
        );

        let d = Diagnostic::new(None, DiagnosticKind::EmptyField { field: "Content".into() });
        assert_eq!(d.to_string(), "field 'Content' is empty");
    }

    #[test]
    fn test_collector_tags_slide() {
        let mut diagnostics = Diagnostics::for_slide(2);
        assert!(diagnostics.is_empty());

        diagnostics.push(DiagnosticKind::MissingTitle);
        diagnostics.push(DiagnosticKind::UnterminatedCodeBlock);

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.slide == Some(2)));
        assert_eq!(diagnostics.into_vec()[0].kind, DiagnosticKind::MissingTitle);
    }
}
