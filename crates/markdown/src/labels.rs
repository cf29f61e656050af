//! The closed set of field labels recognized inside a slide.
//!
//! Every label in the set is also a boundary for every other field, so
//! adding a field here is enough for extraction to stop in front of it.

use deck_core::{Error, Result};
use std::fmt;

/// A labeled section of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Subtitle,
    Content,
    /// Single graphic description, or one numbered entry (`Graphic 2:`).
    Graphic,
    /// Block header grouping numbered `Graphic N:` entries.
    Graphics,
    SpeakerNotes,
    Background,
}

impl Field {
    /// All fields, in the order they usually appear.
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Subtitle,
        Field::Content,
        Field::Graphic,
        Field::Graphics,
        Field::SpeakerNotes,
        Field::Background,
    ];

    /// Canonical label text.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Subtitle => "Subtitle",
            Field::Content => "Content",
            Field::Graphic => "Graphic",
            Field::Graphics => "Graphics",
            Field::SpeakerNotes => "Speaker Notes",
            Field::Background => "Background",
        }
    }

    /// Whether the label may carry a number, as in `Graphic 1:`.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Field::Graphic)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a matched label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTarget {
    Field(Field),
    /// Ends the previous field but is not extracted itself.
    Boundary,
}

/// Versioned set of label strings and the fields they name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    version: u32,
    entries: Vec<(String, LabelTarget)>,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self::v1()
    }
}

impl FieldLabels {
    /// Current label set version.
    pub const VERSION: u32 = 1;

    /// Canonical labels: one per [`Field`].
    pub fn v1() -> Self {
        Self {
            version: 1,
            entries: Field::ALL
                .iter()
                .map(|f| (f.name().to_string(), LabelTarget::Field(*f)))
                .collect(),
        }
    }

    /// Add an alternative label for a field, e.g. "Notes" for speaker notes.
    pub fn with_alias(mut self, label: impl Into<String>, field: Field) -> Self {
        self.entries.push((label.into(), LabelTarget::Field(field)));
        self
    }

    /// Add a label that only terminates the preceding field.
    pub fn with_boundary(mut self, label: impl Into<String>) -> Self {
        self.entries.push((label.into(), LabelTarget::Boundary));
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, LabelTarget)> {
        self.entries.iter().map(|(label, target)| (label.as_str(), *target))
    }

    /// Resolve matched label text to its target. Case and inner whitespace are ignored.
    pub fn lookup(&self, label: &str) -> Option<LabelTarget> {
        let key = label_key(label);
        self.entries
            .iter()
            .find(|(l, _)| label_key(l) == key)
            .map(|(_, target)| *target)
    }

    /// Reject labels that cannot form a matcher.
    pub fn validate(&self) -> Result<()> {
        for (label, _) in &self.entries {
            if label.trim().is_empty() {
                return Err(Error::InvalidLabel("label must not be empty".to_string()));
            }
            if label.contains(':') || label.contains('\n') {
                return Err(Error::InvalidLabel(format!(
                    "label '{}' must not contain ':' or a line break",
                    label
                )));
            }
        }
        Ok(())
    }
}

/// Comparison key: lowercase, whitespace runs collapsed.
pub(crate) fn label_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_covers_every_field() {
        let labels = FieldLabels::v1();
        assert_eq!(labels.version(), FieldLabels::VERSION);
        for field in Field::ALL {
            assert_eq!(labels.lookup(field.name()), Some(LabelTarget::Field(field)));
        }
    }

    #[test]
    fn test_lookup_ignores_case_and_spacing() {
        let labels = FieldLabels::v1();
        assert_eq!(
            labels.lookup("speaker   NOTES"),
            Some(LabelTarget::Field(Field::SpeakerNotes))
        );
        assert_eq!(labels.lookup("Sources"), None);
    }

    #[test]
    fn test_alias_and_boundary() {
        let labels = FieldLabels::v1()
            .with_alias("Notes", Field::SpeakerNotes)
            .with_boundary("Sources");
        assert_eq!(labels.lookup("notes"), Some(LabelTarget::Field(Field::SpeakerNotes)));
        assert_eq!(labels.lookup("Sources"), Some(LabelTarget::Boundary));
        assert!(labels.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_labels() {
        assert!(FieldLabels::v1().with_boundary("  ").validate().is_err());
        assert!(FieldLabels::v1().with_boundary("Note:").validate().is_err());
    }
}
