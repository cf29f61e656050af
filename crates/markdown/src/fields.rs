//! Field extraction within one slide's raw text.
//!
//! A field's value runs from just after its label's colon to the line where
//! the next recognized label starts, or to the end of the slide. Labels may be
//! wrapped in up to two emphasis markers on either side (`**Title:**`,
//! `**Title**:`, `_Content_:`) and are matched case-insensitively.

use crate::blocks::{fence_open, is_fence_close};
use crate::labels::{label_key, Field, FieldLabels, LabelTarget};
use deck_core::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;

/// Most digits accepted in the number of a sub-label such as `Graphic 12:`.
const MAX_LABEL_INDEX_DIGITS: usize = 6;

/// A label occurrence and the value that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub target: LabelTarget,

    /// Number on an indexed sub-label (`Graphic 2:`).
    pub index: Option<u32>,

    /// 0-based line of the label within the slide text.
    pub line: usize,

    pub value: String,
}

/// All fields found in one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// First occurrence of each unindexed field.
    values: BTreeMap<Field, String>,

    /// Numbered `Graphic N:` entries in document order.
    graphic_items: Vec<(u32, String)>,

    /// Fields whose label appeared again after the first occurrence.
    duplicates: Vec<Field>,

    /// Number of label lines seen, boundaries included.
    label_count: usize,
}

impl ExtractedFields {
    /// Value of a field. `Some("")` means the label was present but empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn graphic_items(&self) -> &[(u32, String)] {
        &self.graphic_items
    }

    pub fn duplicates(&self) -> &[Field] {
        &self.duplicates
    }

    /// True when no label of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.label_count == 0
    }
}

/// Extracts labeled fields using a [`FieldLabels`] set as the boundary list.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    labels: FieldLabels,
    label_regex: Regex,
}

impl FieldExtractor {
    /// Build an extractor for the given label set.
    pub fn new(labels: FieldLabels) -> Result<Self> {
        labels.validate()?;

        let mut names: Vec<&str> = labels.entries().map(|(label, _)| label).collect();
        // Longest first so "Graphics" is tried before "Graphic".
        names.sort_by_key(|l| std::cmp::Reverse(l.len()));

        let alternatives = names
            .iter()
            .map(|label| {
                label
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"[ \t]+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(
            r"(?i)^[ \t]*(?P<bullet>[-*+][ \t]+)?(?P<open>[*_]{{0,2}})[ \t]*(?P<label>{})(?:[ \t]*(?P<index>\d{{1,{}}}))?[ \t]*(?P<mid>[*_]{{0,2}})[ \t]*:(?P<close>[*_]{{0,2}})",
            alternatives, MAX_LABEL_INDEX_DIGITS
        );

        let label_regex = Regex::new(&pattern).map_err(|e| Error::InvalidLabel(e.to_string()))?;

        Ok(Self {
            labels,
            label_regex,
        })
    }

    pub fn labels(&self) -> &FieldLabels {
        &self.labels
    }

    /// Extract a single field. `None` when the label is absent.
    pub fn extract(&self, text: &str, field: Field) -> Option<String> {
        self.locate(text)
            .into_iter()
            .find(|m| m.target == LabelTarget::Field(field) && m.index.is_none())
            .map(|m| m.value)
    }

    /// Extract every field in the slide.
    pub fn extract_all(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        for m in self.locate(text) {
            fields.label_count += 1;

            let LabelTarget::Field(field) = m.target else {
                continue;
            };

            if let Some(index) = m.index {
                fields.graphic_items.push((index, m.value));
            } else if fields.values.contains_key(&field) {
                if !fields.duplicates.contains(&field) {
                    fields.duplicates.push(field);
                }
            } else {
                fields.values.insert(field, m.value);
            }
        }

        fields
    }

    /// Find every label line and the value span that follows it.
    ///
    /// Lines inside a fenced code block are never labels. An unclosed fence
    /// hides labels to the end of the slide.
    pub fn locate(&self, text: &str) -> Vec<FieldMatch> {
        let lines: Vec<&str> = text.lines().collect();

        let mut hits: Vec<(usize, LabelTarget, Option<u32>, &str)> = Vec::new();
        let mut fence: Option<usize> = None;
        for (idx, line) in lines.iter().copied().enumerate() {
            if let Some(fence_len) = fence {
                if is_fence_close(line, fence_len) {
                    fence = None;
                }
                continue;
            }

            match self.match_label(line) {
                Some((target, index, rest)) => {
                    // `**Content:** ```rust` opens a fence on the label line.
                    fence = fence_open(rest).map(|(len, _)| len);
                    hits.push((idx, target, index, rest));
                }
                None => fence = fence_open(line).map(|(len, _)| len),
            }
        }

        hits.iter()
            .enumerate()
            .map(|(n, &(line, target, index, rest))| {
                let end = hits.get(n + 1).map(|h| h.0).unwrap_or(lines.len());
                FieldMatch {
                    target,
                    index,
                    line,
                    value: assemble_value(rest, &lines[line + 1..end]),
                }
            })
            .collect()
    }

    /// Match a label at the start of a line, returning the text after it.
    fn match_label<'a>(&self, line: &'a str) -> Option<(LabelTarget, Option<u32>, &'a str)> {
        let caps = self.label_regex.captures(line)?;
        let target = self.labels.lookup(&label_key(caps.name("label")?.as_str()))?;
        let index = match caps.name("index") {
            Some(m) => Some(m.as_str().parse::<u32>().ok()?),
            None => None,
        };

        let indexed_field = matches!(target, LabelTarget::Field(f) if f.is_indexed());
        if index.is_some() && !indexed_field {
            return None;
        }
        // A bulleted label only counts for numbered sub-labels ("- Graphic 1:");
        // otherwise "- Background: ..." in a list would cut the list short.
        if caps.name("bullet").is_some() && index.is_none() {
            return None;
        }

        let open = caps.name("open").map_or(0, |m| m.len());
        let mid = caps.name("mid").map_or(0, |m| m.len());
        let close = caps.name("close")?;

        // `**Title:**` closes its markers after the colon; `Title: *x*` does not.
        let rest_start = if open > mid { close.end() } else { close.start() };

        Some((target, index, &line[rest_start..]))
    }
}

/// Join the label-line remainder with the following lines, dropping blank
/// lines before the first real content and blank or rule lines at the end.
fn assemble_value(first: &str, rest: &[&str]) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(rest.len() + 1);

    let first = first.trim();
    if !first.is_empty() {
        lines.push(first);
    }

    for line in rest {
        if lines.is_empty() && line.trim().is_empty() {
            continue;
        }
        lines.push(line.trim_end_matches('\r'));
    }

    while lines
        .last()
        .is_some_and(|l| l.trim().is_empty() || is_rule_line(l))
    {
        lines.pop();
    }

    lines.join("\n")
}

/// A thematic break such as `---` or `***`.
pub(crate) fn is_rule_line(line: &str) -> bool {
    let trimmed: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    trimmed.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&marker| trimmed.chars().all(|c| c == marker))
}
