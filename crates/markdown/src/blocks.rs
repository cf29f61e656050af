//! Block recognizers for slide content.
//!
//! Each recognizer looks at the unconsumed lines of a Content field, starting
//! at a non-blank line, and either declines or consumes a span and returns the
//! items it produced. Recognizers never look back and never overlap.

use crate::fields::is_rule_line;
use crate::lists::{classify_line, ListLine};
use deck_core::{ContentItem, DiagnosticKind, Diagnostics, InlineNormalizer};

/// Shared state handed to every recognizer.
pub struct ExtractContext<'a> {
    pub indent_unit: usize,
    pub normalizer: &'a InlineNormalizer,
    pub diagnostics: &'a mut Diagnostics,
}

/// A consumed span and the items found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Number of lines consumed, at least one.
    pub consumed: usize,
    pub items: Vec<ContentItem>,
}

/// A recognizer for one content block type.
pub type BlockRecognizer = fn(&[&str], &mut ExtractContext<'_>) -> Option<Extracted>;

/// Whether a recognizer other than plain text would claim the span starting here.
pub fn starts_block(lines: &[&str], indent_unit: usize) -> bool {
    let Some(first) = lines.first() else {
        return false;
    };

    is_table_start(lines) || fence_open(first).is_some() || classify_line(first, indent_unit).is_some()
}

// ---------------------------------------------------------------------------
// Tables

/// Split a pipe-delimited row into raw trimmed cells.
///
/// Outer pipes are optional. `\|` is a literal pipe inside a cell.
fn split_row(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if !trimmed.contains('|') {
        return None;
    }

    let mut inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    if inner.ends_with('|') && !inner.ends_with("\\|") {
        inner = &inner[..inner.len() - 1];
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());

    Some(cells)
}

/// A separator row: every cell is dashes with optional alignment colons.
fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            !cell.is_empty() && cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
        })
}

fn is_table_start(lines: &[&str]) -> bool {
    match (lines.first().and_then(|l| split_row(l)), lines.get(1).and_then(|l| split_row(l))) {
        (Some(header), Some(separator)) => !is_separator(&header) && is_separator(&separator),
        _ => false,
    }
}

/// Header row, separator row, then data rows up to the first non-row line.
///
/// Data rows are padded with empty cells or truncated to the header width.
pub fn extract_table(lines: &[&str], ctx: &mut ExtractContext<'_>) -> Option<Extracted> {
    if !is_table_start(lines) {
        return None;
    }

    let headers: Vec<String> = split_row(lines[0])?
        .iter()
        .map(|cell| ctx.normalizer.normalize_line(cell))
        .collect();
    let width = headers.len();

    let mut rows = Vec::new();
    let mut consumed = 2;

    for line in &lines[2..] {
        if line.trim().is_empty() {
            break;
        }
        let Some(cells) = split_row(line) else {
            break;
        };
        consumed += 1;

        if is_separator(&cells) {
            continue;
        }

        let mut row: Vec<String> = cells
            .iter()
            .map(|cell| ctx.normalizer.normalize_line(cell))
            .collect();

        if row.len() != width {
            ctx.diagnostics.push(DiagnosticKind::TableShape {
                expected: width,
                found: row.len(),
            });
            row.resize(width, String::new());
        }

        rows.push(row);
    }

    log::trace!("Table: {} columns, {} rows", width, rows.len());

    Some(Extracted {
        consumed,
        items: vec![ContentItem::Table { headers, rows }],
    })
}

// ---------------------------------------------------------------------------
// Fenced code

/// Fence length and info string of an opening fence line.
pub(crate) fn fence_open(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim();
    let fence_len = trimmed.chars().take_while(|&c| c == '`').count();
    if fence_len < 3 {
        return None;
    }

    let info = trimmed[fence_len..].trim();
    if info.contains('`') {
        return None;
    }

    Some((fence_len, info))
}

pub(crate) fn is_fence_close(line: &str, fence_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= fence_len && trimmed.chars().all(|c| c == '`')
}

/// A fenced block, captured verbatim. Without a closing fence it runs to the
/// end of the field.
pub fn extract_code_block(lines: &[&str], ctx: &mut ExtractContext<'_>) -> Option<Extracted> {
    let (fence_len, info) = fence_open(lines.first()?)?;
    let language = info.split_whitespace().next().map(str::to_string);

    let body = &lines[1..];
    let (code_lines, consumed) = match body.iter().position(|l| is_fence_close(l, fence_len)) {
        Some(end) => (&body[..end], end + 2),
        None => {
            ctx.diagnostics.push(DiagnosticKind::UnterminatedCodeBlock);
            (body, lines.len())
        }
    };

    Some(Extracted {
        consumed,
        items: vec![ContentItem::CodeBlock {
            code: code_lines.join("\n"),
            language,
        }],
    })
}

// ---------------------------------------------------------------------------
// Lists

/// A run of bulleted and numbered items. Blank lines inside the run are
/// skipped; the first other line ends it.
pub fn extract_list(lines: &[&str], ctx: &mut ExtractContext<'_>) -> Option<Extracted> {
    classify_line(lines.first()?, ctx.indent_unit)?;

    let mut items = Vec::new();
    let mut consumed = 0;

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let Some(item) = classify_line(line, ctx.indent_unit) else {
            break;
        };

        let text = ctx.normalizer.normalize_line(item.text());
        items.push(match item {
            ListLine::Bulleted { level, .. } => ContentItem::bullet(text, level),
            ListLine::Numbered { level, ordinal, .. } => ContentItem::numbered(text, level, ordinal),
        });
        consumed = idx + 1;
    }

    log::trace!("List run: {} items over {} lines", items.len(), consumed);

    Some(Extracted { consumed, items })
}

// ---------------------------------------------------------------------------
// Plain text

/// One paragraph: consecutive non-blank lines that no other recognizer claims.
/// Lines are joined with single spaces. A rule line ends the paragraph and
/// produces no item.
pub fn extract_text(lines: &[&str], ctx: &mut ExtractContext<'_>) -> Option<Extracted> {
    let mut parts: Vec<&str> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        if is_rule_line(line) {
            if idx == 0 {
                return Some(Extracted {
                    consumed: 1,
                    items: Vec::new(),
                });
            }
            break;
        }
        if idx > 0 && starts_block(&lines[idx..], ctx.indent_unit) {
            break;
        }
        parts.push(line.trim());
    }

    if parts.is_empty() {
        return None;
    }

    let consumed = parts.len();
    let text = ctx.normalizer.normalize_line(&parts.join(" "));
    let items = if text.is_empty() {
        Vec::new()
    } else {
        vec![ContentItem::text(text)]
    };

    Some(Extracted { consumed, items })
}
