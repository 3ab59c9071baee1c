//! Text edits against the lowered text and the splice that applies them.

use std::cmp::Reverse;

use rowan::{TextRange, TextSize};

use crate::base::{line_end, line_start};
use crate::error::DslError;

/// Replace `range` with `text`. Inserts have an empty range; `seq` orders
/// inserts at the same offset (lower first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TextEdit {
    pub range: TextRange,
    pub text: String,
    pub seq: u32,
}

/// Splice edits back to front so earlier offsets stay valid.
///
/// At one offset a replacement is applied before any insert, and inserts in
/// descending `seq`, which leaves them in ascending `seq` order in the text.
pub(super) fn apply(text: &str, mut edits: Vec<TextEdit>) -> Result<String, DslError> {
    edits.retain(|edit| !(edit.range.is_empty() && edit.text.is_empty()));
    edits.sort_by_key(|edit| (Reverse(edit.range.start()), edit.range.is_empty(), Reverse(edit.seq)));
    edits.dedup_by(|a, b| !a.range.is_empty() && a.range == b.range && a.text == b.text);

    let crlf = text.contains("\r\n");
    let mut result = text.to_string();
    let mut floor: Option<TextSize> = None;
    for edit in &edits {
        if floor.is_some_and(|floor| edit.range.end() > floor) {
            return Err(DslError::WriteConflict(format!(
                "edit at {:?} overlaps a later edit",
                edit.range
            )));
        }
        let replacement = if crlf {
            edit.text.replace("\r\n", "\n").replace('\n', "\r\n")
        } else {
            edit.text.clone()
        };
        result.replace_range(std::ops::Range::<usize>::from(edit.range), &replacement);
        floor = Some(edit.range.start());
    }
    Ok(result)
}

/// Start of the line after the one containing `offset`, or the end of text
pub(super) fn next_line_start(text: &str, offset: TextSize) -> TextSize {
    let offset = usize::from(offset).min(text.len());
    let next = text[offset..].find('\n').map_or(text.len(), |nl| offset + nl + 1);
    TextSize::new(next as u32)
}

/// Whitespace, a `;` or a trailing `//` comment
pub(super) fn is_trivia(text: &str) -> bool {
    let trimmed = text.trim().trim_start_matches(';').trim_start();
    trimmed.is_empty() || trimmed.starts_with("//")
}

pub(super) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t')
}

/// The range to delete for a whole statement: its full line when nothing
/// else shares it, otherwise the statement and the spaces that separate it.
pub(super) fn statement_deletion(text: &str, statement: TextRange) -> TextRange {
    let start = statement.start();
    let end = statement.end();
    let ls = line_start(text, start);
    let le = line_end(text, end);
    let leading_blank = is_blank(&text[usize::from(ls)..usize::from(start)]);
    let trailing = &text[usize::from(end)..usize::from(le)];

    if leading_blank && is_trivia(trailing) {
        return TextRange::new(ls, next_line_start(text, end));
    }
    if leading_blank {
        let spaces = trailing.len() - trailing.trim_start_matches([' ', '\t']).len();
        return TextRange::new(start, end + TextSize::new(spaces as u32));
    }
    let before = &text[usize::from(ls)..usize::from(start)];
    let spaces = before.len() - before.trim_end_matches([' ', '\t']).len();
    TextRange::new(start - TextSize::new(spaces as u32), end)
}

/// Where new statements go in a file: after any leading comments and
/// blank lines.
pub(super) fn file_start(text: &str) -> TextSize {
    let mut offset = 0;
    let mut in_comment = false;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if in_comment {
            in_comment = !trimmed.contains("*/");
        } else if trimmed.starts_with("/*") {
            in_comment = !trimmed.contains("*/");
        } else if !(trimmed.is_empty() || trimmed.starts_with("//")) {
            break;
        }
        offset += line.len();
    }
    TextSize::new(offset as u32)
}
