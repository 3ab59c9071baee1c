/// Position and line utilities over raw source text.
///
/// Offsets are byte offsets into UTF-8 text. Lines are split on `\n`; a
/// preceding `\r` is treated as part of the line terminator.
use rowan::TextSize;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn of(text: &str, offset: TextSize) -> Self {
        let offset = usize::from(offset).min(text.len());
        let before = &text[..offset];
        let line = before.matches('\n').count();
        let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1);
        Self { line, column }
    }
}

/// Offset of the first byte of the line containing `offset`.
pub fn line_start(text: &str, offset: TextSize) -> TextSize {
    let offset = usize::from(offset).min(text.len());
    let start = text[..offset].rfind('\n').map_or(0, |nl| nl + 1);
    TextSize::new(start as u32)
}

/// Offset of the line terminator (or end of text) of the line containing `offset`.
pub fn line_end(text: &str, offset: TextSize) -> TextSize {
    let offset = usize::from(offset).min(text.len());
    let mut end = text[offset..].find('\n').map_or(text.len(), |nl| offset + nl);
    if end > offset && text.as_bytes()[end - 1] == b'\r' {
        end -= 1;
    }
    TextSize::new(end as u32)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(text: &str, offset: TextSize) -> &str {
    let start = usize::from(line_start(text, offset));
    let rest = &text[start..];
    let len = rest
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map_or(rest.len(), |(i, _)| i);
    &rest[..len]
}
