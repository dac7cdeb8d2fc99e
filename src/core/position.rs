//! Line/column lookup over a text buffer.
//!
//! The line-start table is built once per validation pass so every lookup is a
//! binary search instead of a rescan from the top of the document.

/// A 1-based line/column pair. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Precomputed line-start offsets for one version of a text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { text, line_starts }
    }

    /// Number of lines, counting a trailing empty line after a final newline
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-based line, without its line terminator
    pub fn line(&self, line: usize) -> &'a str {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        self.text[start..end].trim_end_matches('\r')
    }

    /// Length of a 1-based line in characters
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).chars().count()
    }

    /// Position of a byte offset. Offsets past the end clamp to the end of text.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..offset].chars().count() + 1;

        Position {
            line: line_idx + 1,
            column,
        }
    }

    /// Column just past the end of a 1-based line
    pub fn end_of_line(&self, line: usize) -> Position {
        Position {
            line,
            column: self.line_len(line) + 1,
        }
    }
}
