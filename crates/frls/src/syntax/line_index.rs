/// Line/column pair in the grammar engine's convention: `line` is 1-based,
/// `column` is a 0-based byte offset from the start of that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Byte offsets of every line start, built once per parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_offsets: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_offsets = vec![0usize];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_offsets.push(i + 1);
            }
        }
        Self {
            line_offsets,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Convert a byte offset. Offsets past the end clamp to the end of text.
    pub fn line_col(
        &self,
        offset: usize,
    ) -> LineCol {
        let offset = offset.min(self.len);
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        LineCol {
            line: line as u32 + 1,
            column: (offset - self.line_offsets[line]) as u32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/line_index_tests.rs"]
mod tests;
