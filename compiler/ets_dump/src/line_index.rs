//! Line/column lookup for `loc` entries.

/// Line start offsets of a source text, for O(log L) position lookup.
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineIndex {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        let index = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(index).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column) of `offset`. Columns count characters.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.offsets[(line - 1) as usize] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(column).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        let source = "let a = 1;\nlet é = 2;\n";
        let index = LineIndex::build(source);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(source, 0), (1, 1));
        assert_eq!(index.line_col(source, 4), (1, 5));
        assert_eq!(index.line_col(source, 11), (2, 1));
        // After the two-byte `é`.
        assert_eq!(index.line_col(source, 17), (2, 6));
    }

    #[test]
    fn offset_past_end_clamps() {
        let source = "ab";
        let index = LineIndex::build(source);
        assert_eq!(index.line_col(source, 10), (1, 3));
    }
}
