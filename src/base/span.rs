//! Source text positions and ranges.

use std::fmt;

pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both fields are 0-indexed internally. Findings report them 1-indexed,
/// which is what [`fmt::Display`] prints. Columns count UTF-8 bytes from
/// the line start, so non-ASCII text earlier on the line widens them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting byte offsets of one file into line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the text clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        LineCol {
            line: line as u32,
            col: (offset - self.line_starts[line]).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display_is_one_indexed() {
        assert_eq!(LineCol::new(0, 0).to_string(), "1:1");
        assert_eq!(LineCol::new(1, 17).to_string(), "2:18");
    }

    #[test]
    fn test_interface_identifier_position() {
        let text = "\npublic interface Foo\n{\n}";
        let index = LineIndex::new(text);
        let offset = TextSize::from(text.find("Foo").unwrap() as u32);

        let pos = index.line_col(offset);
        assert_eq!((pos.line_one_indexed(), pos.col_one_indexed()), (2, 18));
    }

    #[test]
    fn test_line_starts() {
        let index = LineIndex::new("class A\n{\n    interface B {}\n}");

        assert_eq!(index.line_col(TextSize::from(7)), LineCol::new(0, 7));
        assert_eq!(index.line_col(TextSize::from(8)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(20)), LineCol::new(2, 10));
    }

    #[test]
    fn test_columns_count_bytes() {
        let text = "/* é */ interface Foo {}";
        let index = LineIndex::new(text);
        let offset = TextSize::from(text.find("Foo").unwrap() as u32);

        assert_eq!(index.line_col(offset), LineCol::new(0, 19));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_col(TextSize::from(99)), LineCol::new(1, 2));
    }
}
