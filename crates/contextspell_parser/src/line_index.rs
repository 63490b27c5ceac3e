//! Byte offset to row/column conversion.

use contextspell_ast::Point;

/// Table of line start offsets for one source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Builds the index for `source`.
    ///
    /// Only `\n` ends a line; a `\r` before it stays part of the line.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self { line_starts }
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a 0-based row and byte column.
    ///
    /// Uses binary search for O(log n) lookup.
    pub fn point(&self, offset: u32) -> Point {
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Point::new(row as u32, offset - self.line_starts[row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.point(0), Point::new(0, 0));
    }

    #[rstest]
    #[case(0, Point::new(0, 0))]
    #[case(3, Point::new(0, 3))]
    #[case(4, Point::new(1, 0))]
    #[case(6, Point::new(1, 2))]
    #[case(8, Point::new(2, 0))]
    #[case(9, Point::new(3, 0))]
    fn test_point(#[case] offset: u32, #[case] expected: Point) {
        //                        0123 4567 8 9
        let index = LineIndex::new("abc\ndef\n\nx");
        assert_eq!(index.point(offset), expected);
    }

    #[test]
    fn test_crlf_keeps_carriage_return_on_line() {
        let index = LineIndex::new("ab\r\ncd");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.point(2), Point::new(0, 2));
        assert_eq!(index.point(4), Point::new(1, 0));
    }

    #[test]
    fn test_offset_at_end_of_source() {
        let index = LineIndex::new("ab\n");
        assert_eq!(index.point(3), Point::new(1, 0));
    }
}
