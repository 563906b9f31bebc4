use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

use super::cell::Cell;

const RANGE_SEPARATOR: char = ':';

/// An ordered pair of cells, start before end on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: Cell,
    end: Cell,
}

impl CellRange {
    /// Create a range, rejecting a start that lies after the end.
    ///
    /// Both ends must set the same fields: `A1:B2` and `A:B` are ranges,
    /// `A5:B` is not.
    pub fn new(start: Cell, end: Cell) -> Result<Self> {
        if start.col().is_some() != end.col().is_some()
            || start.row().is_some() != end.row().is_some()
        {
            return Err(Error::Format(format!(
                "start and end of {}:{} do not name the same kind of cell",
                start, end
            )));
        }
        if let (Some(a), Some(b)) = (start.col(), end.col()) {
            if a > b {
                return Err(Error::Orientation(format!(
                    "start column and end column are reversed in {}:{}",
                    start, end
                )));
            }
        }
        if let (Some(a), Some(b)) = (start.row(), end.row()) {
            if a > b {
                return Err(Error::Orientation(format!(
                    "start row and end row are reversed in {}:{}",
                    start, end
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// Create from 0-based positions.
    pub fn from_posn(start_col: u32, start_row: u32, end_col: u32, end_row: u32) -> Result<Self> {
        Self::new(Cell::new(start_col, start_row), Cell::new(end_col, end_row))
    }

    /// Single-cell range.
    pub fn single(cell: Cell) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Parse `"A1:C3"`, or a single cell name such as `"B2"` or `"B"`.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(RANGE_SEPARATOR).collect();
        match parts.as_slice() {
            [single] => Ok(Self::single(Cell::parse(single)?)),
            [start, end] => {
                if start.trim().is_empty() {
                    return Err(Error::Format(format!(
                        "start cell is missing in range '{}'",
                        text
                    )));
                }
                if end.trim().is_empty() {
                    return Err(Error::Format(format!(
                        "end cell is missing in range '{}'",
                        text
                    )));
                }
                Self::new(Cell::parse(start)?, Cell::parse(end)?)
            }
            _ => Err(Error::Format(format!(
                "range must contain at most one '{}': '{}'",
                RANGE_SEPARATOR, text
            ))),
        }
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// Complete both ends from `template`; `"B"` merged with `A1:A200` is
    /// `B1:B200`.
    pub fn merge(&self, template: &CellRange) -> Result<Self> {
        Self::new(
            self.start.merge(&template.start),
            self.end.merge(&template.end),
        )
    }

    /// 0-based `((start_col, start_row), (end_col, end_row))`.
    pub fn posn(&self) -> ((u32, u32), (u32, u32)) {
        (self.start.posn(), self.end.posn())
    }

    /// Row indices covered by the range.
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        let ((_, start_row), (_, end_row)) = self.posn();
        start_row..=end_row
    }

    pub fn height(&self) -> usize {
        let ((_, start_row), (_, end_row)) = self.posn();
        end_row.saturating_sub(start_row) as usize + 1
    }

    /// Same range with its end row moved to `row`; a range without rows
    /// starts at the first row.
    pub fn with_end_row(&self, row: u32) -> Result<Self> {
        let start = self.start.merge(&Cell::row_only(0));
        let end = self.end.merge_forced(&Cell::row_only(row));
        Self::new(start, end)
    }

    /// `"A1"` when start and end coincide, otherwise `"A1:C3"`.
    pub fn name(&self) -> String {
        if self.start == self.end {
            self.start.name()
        } else {
            format!("{}{}{}", self.start, RANGE_SEPARATOR, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(text: &str) -> CellRange {
        CellRange::parse(text).unwrap()
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(range("A1:C3").posn(), ((0, 0), (2, 2)));
        assert_eq!(range("A1:A99").posn(), ((0, 0), (0, 98)));
        assert_eq!(range("$A$1:$A$200").posn(), ((0, 0), (0, 199)));
        assert_eq!(range("a1:c3"), range("A1:C3"));
    }

    #[test]
    fn test_parse_single_cell() {
        let r = range("B2");
        assert_eq!(r.start(), r.end());
        assert_eq!(r.posn(), ((1, 1), (1, 1)));
        assert_eq!(range("").posn(), ((0, 0), (0, 0)));
    }

    #[test]
    fn test_parse_partial_columns() {
        let r = range("A:Z");
        assert_eq!(r.posn(), ((0, 0), (25, 0)));
        assert_eq!(r.start().row(), None);
    }

    #[test]
    fn test_parse_rejects_missing_side() {
        assert!(matches!(CellRange::parse(":B2"), Err(Error::Format(_))));
        assert!(matches!(CellRange::parse("A1:"), Err(Error::Format(_))));
        assert!(matches!(CellRange::parse(":"), Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_rejects_mismatched_ends() {
        for text in ["A5:B", "A2:A", "A:B7", "3:B7", "A1:9"] {
            assert!(
                matches!(CellRange::parse(text), Err(Error::Format(_))),
                "{} should be rejected",
                text
            );
        }
        assert!(matches!(
            CellRange::new(Cell::new(0, 4), Cell::column_only(1)),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_column_pair_merges_to_full_range() {
        let key = range("A2:A40");
        assert_eq!(range("C:D").merge(&key).unwrap(), range("C2:D40"));
    }

    #[test]
    fn test_parse_rejects_two_separators() {
        assert!(matches!(CellRange::parse("A1:B2:C3"), Err(Error::Format(_))));
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(matches!(CellRange::parse("C1:A1"), Err(Error::Orientation(_))));
        assert!(matches!(CellRange::parse("A9:A1"), Err(Error::Orientation(_))));
        assert!(matches!(
            CellRange::from_posn(3, 0, 2, 0),
            Err(Error::Orientation(_))
        ));
    }

    #[test]
    fn test_merge_bare_column() {
        let key = range("A1:A200");
        let data = range("B").merge(&key).unwrap();
        assert_eq!(data, range("B1:B200"));
        assert_eq!(data.name(), "B1:B200");
    }

    #[test]
    fn test_merge_keeps_explicit_fields() {
        let key = range("A1:A200");
        assert_eq!(range("C5:C9").merge(&key).unwrap(), range("C5:C9"));
    }

    #[test]
    fn test_rows_and_height() {
        let r = range("E3:G7");
        assert_eq!(r.rows().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
        assert_eq!(r.height(), 5);
        assert_eq!(range("B2").height(), 1);
        assert_eq!(range("A:C").height(), 1);
    }

    #[test]
    fn test_with_end_row() {
        let r = range("A1:A200").with_end_row(3).unwrap();
        assert_eq!(r, range("A1:A4"));
        assert!(matches!(
            range("A5:A200").with_end_row(0),
            Err(Error::Orientation(_))
        ));
        assert_eq!(range("B:B").with_end_row(9).unwrap(), range("B1:B10"));
    }

    #[test]
    fn test_name() {
        assert_eq!(range("A1:C3").name(), "A1:C3");
        assert_eq!(range("B2:B2").name(), "B2");
        assert_eq!(range("F").to_string(), "F");
    }
}
