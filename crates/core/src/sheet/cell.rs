//! Cell coordinates.
//!
//! Columns use the spreadsheet's base-26 letters without a zero digit
//! (A=1 ... Z=26, AA=27), rows are written 1-based. Both are stored 0-based.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

const ALPHABET_LEN: u64 = 26;

/// A cell coordinate whose column and row may each be unset.
///
/// A partial cell ("B", "5") is completed with [`Cell::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    col: Option<u32>,
    row: Option<u32>,
}

impl Cell {
    /// `A1`
    pub const ORIGIN: Cell = Cell {
        col: Some(0),
        row: Some(0),
    };

    pub fn new(col: u32, row: u32) -> Self {
        Self {
            col: Some(col),
            row: Some(row),
        }
    }

    pub fn column_only(col: u32) -> Self {
        Self {
            col: Some(col),
            row: None,
        }
    }

    pub fn row_only(row: u32) -> Self {
        Self {
            col: None,
            row: Some(row),
        }
    }

    /// Create from signed positions, rejecting negative values.
    pub fn try_new(col: i64, row: i64) -> Result<Self> {
        Ok(Self::new(to_index(col, "column")?, to_index(row, "row")?))
    }

    /// Parse a cell name such as `"B2"`, `"$B$2"`, `"B"` or `"2"`.
    ///
    /// - `$` markers and surrounding whitespace are ignored, letters are
    ///   case-insensitive
    /// - an empty name is the origin
    /// - row `0` is read as the first row
    /// - a name containing `:` is a range, not a cell
    pub fn parse(text: &str) -> Result<Self> {
        if text.contains(':') {
            return Err(Error::Format(format!(
                "cell name must not be a range: '{}'",
                text
            )));
        }

        let name = text.replace('$', "").trim().to_uppercase();
        if name.is_empty() {
            return Ok(Self::ORIGIN);
        }

        let split = name
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(name.len());
        let (letters, digits) = name.split_at(split);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::Format(format!("cell name not recognised: '{}'", text)));
        }

        match (letters.is_empty(), digits.is_empty()) {
            (false, true) => Ok(Self::column_only(column_index(letters)?)),
            (true, false) => Ok(Self::row_only(row_index(digits)?)),
            (false, false) => Ok(Self::new(column_index(letters)?, row_index(digits)?)),
            (true, true) => Err(Error::Format(format!("cell name not recognised: '{}'", text))),
        }
    }

    pub fn col(&self) -> Option<u32> {
        self.col
    }

    pub fn row(&self) -> Option<u32> {
        self.row
    }

    /// 0-based `(column, row)`, unset fields read as 0.
    pub fn posn(&self) -> (u32, u32) {
        (self.col.unwrap_or(0), self.row.unwrap_or(0))
    }

    pub fn is_complete(&self) -> bool {
        self.col.is_some() && self.row.is_some()
    }

    /// Fill unset fields from `template`.
    pub fn merge(&self, template: &Cell) -> Cell {
        Cell {
            col: self.col.or(template.col),
            row: self.row.or(template.row),
        }
    }

    /// Overwrite fields with those set in `template`.
    pub fn merge_forced(&self, template: &Cell) -> Cell {
        Cell {
            col: template.col.or(self.col),
            row: template.row.or(self.row),
        }
    }

    /// Spreadsheet name: `"B2"`, or `"B"` / `"2"` for a partial cell.
    pub fn name(&self) -> String {
        let mut name = String::new();
        if let Some(col) = self.col {
            name.push_str(&column_name(col));
        }
        if let Some(row) = self.row {
            name.push_str(&(u64::from(row) + 1).to_string());
        }
        name
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Cell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Column letters for a 0-based index (0 = A, 25 = Z, 26 = AA).
pub fn column_name(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(index) + 1;
    while n > 0 {
        let remainder = (n - 1) % ALPHABET_LEN;
        letters.push(char::from(b'A' + remainder as u8));
        n = (n - 1) / ALPHABET_LEN;
    }
    letters.iter().rev().collect()
}

/// 0-based index of uppercase column letters (A = 0, Z = 25, AA = 26).
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::Format("empty column letters".into()));
    }

    let too_large = || Error::OutOfRange(format!("column '{}' is too large", letters));
    let mut number: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return Err(Error::Format(format!("invalid column letter '{}'", c)));
        }
        let digit = u64::from(c as u32 - 'A' as u32 + 1);
        number = number
            .checked_mul(ALPHABET_LEN)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(too_large)?;
    }
    u32::try_from(number - 1).map_err(|_| too_large())
}

/// 0-based row of 1-based row digits; `0` reads as the first row.
fn row_index(digits: &str) -> Result<u32> {
    let too_large = || Error::OutOfRange(format!("row '{}' is too large", digits));
    let row: u64 = digits.parse().map_err(|_| too_large())?;
    u32::try_from(row.saturating_sub(1)).map_err(|_| too_large())
}

fn to_index(value: i64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::OutOfRange(format!("{} position {} is not allowed", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name_of(col: u32, row: u32) -> String {
        Cell::new(col, row).name()
    }

    #[test]
    fn test_base26_boundaries() {
        assert_eq!(name_of(0, 0), "A1");
        assert_eq!(name_of(25, 0), "Z1");
        assert_eq!(name_of(26, 0), "AA1");
        assert_eq!(name_of(27, 0), "AB1");
        assert_eq!(name_of(51, 0), "AZ1");
        assert_eq!(name_of(52, 0), "BA1");
        assert_eq!(name_of(701, 0), "ZZ1");
        assert_eq!(name_of(702, 0), "AAA1");
        assert_eq!(name_of(703, 0), "AAB1");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("ZZ").unwrap(), 701);
        assert_eq!(column_index("AAA").unwrap(), 702);
        assert!(matches!(column_index(""), Err(Error::Format(_))));
        assert!(matches!(column_index("A1"), Err(Error::Format(_))));
        assert!(matches!(
            column_index("ZZZZZZZZZZ"),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_full_names() {
        assert_eq!(Cell::parse("A1").unwrap(), Cell::new(0, 0));
        assert_eq!(Cell::parse("B2").unwrap(), Cell::new(1, 1));
        assert_eq!(Cell::parse("AZ2").unwrap(), Cell::new(51, 1));
        assert_eq!(Cell::parse("$B$2").unwrap(), Cell::new(1, 1));
        assert_eq!(Cell::parse(" b2 ").unwrap(), Cell::new(1, 1));
        assert_eq!(Cell::parse("A01").unwrap(), Cell::new(0, 0));
    }

    #[test]
    fn test_parse_empty_is_origin() {
        assert_eq!(Cell::parse("").unwrap(), Cell::ORIGIN);
        assert_eq!(Cell::parse("  ").unwrap(), Cell::ORIGIN);
        assert_eq!(Cell::parse("$").unwrap(), Cell::ORIGIN);
    }

    #[test]
    fn test_parse_partial_names() {
        let cell = Cell::parse("B").unwrap();
        assert_eq!(cell.col(), Some(1));
        assert_eq!(cell.row(), None);
        assert!(!cell.is_complete());

        let cell = Cell::parse("5").unwrap();
        assert_eq!(cell.col(), None);
        assert_eq!(cell.row(), Some(4));
        assert_eq!(cell.posn(), (0, 4));
    }

    #[test]
    fn test_parse_row_zero_is_first_row() {
        assert_eq!(Cell::parse("A0").unwrap(), Cell::new(0, 0));
        assert_eq!(Cell::parse("0").unwrap(), Cell::row_only(0));
    }

    #[test]
    fn test_parse_rejects_range() {
        assert!(matches!(Cell::parse("A1:B2"), Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for name in ["1A", "A1B", "A-1", "A 1", "A1.5", "Ä1"] {
            assert!(
                matches!(Cell::parse(name), Err(Error::Format(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_parse_rejects_huge_row() {
        assert!(matches!(
            Cell::parse("A99999999999"),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_largest_positions_round_trip() {
        let corner = Cell::new(u32::MAX, u32::MAX);
        assert_eq!(corner.name(), "MWLQKWV4294967296");
        assert_eq!(Cell::parse(&corner.name()).unwrap(), corner);
        assert_eq!(Cell::parse("A4294967296").unwrap(), Cell::new(0, u32::MAX));
        assert_eq!(column_index("MWLQKWV").unwrap(), u32::MAX);

        assert!(matches!(Cell::parse("A4294967297"), Err(Error::OutOfRange(_))));
        assert!(matches!(column_index("MWLQKWW"), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert_eq!(Cell::try_new(2, 3).unwrap(), Cell::new(2, 3));
        assert!(matches!(Cell::try_new(-1, 0), Err(Error::OutOfRange(_))));
        assert!(matches!(Cell::try_new(0, -1), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_merge_fills_unset_fields_only() {
        let template = Cell::new(0, 9);
        assert_eq!(Cell::column_only(1).merge(&template), Cell::new(1, 9));
        assert_eq!(Cell::row_only(4).merge(&template), Cell::new(0, 4));
        assert_eq!(Cell::new(3, 3).merge(&template), Cell::new(3, 3));
        assert_eq!(Cell::default().merge(&template), template);
    }

    #[test]
    fn test_merge_forced_overwrites() {
        let template = Cell::column_only(7);
        assert_eq!(Cell::new(3, 3).merge_forced(&template), Cell::new(7, 3));
        assert_eq!(
            Cell::new(3, 3).merge_forced(&Cell::new(1, 1)),
            Cell::new(1, 1)
        );
    }

    #[test]
    fn test_partial_names_render_partially() {
        assert_eq!(Cell::column_only(1).name(), "B");
        assert_eq!(Cell::row_only(4).name(), "5");
        assert_eq!(Cell::default().name(), "");
        assert_eq!(Cell::new(27, 9).to_string(), "AB10");
    }

    #[test]
    fn test_from_str() {
        let cell: Cell = "C3".parse().unwrap();
        assert_eq!(cell.posn(), (2, 2));
    }

    proptest! {
        #[test]
        fn test_name_round_trip(col in any::<u32>(), row in any::<u32>()) {
            let cell = Cell::new(col, row);
            prop_assert_eq!(Cell::parse(&cell.name()).unwrap(), cell);
        }

        #[test]
        fn test_canonical_name_round_trip(col in 0u32..20_000, row in 0u32..1_048_576) {
            let name = format!("{}{}", column_name(col), row + 1);
            prop_assert_eq!(Cell::parse(&name).unwrap().name(), name);
        }
    }
}
