//! Column-oriented view of a block of cells.
//!
//! A [`DataFrame`] is a key column of labels plus one data column per
//! captured field. The data columns need not be adjacent to the key column
//! but always have its height.

use std::fmt;

use log::debug;
use loadprices_market_data::models::ColumnFormat;
use loadprices_market_data::provider::yahoo::QuoteTable;
use loadprices_market_data::resolver::Classification;

use crate::errors::Result;

use super::adapter::{CellValue, SheetReader, SheetWriter};
use super::range::CellRange;

/// A column range and its values, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn<T = String> {
    cells: CellRange,
    values: Vec<T>,
}

impl<T> DataColumn<T> {
    pub fn new(cells: CellRange, values: Vec<T>) -> Self {
        Self { cells, values }
    }

    pub fn cells(&self) -> &CellRange {
        &self.cells
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.values.get(i)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empty column of the same height at `column` (e.g. `"B"`), completed
    /// from this column's range.
    pub fn copy_empty<U: Clone + Default>(&self, column: &str) -> Result<DataColumn<U>> {
        let cells = CellRange::parse(column)?.merge(&self.cells)?;
        Ok(DataColumn::new(cells, vec![U::default(); self.values.len()]))
    }
}

impl DataColumn<String> {
    /// Read the first column of `range`.
    ///
    /// With `truncate`, trailing blank cells are dropped and the range is
    /// shortened to match (an all-blank column keeps its range).
    pub fn read<R: SheetReader + ?Sized>(
        reader: &R,
        sheet: &str,
        range: &CellRange,
        truncate: bool,
    ) -> Result<Self> {
        let mut values = reader.read_cells(sheet, range)?;
        let mut cells = *range;

        if truncate {
            let length = values
                .iter()
                .rposition(|v| !v.trim().is_empty())
                .map_or(0, |i| i + 1);
            values.truncate(length);
            if length > 0 {
                let ((_, start_row), _) = range.posn();
                cells = range.with_end_row(start_row + length as u32 - 1)?;
            }
        }

        Ok(Self::new(cells, values))
    }
}

impl<T: fmt::Display> fmt::Display for DataColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{} [{}]", self.cells, values)
    }
}

/// Key column, per-row key mask and data columns.
#[derive(Debug, Clone)]
pub struct DataFrame {
    key: DataColumn<String>,
    mask: Vec<bool>,
    columns: Vec<DataColumn<CellValue>>,
    formats: Vec<ColumnFormat>,
}

impl DataFrame {
    /// Build a frame whose rows are masked in when their label resolved to a
    /// ticker in `classification`.
    ///
    /// `columns` are bare column names such as `"B"`; `formats` is matched to
    /// them by position and missing entries default to text.
    pub fn new<S: AsRef<str>>(
        key: DataColumn<String>,
        classification: &Classification,
        columns: &[S],
        formats: &[ColumnFormat],
    ) -> Result<Self> {
        let mask = key
            .values()
            .iter()
            .map(|label| classification.contains(label))
            .collect();
        let columns = columns
            .iter()
            .map(|c| key.copy_empty(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let formats = (0..columns.len())
            .map(|j| formats.get(j).copied().unwrap_or(ColumnFormat::Text))
            .collect();

        Ok(Self {
            key,
            mask,
            columns,
            formats,
        })
    }

    pub fn key(&self) -> &DataColumn<String> {
        &self.key
    }

    pub fn columns(&self) -> &[DataColumn<CellValue>] {
        &self.columns
    }

    pub fn formats(&self) -> &[ColumnFormat] {
        &self.formats
    }

    /// True when row `i` has a ticker and will be written.
    pub fn has_data(&self, i: usize) -> bool {
        self.mask.get(i).copied().unwrap_or(false)
    }

    pub fn masked_rows(&self) -> usize {
        self.mask.iter().filter(|m| **m).count()
    }

    /// Fill the data columns from `table`.
    ///
    /// Each masked row gets the record of its ticker, or the defaults when
    /// the response did not contain it. Unmasked rows stay empty.
    pub fn update(&mut self, table: &QuoteTable, classification: &Classification) {
        for (i, label) in self.key.values().iter().enumerate() {
            if !self.mask[i] {
                continue;
            }
            let Some(record) = table.lookup_label(classification, label) else {
                continue;
            };
            let fields = record.fields();
            for (j, column) in self.columns.iter_mut().enumerate() {
                let Some(field) = fields.get(j) else {
                    break;
                };
                column.values[i] = CellValue::from_field(field, self.formats[j]);
                debug!("update: '{}' ({},{})", label, i, j);
            }
        }
    }

    /// Write every masked row of every data column; returns the number of
    /// cells written.
    pub fn write<W: SheetWriter + ?Sized>(&self, writer: &mut W, sheet: &str) -> Result<usize> {
        let mut written = 0;
        for (column, format) in self.columns.iter().zip(&self.formats) {
            let ((col, start_row), _) = column.cells().posn();
            for (i, value) in column.values().iter().enumerate() {
                if !self.has_data(i) {
                    continue;
                }
                writer.write_cell(sheet, col, start_row + i as u32, value, *format)?;
                written += 1;
            }
        }
        Ok(written)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "[{}]", columns)
    }
}
