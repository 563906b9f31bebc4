use std::collections::{BTreeMap, HashMap};

use loadprices_market_data::models::ColumnFormat;

use crate::errors::{Error, Result};

use super::adapter::{CellValue, SheetReader, SheetWriter};
use super::range::CellRange;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCell {
    value: CellValue,
    format: Option<ColumnFormat>,
}

type Grid = BTreeMap<(u32, u32), StoredCell>;

/// In-memory workbook of named sheets.
///
/// Cells are keyed by `(row, col)`; a missing key is an empty cell.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    sheets: HashMap<String, Grid>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbook holding one empty sheet.
    pub fn with_sheet(name: &str) -> Self {
        let mut book = Self::new();
        book.add_sheet(name);
        book
    }

    pub fn add_sheet(&mut self, name: &str) {
        self.sheets.entry(name.to_string()).or_default();
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Store text at a position, creating the sheet if needed.
    pub fn set_text(&mut self, sheet: &str, col: u32, row: u32, text: &str) {
        let grid = self.sheets.entry(sheet.to_string()).or_default();
        if text.is_empty() {
            grid.remove(&(row, col));
        } else {
            grid.insert(
                (row, col),
                StoredCell {
                    value: CellValue::Text(text.to_string()),
                    format: None,
                },
            );
        }
    }

    /// Store `values` down column `col` starting at `start_row`.
    pub fn set_column<S: AsRef<str>>(&mut self, sheet: &str, col: u32, start_row: u32, values: &[S]) {
        for (offset, value) in values.iter().enumerate() {
            self.set_text(sheet, col, start_row + offset as u32, value.as_ref());
        }
    }

    pub fn value(&self, sheet: &str, col: u32, row: u32) -> CellValue {
        self.stored(sheet, col, row)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    /// Format recorded by the last write, if the cell was written.
    pub fn format(&self, sheet: &str, col: u32, row: u32) -> Option<ColumnFormat> {
        self.stored(sheet, col, row).and_then(|cell| cell.format)
    }

    /// Render a sheet as tab-separated rows, from A1 to the last used cell.
    pub fn to_tsv(&self, sheet: &str) -> Result<String> {
        let grid = self.grid(sheet)?;
        if grid.is_empty() {
            return Ok(String::new());
        }
        let last_row = grid.keys().map(|&(row, _)| row).max().unwrap_or(0);
        let last_col = grid.keys().map(|&(_, col)| col).max().unwrap_or(0);

        let mut lines = Vec::with_capacity(last_row as usize + 1);
        for row in 0..=last_row {
            let line = (0..=last_col)
                .map(|col| self.value(sheet, col, row).as_text())
                .collect::<Vec<_>>()
                .join("\t");
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    fn stored(&self, sheet: &str, col: u32, row: u32) -> Option<&StoredCell> {
        self.sheets.get(sheet).and_then(|grid| grid.get(&(row, col)))
    }

    fn grid(&self, sheet: &str) -> Result<&Grid> {
        self.sheets
            .get(sheet)
            .ok_or_else(|| Error::Sheet(format!("no sheet named '{}'", sheet)))
    }

    fn grid_mut(&mut self, sheet: &str) -> Result<&mut Grid> {
        self.sheets
            .get_mut(sheet)
            .ok_or_else(|| Error::Sheet(format!("no sheet named '{}'", sheet)))
    }
}

impl SheetReader for MemorySheet {
    fn read_cells(&self, sheet: &str, range: &CellRange) -> Result<Vec<String>> {
        let grid = self.grid(sheet)?;
        let ((col, _), _) = range.posn();
        Ok(range
            .rows()
            .map(|row| {
                grid.get(&(row, col))
                    .map(|cell| cell.value.as_text())
                    .unwrap_or_default()
            })
            .collect())
    }
}

impl SheetWriter for MemorySheet {
    fn clear_cells(&mut self, sheet: &str, range: &CellRange) -> Result<()> {
        let ((start_col, start_row), (end_col, end_row)) = range.posn();
        let grid = self.grid_mut(sheet)?;
        grid.retain(|&(row, col), _| {
            !(start_row..=end_row).contains(&row) || !(start_col..=end_col).contains(&col)
        });
        Ok(())
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        col: u32,
        row: u32,
        value: &CellValue,
        format: ColumnFormat,
    ) -> Result<()> {
        let grid = self.grid_mut(sheet)?;
        if value.is_empty() {
            grid.remove(&(row, col));
        } else {
            grid.insert(
                (row, col),
                StoredCell {
                    value: value.clone(),
                    format: Some(format),
                },
            );
        }
        Ok(())
    }
}
