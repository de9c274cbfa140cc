//! In-memory tabular sink

use crate::domain::{CellValue, TabularSink};
use crate::error::Result;
use std::collections::BTreeMap;

/// One worksheet held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSheet {
    pub title: Option<String>,
    pub cells: BTreeMap<(u32, u16), CellValue>,
}

impl GridSheet {
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Highest written row and column, if any cell was written
    pub fn extent(&self) -> Option<(u32, u16)> {
        let last_row = self.cells.keys().map(|(row, _)| *row).max()?;
        let last_col = self.cells.keys().map(|(_, col)| *col).max()?;
        Some((last_row, last_col))
    }
}

/// Tabular sink collecting worksheets in memory
#[derive(Debug, Clone, Default)]
pub struct GridSink {
    sheets: Vec<GridSheet>,
}

impl GridSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[GridSheet] {
        &self.sheets
    }
}

impl TabularSink for GridSink {
    fn open_sheet(&mut self, title: Option<&str>) -> Result<()> {
        self.sheets.push(GridSheet {
            title: title.map(str::to_string),
            cells: BTreeMap::new(),
        });
        Ok(())
    }

    fn write(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        if self.sheets.is_empty() {
            self.open_sheet(None)?;
        }
        if let Some(sheet) = self.sheets.last_mut() {
            sheet.cells.insert((row, col), value);
        }
        Ok(())
    }
}
