//! Excel workbook output

use crate::domain::{CellValue, TabularSink};
use crate::error::Result;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

/// Width of the label column, in characters
const LABEL_COLUMN_WIDTH: f64 = 24.0;

/// Tabular sink writing an .xlsx workbook.
///
/// Nothing reaches disk until [`XlsxSink::close`].
pub struct XlsxSink {
    path: PathBuf,
    workbook: Workbook,
    current: Option<Worksheet>,
    sheet_names: HashSet<String>,
}

impl XlsxSink {
    pub fn create(path: &Path) -> Self {
        XlsxSink {
            path: path.to_path_buf(),
            workbook: Workbook::new(),
            current: None,
            sheet_names: HashSet::new(),
        }
    }

    /// Flush the open sheet and save the workbook, creating parent
    /// directories as needed
    pub fn close(mut self) -> Result<PathBuf> {
        self.close_sheet()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        self.workbook.save(&self.path)?;
        Ok(self.path)
    }

    /// Make a member name acceptable as a unique worksheet name
    fn unique_sheet_name(&mut self, title: &str) -> String {
        let cleaned: String = title
            .chars()
            .map(|c| match c {
                '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
                c => c,
            })
            .collect();
        let cleaned = cleaned.trim_matches('\'');
        let base: String = if cleaned.is_empty() {
            "Sheet".to_string()
        } else {
            cleaned.chars().take(MAX_SHEET_NAME_LEN).collect()
        };

        let mut name = base.clone();
        let mut suffix = 2;
        while self.sheet_names.contains(&name.to_lowercase()) {
            let tag = format!("~{}", suffix);
            let keep = MAX_SHEET_NAME_LEN - tag.len();
            name = format!("{}{}", base.chars().take(keep).collect::<String>(), tag);
            suffix += 1;
        }

        self.sheet_names.insert(name.to_lowercase());
        name
    }
}

impl TabularSink for XlsxSink {
    fn open_sheet(&mut self, title: Option<&str>) -> Result<()> {
        self.close_sheet()?;

        let mut worksheet = Worksheet::new();
        if let Some(title) = title {
            let name = self.unique_sheet_name(title);
            worksheet.set_name(name)?;
        }
        worksheet.set_column_width(0, LABEL_COLUMN_WIDTH)?;

        self.current = Some(worksheet);
        Ok(())
    }

    fn write(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        let worksheet = self.current.get_or_insert_with(Worksheet::new);
        match value {
            CellValue::Text(text) => worksheet.write_string(row, col, text)?,
            CellValue::Number(number) => worksheet.write_number(row, col, number)?,
        };
        Ok(())
    }

    fn close_sheet(&mut self) -> Result<()> {
        if let Some(worksheet) = self.current.take() {
            self.workbook.push_worksheet(worksheet);
        }
        Ok(())
    }
}
