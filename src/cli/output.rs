//! Output formatting utilities

use crate::application::Reference;
use crate::domain::{CellValue, ResolvedPeriod};
use crate::infrastructure::{GridSheet, GridSink};

/// Format a resolved period for display
pub fn format_period(period: &ResolvedPeriod) -> String {
    format!(
        "{}  {}  {:+} week(s), {} day(s)",
        period.range.start,
        period.range.end,
        period.span,
        period.range.days()
    )
}

/// Format lookup results as `id  name` lines
pub fn format_references(references: &[Reference]) -> String {
    if references.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for reference in references {
        output.push_str(&format!("{:>8}  {}\n", reference.id, reference.name));
    }
    output
}

fn format_cell(value: Option<&CellValue>) -> String {
    match value {
        None => String::new(),
        Some(CellValue::Text(text)) => text.clone(),
        Some(CellValue::Number(hours)) => format!("{:.2}", hours),
    }
}

fn format_sheet(sheet: &GridSheet, output: &mut String) {
    let title = sheet.title.as_deref().unwrap_or("Sheet1");
    output.push_str(&format!("== {} ==\n", title));

    let Some((last_row, last_col)) = sheet.extent() else {
        return;
    };

    let widths: Vec<usize> = (0..=last_col)
        .map(|col| {
            (0..=last_row)
                .map(|row| format_cell(sheet.cell(row, col)).chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in 0..=last_row {
        let line: Vec<String> = (0..=last_col)
            .map(|col| {
                let text = format_cell(sheet.cell(row, col));
                format!("{:<width$}", text, width = widths[col as usize])
            })
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }
}

/// Render in-memory worksheets as aligned text
pub fn format_grid(grid: &GridSink) -> String {
    let mut output = String::new();
    for (index, sheet) in grid.sheets().iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        format_sheet(sheet, &mut output);
    }
    output
}
