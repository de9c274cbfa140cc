//! Weekly report layout
//!
//! Turns an aggregated [`Timesheet`] into week blocks on a grid, one sheet per
//! member. Each block is laid out as:
//!
//! ```text
//! Week of 2014-06-30
//! Activities   Mon 6/30  Tue 7/1  ...  Sun 7/6   Project Total
//! Design                 2.5                     2.5
//! Testing      1                                 1
//! Daily Total  1         2.5                     3.5
//! ```
//!
//! Column 0 holds labels, columns 1..=7 are ISO weekdays Monday..Sunday and
//! column 8 holds totals.

use super::period::commercial_week_start;
use super::timesheet::{Timesheet, WeekHours};
use crate::error::Result;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Marker written when there is nothing to report
pub const NO_DATA_MARKER: &str = "No timesheets found";

pub const ACTIVITIES_LABEL: &str = "Activities";
pub const PROJECT_TOTAL_LABEL: &str = "Project Total";
pub const DAILY_TOTAL_LABEL: &str = "Daily Total";

/// Column holding row and grand totals
pub const TOTAL_COLUMN: u16 = 8;

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Destination grid for a rendered report
pub trait TabularSink {
    /// Start a new worksheet; `None` leaves the default title
    fn open_sheet(&mut self, title: Option<&str>) -> Result<()>;

    /// Write a cell on the current worksheet
    fn write(&mut self, row: u32, col: u16, value: CellValue) -> Result<()>;

    /// Finish the current worksheet
    fn close_sheet(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One activity's hours across a week
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub activity: String,
    /// Indexed by ISO weekday, Monday = 0
    pub hours: [Option<f64>; 7],
    pub total: f64,
}

/// One rendered week of a member's sheet
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBlock {
    pub first_day: NaiveDate,
    pub rows: Vec<ActivityRow>,
    /// Column sums, present only where hours were logged
    pub daily_totals: [Option<f64>; 7],
    pub grand_total: f64,
}

impl WeeklyBlock {
    /// Build the block for one commercial week of hours
    pub fn from_week(days: &WeekHours) -> Option<Self> {
        let first_day = commercial_week_start(*days.keys().next()?);

        let mut activities: BTreeMap<&str, [Option<f64>; 7]> = BTreeMap::new();
        let mut daily_totals = [None; 7];

        for (date, hours_by_activity) in days {
            let column = date.weekday().num_days_from_monday() as usize;
            for (activity, hours) in hours_by_activity {
                let cell = &mut activities.entry(activity.as_str()).or_insert([None; 7])[column];
                *cell = Some(cell.unwrap_or(0.0) + hours);
                let daily = &mut daily_totals[column];
                *daily = Some(daily.unwrap_or(0.0) + hours);
            }
        }

        let rows: Vec<ActivityRow> = activities
            .into_iter()
            .map(|(activity, hours)| ActivityRow {
                activity: activity.to_string(),
                total: hours.iter().flatten().sum(),
                hours,
            })
            .collect();
        let grand_total = rows.iter().map(|row| row.total).sum();

        Some(WeeklyBlock {
            first_day,
            rows,
            daily_totals,
            grand_total,
        })
    }

    /// The seven dates Monday..Sunday of this week
    pub fn dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|offset| self.first_day + Duration::days(offset as i64))
    }

    /// Write the block starting at `row`; returns the first row after it
    pub fn write_to<S: TabularSink + ?Sized>(&self, sink: &mut S, mut row: u32) -> Result<u32> {
        sink.write(row, 0, format!("Week of {}", self.first_day).into())?;
        row += 1;

        sink.write(row, 0, ACTIVITIES_LABEL.into())?;
        for (col, date) in (1u16..).zip(self.dates()) {
            sink.write(row, col, date.format("%a %-m/%-d").to_string().into())?;
        }
        sink.write(row, TOTAL_COLUMN, PROJECT_TOTAL_LABEL.into())?;
        row += 1;

        for activity in &self.rows {
            sink.write(row, 0, activity.activity.as_str().into())?;
            write_weekdays(sink, row, &activity.hours)?;
            sink.write(row, TOTAL_COLUMN, activity.total.into())?;
            row += 1;
        }

        sink.write(row, 0, DAILY_TOTAL_LABEL.into())?;
        write_weekdays(sink, row, &self.daily_totals)?;
        sink.write(row, TOTAL_COLUMN, self.grand_total.into())?;

        // Blank separator row before the next block
        Ok(row + 2)
    }
}

fn write_weekdays<S: TabularSink + ?Sized>(
    sink: &mut S,
    row: u32,
    hours: &[Option<f64>; 7],
) -> Result<()> {
    for (col, value) in (1u16..).zip(hours) {
        if let Some(value) = value {
            sink.write(row, col, (*value).into())?;
        }
    }
    Ok(())
}

/// Write the whole timesheet, one worksheet per member
pub fn render<S: TabularSink + ?Sized>(sink: &mut S, timesheet: &Timesheet) -> Result<()> {
    if timesheet.is_empty() {
        sink.open_sheet(None)?;
        sink.write(0, 0, NO_DATA_MARKER.into())?;
        return sink.close_sheet();
    }

    for (member, years) in timesheet.members() {
        sink.open_sheet(Some(member))?;

        let mut row = 0;
        for weeks in years.values() {
            for days in weeks.values() {
                if let Some(block) = WeeklyBlock::from_week(days) {
                    row = block.write_to(sink, row)?;
                }
            }
        }

        sink.close_sheet()?;
    }

    Ok(())
}
