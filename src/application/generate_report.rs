//! Report generation use case
//!
//! Orchestrates the full workflow: validate the period, resolve it to a date
//! range, fetch and aggregate entries, then render the workbook.

use super::report_name::report_file_name;
use crate::domain::{aggregate, render, PeriodSpec, ResolvedPeriod, Timesheet};
use crate::error::Result;
use crate::infrastructure::{EntryQuery, GridSink, Workspace, WorkspaceSource, XlsxSink};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

/// What to report on
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Free-form date token (None = this week)
    pub date: Option<String>,

    /// Weeks forward from the anchor week
    pub week_length: Option<i64>,

    /// Weeks backward from the anchor week
    pub reverse: Option<i64>,

    /// Include every member instead of only the account holder
    pub all_members: bool,

    /// Workspace override (None = configured default)
    pub workspace: Option<u64>,
}

impl ReportOptions {
    /// Validate the period options
    pub fn period_spec(&self) -> Result<PeriodSpec> {
        PeriodSpec::new(self.date.as_deref(), self.week_length, self.reverse)
    }

    /// Resolve the requested period relative to `today`
    pub fn resolve_period(&self, today: NaiveDate) -> Result<ResolvedPeriod> {
        self.period_spec()?.resolve(today)
    }
}

/// Everything needed to write a report
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub workspace: Workspace,
    pub period: ResolvedPeriod,
    pub timesheet: Timesheet,
    pub all_members: bool,
}

impl PreparedReport {
    pub fn file_name(&self) -> String {
        report_file_name(&self.workspace.name, &self.period, self.all_members)
    }
}

/// Service for generating timesheet reports
pub struct GenerateReportService<S: WorkspaceSource> {
    source: S,
    default_workspace: u64,
    output_dir: PathBuf,
}

impl<S: WorkspaceSource> GenerateReportService<S> {
    /// Create a new report service
    pub fn new(source: S, default_workspace: u64, output_dir: PathBuf) -> Self {
        GenerateReportService {
            source,
            default_workspace,
            output_dir,
        }
    }

    /// Resolve, fetch and aggregate without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The period options are invalid or conflicting
    /// - The workspace is unknown
    /// - An entry references a member or activity missing from the workspace
    pub fn prepare(&self, options: &ReportOptions, today: NaiveDate) -> Result<PreparedReport> {
        // 1. Validate and resolve before touching the source
        let period = options.resolve_period(today)?;

        // 2. Workspace metadata
        let workspace_id = options.workspace.unwrap_or(self.default_workspace);
        let workspace = self.source.workspace(workspace_id)?.clone();
        let lookups = self.source.lookup_tables(workspace_id)?;

        // 3. Entries in range
        let query = EntryQuery {
            range: period.range,
            member_id: if options.all_members {
                None
            } else {
                Some(self.source.account().id)
            },
        };
        info!(
            workspace = %workspace.name,
            "Generating timesheet from {} to {}",
            period.range.start,
            period.range.end
        );
        let entries = self.source.timesheet_entries(workspace_id, &query)?;

        // 4. Group
        let timesheet = aggregate(&entries, &lookups)?;
        info!(
            fetched = entries.len(),
            "{} entries found",
            timesheet.entry_count()
        );
        if timesheet.is_empty() {
            warn!("No timesheets found for {}", period.range);
        }

        Ok(PreparedReport {
            workspace,
            period,
            timesheet,
            all_members: options.all_members,
        })
    }

    /// Write the report workbook and return its path
    pub fn execute(&self, options: &ReportOptions, today: NaiveDate) -> Result<PathBuf> {
        let report = self.prepare(options, today)?;
        let path = self.output_dir.join(report.file_name());

        // Rendering starts only once aggregation has fully succeeded.
        // The workbook is closed even if rendering fails part way.
        let mut sink = XlsxSink::create(&path);
        let rendered = render(&mut sink, &report.timesheet);
        let saved = sink.close();
        rendered?;
        let path = saved?;

        info!(path = %path.display(), "Report written");
        Ok(path)
    }

    /// Render the report into memory
    pub fn preview(&self, options: &ReportOptions, today: NaiveDate) -> Result<GridSink> {
        let report = self.prepare(options, today)?;
        let mut sink = GridSink::new();
        render(&mut sink, &report.timesheet)?;
        Ok(sink)
    }
}
