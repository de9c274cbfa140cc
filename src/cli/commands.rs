//! CLI command definitions

use crate::application::ReportOptions;
use crate::error::ReferenceKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tsreport")]
#[command(about = "Weekly per-activity timesheet reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Report on every member instead of only your own entries
    #[arg(short, long, global = true)]
    pub all_members: bool,

    /// Workspace id (default: the configured workspace)
    #[arg(short, long, global = true, value_name = "ID")]
    pub workspace: Option<u64>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $TSREPORT_CONFIG or tsreport.toml in a parent directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Period selection shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Date (e.g., 2014, 2014/7, 2014-W34, W34, 2014/12/25, 12/25; default: this week)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Number of weeks to report, starting with the date's week
    #[arg(short = 'l', long, value_name = "WEEKS", allow_negative_numbers = true)]
    pub week_length: Option<i64>,

    /// Number of weeks to report before the date's week, counting backwards
    #[arg(short, long, value_name = "WEEKS", allow_negative_numbers = true)]
    pub reverse: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved date range without generating a report
    Range {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Print the report as text instead of writing a workbook
    Preview {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Find members or activities by name
    Lookup {
        /// Table to search
        kind: LookupKind,

        /// Case-insensitive pattern (omit to list everything)
        pattern: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Members,
    Activities,
}

impl From<LookupKind> for ReferenceKind {
    fn from(kind: LookupKind) -> Self {
        match kind {
            LookupKind::Members => ReferenceKind::Member,
            LookupKind::Activities => ReferenceKind::Activity,
        }
    }
}

impl Cli {
    /// Report options from a period and the global flags
    pub fn report_options(&self, period: &PeriodArgs) -> ReportOptions {
        ReportOptions {
            date: period.date.clone(),
            week_length: period.week_length,
            reverse: period.reverse,
            all_members: self.all_members,
            workspace: self.workspace,
        }
    }
}
