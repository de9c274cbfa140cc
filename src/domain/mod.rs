//! Domain layer - Period resolution, aggregation and report layout

pub mod lookup;
pub mod period;
pub mod report;
pub mod timesheet;

pub use lookup::{Activity, LookupTables, Member};
pub use period::{DateRange, PeriodSpec, PeriodToken, ResolvedPeriod, SpanRequest};
pub use report::{render, CellValue, TabularSink, WeeklyBlock};
pub use timesheet::{aggregate, RawTimeEntry, TimeEntry, Timesheet};
