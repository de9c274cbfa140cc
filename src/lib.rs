//! tsreport - Weekly timesheet reports
//!
//! Resolves loosely specified periods to whole ISO commercial weeks, groups
//! time entries by member, week, day and activity, and lays them out as one
//! worksheet per member with a block per week.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::ReportError;
