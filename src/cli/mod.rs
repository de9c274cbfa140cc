//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, LookupKind, PeriodArgs};
pub use output::{format_grid, format_period, format_references};
