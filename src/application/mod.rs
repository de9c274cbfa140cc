//! Application layer - Use cases and orchestration

pub mod generate_report;
pub mod lookup;
pub mod report_name;

pub use generate_report::{GenerateReportService, PreparedReport, ReportOptions};
pub use lookup::{lookup, Reference};
pub use report_name::report_file_name;
