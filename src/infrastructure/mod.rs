//! Infrastructure layer - Configuration, workspace data and report output

pub mod config;
pub mod grid;
pub mod workspace;
pub mod xlsx;

pub use config::Config;
pub use grid::{GridSheet, GridSink};
pub use workspace::{Account, EntryQuery, TomlWorkspaceSource, Workspace, WorkspaceSource};
pub use xlsx::XlsxSink;
