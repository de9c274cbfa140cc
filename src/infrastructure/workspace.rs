//! Workspace data source
//!
//! The remote task-tracking service is represented by [`WorkspaceSource`].
//! [`TomlWorkspaceSource`] reads a workspace export saved as TOML.

use crate::domain::{Activity, DateRange, LookupTables, Member, RawTimeEntry};
use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Member id of the account holder
    pub id: u64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub id: u64,
    pub name: String,
}

/// Filter for timesheet entry queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryQuery {
    pub range: DateRange,
    /// Restrict to one member; `None` returns everyone's entries
    pub member_id: Option<u64>,
}

/// Abstract source of workspace metadata and time entries
pub trait WorkspaceSource {
    /// The account the source was opened for
    fn account(&self) -> &Account;

    /// Look up a workspace by id
    fn workspace(&self, id: u64) -> Result<&Workspace>;

    /// Member and activity tables of a workspace
    fn lookup_tables(&self, workspace_id: u64) -> Result<LookupTables>;

    /// Time entries of a workspace matching the query
    fn timesheet_entries(&self, workspace_id: u64, query: &EntryQuery)
        -> Result<Vec<RawTimeEntry>>;
}

#[derive(Debug, Clone, Deserialize)]
struct ExportedEntry {
    workspace_id: u64,
    member_id: u64,
    #[serde(default)]
    activity_id: Option<u64>,
    work: f64,
    work_performed_on: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
struct WorkspaceExport {
    account: Account,
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    entries: Vec<ExportedEntry>,
}

/// Workspace export stored as a TOML file
#[derive(Debug, Clone)]
pub struct TomlWorkspaceSource {
    export: WorkspaceExport,
}

impl TomlWorkspaceSource {
    /// Open an export on behalf of `email`.
    ///
    /// Fails with an authentication error if the export belongs to a
    /// different account.
    pub fn open(path: &Path, email: &str) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportError::Config(format!("Workspace export not found: {}", path.display()))
            } else {
                ReportError::Io(e)
            }
        })?;

        Self::from_toml(&contents, email)
    }

    /// Parse an export from TOML text
    pub fn from_toml(contents: &str, email: &str) -> Result<Self> {
        let export: WorkspaceExport = toml::from_str(contents)?;

        if !export.account.email.eq_ignore_ascii_case(email.trim()) {
            return Err(ReportError::Authentication(format!(
                "workspace export does not belong to {}",
                email
            )));
        }

        Ok(TomlWorkspaceSource { export })
    }
}

impl WorkspaceSource for TomlWorkspaceSource {
    fn account(&self) -> &Account {
        &self.export.account
    }

    fn workspace(&self, id: u64) -> Result<&Workspace> {
        self.export
            .workspaces
            .iter()
            .find(|w| w.id == id)
            .ok_or(ReportError::UnknownWorkspace(id))
    }

    fn lookup_tables(&self, workspace_id: u64) -> Result<LookupTables> {
        self.workspace(workspace_id)?;
        Ok(LookupTables::new(
            self.export.members.iter().cloned(),
            self.export.activities.iter().cloned(),
        ))
    }

    fn timesheet_entries(
        &self,
        workspace_id: u64,
        query: &EntryQuery,
    ) -> Result<Vec<RawTimeEntry>> {
        self.workspace(workspace_id)?;

        Ok(self
            .export
            .entries
            .iter()
            .filter(|e| e.workspace_id == workspace_id)
            .filter(|e| query.range.contains(e.work_performed_on))
            .filter(|e| query.member_id.map_or(true, |id| id == e.member_id))
            .map(|e| RawTimeEntry {
                member_id: e.member_id,
                activity_id: e.activity_id,
                work: e.work,
                work_performed_on: e.work_performed_on,
            })
            .collect())
    }
}
