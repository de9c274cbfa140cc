//! Lookup use case: find members and activities by name

use crate::domain::LookupTables;
use crate::error::{ReferenceKind, Result};
use crate::infrastructure::WorkspaceSource;

/// An id and display name from a lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: u64,
    pub name: String,
}

fn name_of(tables: &LookupTables, kind: ReferenceKind, id: u64) -> Result<String> {
    Ok(match kind {
        ReferenceKind::Member => tables.member(id)?.user_name.clone(),
        ReferenceKind::Activity => tables.activity(id)?.name.clone(),
    })
}

/// List every member or activity of a workspace, or the single one whose
/// name matches `pattern`.
pub fn lookup<S: WorkspaceSource>(
    source: &S,
    workspace_id: u64,
    kind: ReferenceKind,
    pattern: Option<&str>,
) -> Result<Vec<Reference>> {
    let tables = source.lookup_tables(workspace_id)?;

    if let Some(pattern) = pattern {
        let id = tables.find(kind, pattern)?;
        let name = name_of(&tables, kind, id)?;
        return Ok(vec![Reference { id, name }]);
    }

    Ok(match kind {
        ReferenceKind::Member => tables
            .members()
            .map(|m| Reference {
                id: m.id,
                name: m.user_name.clone(),
            })
            .collect(),
        ReferenceKind::Activity => tables
            .activities()
            .map(|a| Reference {
                id: a.id,
                name: a.name.clone(),
            })
            .collect(),
    })
}
