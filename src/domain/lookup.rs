//! Workspace lookup tables: member and activity ids to names

use crate::error::{ReferenceKind, ReportError, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A workspace member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub user_name: String,
    #[serde(default)]
    pub access_level: Option<String>,
}

/// A kind of work time can be logged against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub name: String,
}

/// Id-keyed tables loaded once per workspace
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    members: BTreeMap<u64, Member>,
    activities: BTreeMap<u64, Activity>,
}

impl LookupTables {
    pub fn new(
        members: impl IntoIterator<Item = Member>,
        activities: impl IntoIterator<Item = Activity>,
    ) -> Self {
        LookupTables {
            members: members.into_iter().map(|m| (m.id, m)).collect(),
            activities: activities.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    /// Resolve a member id, failing with the dangling id
    pub fn member(&self, id: u64) -> Result<&Member> {
        self.members
            .get(&id)
            .ok_or(ReportError::UnresolvedReference {
                kind: ReferenceKind::Member,
                id,
            })
    }

    /// Resolve an activity id, failing with the dangling id
    pub fn activity(&self, id: u64) -> Result<&Activity> {
        self.activities
            .get(&id)
            .ok_or(ReportError::UnresolvedReference {
                kind: ReferenceKind::Activity,
                id,
            })
    }

    /// Find the single id whose name matches `pattern` (case-insensitive regex).
    ///
    /// Zero matches and more than one match are both errors.
    pub fn find(&self, kind: ReferenceKind, pattern: &str) -> Result<u64> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ReportError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        let matches: Vec<u64> = match kind {
            ReferenceKind::Member => self
                .members
                .values()
                .filter(|m| regex.is_match(&m.user_name))
                .map(|m| m.id)
                .collect(),
            ReferenceKind::Activity => self
                .activities
                .values()
                .filter(|a| regex.is_match(&a.name))
                .map(|a| a.id)
                .collect(),
        };

        match matches.as_slice() {
            [] => Err(ReportError::NoMatch {
                kind,
                query: pattern.to_string(),
            }),
            [id] => Ok(*id),
            _ => Err(ReportError::AmbiguousMatch {
                kind,
                query: pattern.to_string(),
                count: matches.len(),
            }),
        }
    }
}
