//! Grouping of time entries into member/year/week/date/activity totals

use super::LookupTables;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A time entry as returned by the workspace source, with raw ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTimeEntry {
    pub member_id: u64,
    #[serde(default)]
    pub activity_id: Option<u64>,
    pub work: f64,
    pub work_performed_on: NaiveDate,
}

/// A time entry with member and activity names resolved
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub member_id: u64,
    pub member_name: String,
    pub activity_id: u64,
    pub activity_name: String,
    pub work_hours: f64,
    pub date: NaiveDate,
}

impl TimeEntry {
    /// Resolve a raw entry against the lookup tables.
    ///
    /// Entries without logged work or without an activity are not
    /// reportable and yield `Ok(None)`.
    pub fn resolve(raw: &RawTimeEntry, lookups: &LookupTables) -> Result<Option<Self>> {
        let activity_id = match raw.activity_id {
            Some(id) if id > 0 && raw.work > 0.0 => id,
            _ => return Ok(None),
        };

        let member = lookups.member(raw.member_id)?;
        let activity = lookups.activity(activity_id)?;

        Ok(Some(TimeEntry {
            member_id: member.id,
            member_name: member.user_name.clone(),
            activity_id,
            activity_name: activity.name.clone(),
            work_hours: raw.work,
            date: raw.work_performed_on,
        }))
    }
}

/// Hours per activity on one day
pub type DayHours = BTreeMap<String, f64>;
/// Days of one commercial week
pub type WeekHours = BTreeMap<NaiveDate, DayHours>;
/// Commercial weeks of one commercial year
pub type YearHours = BTreeMap<u32, WeekHours>;
/// Commercial years of one member
pub type MemberHours = BTreeMap<i32, YearHours>;

/// Aggregated hours: member -> year -> week -> date -> activity.
///
/// Ordered maps make iteration follow render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timesheet {
    members: BTreeMap<String, MemberHours>,
    entry_count: usize,
}

impl Timesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry's hours to its (member, year, week, date, activity) cell
    pub fn add(&mut self, entry: &TimeEntry) {
        let iso = entry.date.iso_week();
        *self
            .members
            .entry(entry.member_name.clone())
            .or_default()
            .entry(iso.year())
            .or_default()
            .entry(iso.week())
            .or_default()
            .entry(entry.date)
            .or_default()
            .entry(entry.activity_name.clone())
            .or_insert(0.0) += entry.work_hours;
        self.entry_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of entries folded into this timesheet
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Members in name order with their hours
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberHours)> {
        self.members.iter().map(|(name, hours)| (name.as_str(), hours))
    }

    /// Summed hours for one cell, if anything was logged there
    pub fn hours(&self, member: &str, date: NaiveDate, activity: &str) -> Option<f64> {
        let iso = date.iso_week();
        self.members
            .get(member)?
            .get(&iso.year())?
            .get(&iso.week())?
            .get(&date)?
            .get(activity)
            .copied()
    }

    /// Sum of every cell
    pub fn total_hours(&self) -> f64 {
        self.members
            .values()
            .flat_map(|years| years.values())
            .flat_map(|weeks| weeks.values())
            .flat_map(|days| days.values())
            .flat_map(|activities| activities.values())
            .sum()
    }
}

/// Group raw entries, dropping unreportable ones.
///
/// Fails on the first entry that references an unknown member or activity;
/// no partial timesheet is returned.
pub fn aggregate<'a, I>(entries: I, lookups: &LookupTables) -> Result<Timesheet>
where
    I: IntoIterator<Item = &'a RawTimeEntry>,
{
    let mut timesheet = Timesheet::new();

    for raw in entries {
        match TimeEntry::resolve(raw, lookups)? {
            Some(entry) => timesheet.add(&entry),
            None => debug!(
                member_id = raw.member_id,
                date = %raw.work_performed_on,
                "skipping entry without work or activity"
            ),
        }
    }

    Ok(timesheet)
}
