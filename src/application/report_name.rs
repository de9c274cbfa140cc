//! Report file naming

use crate::domain::ResolvedPeriod;
use regex::Regex;
use std::sync::OnceLock;

/// Runs of whitespace, path separators and characters Windows rejects in file names
fn unsafe_chars_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f]+"#).unwrap())
}

/// File name for a report, e.g. `Acme_Labs_activities_2014-6-30+5week.xlsx`
pub fn report_file_name(workspace_name: &str, period: &ResolvedPeriod, all_members: bool) -> String {
    // The name must stay a single path component under the output directory
    let workspace = unsafe_chars_regex().replace_all(workspace_name.trim(), "_");
    format!(
        "{}_activities_{}{:+}week{}.xlsx",
        workspace,
        period.label(),
        period.span,
        if all_members { "_all_members" } else { "" }
    )
}
