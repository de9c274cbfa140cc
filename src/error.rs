//! Error types for tsreport

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which lookup table a reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Member,
    Activity,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Member => write!(f, "member"),
            ReferenceKind::Activity => write!(f, "activity"),
        }
    }
}

/// Main error type for tsreport
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Only either --reverse or --week-length can be used, not both (week length {week_length}, reverse {reverse})")]
    ConflictingSpan { week_length: i64, reverse: i64 },

    #[error("Invalid date: {0}")]
    InvalidDateToken(String),

    #[error("Unknown {kind} id {id}: not present in the workspace lookup tables")]
    UnresolvedReference { kind: ReferenceKind, id: u64 },

    #[error("No match returned for {kind} '{query}'")]
    NoMatch { kind: ReferenceKind, query: String },

    #[error("Multiple matches ({count}) returned for {kind} '{query}'")]
    AmbiguousMatch {
        kind: ReferenceKind,
        query: String,
        count: usize,
    },

    #[error("Invalid lookup pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unauthorized access: {0}")]
    Authentication(String),

    #[error("Unknown workspace: {0}")]
    UnknownWorkspace(u64),

    #[error("No tsreport configuration found from: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    /// True for errors caused by a malformed or contradictory period request
    pub fn is_invalid_specification(&self) -> bool {
        matches!(
            self,
            ReportError::ConflictingSpan { .. } | ReportError::InvalidDateToken(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::ConfigNotFound(_) => 2,
            e if e.is_invalid_specification() => 3,
            ReportError::UnresolvedReference { .. }
            | ReportError::NoMatch { .. }
            | ReportError::AmbiguousMatch { .. }
            | ReportError::InvalidPattern { .. } => 4,
            ReportError::Authentication(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ReportError::ConflictingSpan { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Use --week-length N to count weeks forward from the date\n\
                    • Use --reverse N to count weeks backward, ending with the date's week",
                    self
                )
            }
            ReportError::InvalidDateToken(token) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • YYYY (whole commercial year, e.g. 2014)\n\
                    • YYYY/M (whole month, e.g. 2014/7 or 2014.7)\n\
                    • YYYY-Www or Www (ISO week, e.g. 2014-W34 or W34 for this year)\n\
                    • YYYY/M/D or M/D (a single week, e.g. 2014/12/25 or 12/25)\n\n\
                    Examples:\n\
                    tsreport 2014\n\
                    tsreport 2014/7 --week-length 2\n\
                    tsreport 12/25 --reverse 3",
                    token
                )
            }
            ReportError::NoMatch { kind, .. } | ReportError::AmbiguousMatch { kind, .. } => {
                let list = match kind {
                    ReferenceKind::Member => "members",
                    ReferenceKind::Activity => "activities",
                };
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Matching is a case-insensitive regular expression\n\
                    • Anchor the pattern (e.g. '^design$') to narrow it down\n\
                    • Run 'tsreport lookup {}' without a pattern to list every entry",
                    self, list
                )
            }
            ReportError::ConfigNotFound(path) => {
                format!(
                    "No tsreport configuration found from: {}\n\n\
                    Suggestions:\n\
                    • Create a tsreport.toml in this directory or a parent\n\
                    • Pass --config <FILE>\n\
                    • Set TSREPORT_CONFIG environment variable to your config path",
                    path.display()
                )
            }
            ReportError::Authentication(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the email in tsreport.toml\n\
                    • Make sure the workspace export belongs to your account",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_span_is_invalid_specification() {
        let err = ReportError::ConflictingSpan {
            week_length: 2,
            reverse: 3,
        };
        assert!(err.is_invalid_specification());
        assert_eq!(err.exit_code(), 3);
        let msg = err.to_string();
        assert!(msg.contains("--reverse"));
        assert!(msg.contains("--week-length"));
    }

    #[test]
    fn test_invalid_date_examples() {
        let err = ReportError::InvalidDateToken("baddate".to_string());
        assert!(err.is_invalid_specification());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'baddate'"));
        assert!(msg.contains("YYYY/M"));
        assert!(msg.contains("Examples"));
    }

    #[test]
    fn test_unresolved_reference_names_the_id() {
        let err = ReportError::UnresolvedReference {
            kind: ReferenceKind::Activity,
            id: 42,
        };
        assert!(!err.is_invalid_specification());
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("activity id 42"));
    }

    #[test]
    fn test_lookup_suggestions() {
        let err = ReportError::AmbiguousMatch {
            kind: ReferenceKind::Member,
            query: "a".to_string(),
            count: 3,
        };
        let msg = err.display_with_suggestions();
        assert!(msg.contains("Multiple matches (3)"));
        assert!(msg.contains("tsreport lookup members"));
    }

    #[test]
    fn test_config_not_found_suggestions() {
        let err = ReportError::ConfigNotFound(PathBuf::from("/tmp/test"));
        assert_eq!(err.exit_code(), 2);
        let msg = err.display_with_suggestions();
        assert!(msg.contains("TSREPORT_CONFIG"));
        assert!(msg.contains("--config"));
    }

    #[test]
    fn test_authentication_exit_code() {
        let err = ReportError::Authentication("bad email".to_string());
        assert_eq!(err.exit_code(), 5);
        assert!(err.display_with_suggestions().contains("tsreport.toml"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = ReportError::Config("broken".to_string());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.display_with_suggestions(), "Configuration error: broken");
    }
}
