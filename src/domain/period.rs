//! Report period parsing and resolution to commercial-week ranges

use crate::error::{ReportError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Default week count when no explicit span is given for a single date
const SINGLE_WEEK: u32 = 1;

fn year_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})$").unwrap())
}

fn year_month_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})[^\dWw](\d{1,2})$").unwrap())
}

fn iso_week_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-?[Ww](\d{1,2})$").unwrap())
}

fn week_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[Ww](\d{1,2})$").unwrap())
}

fn full_date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})$").unwrap())
}

fn month_day_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})$").unwrap())
}

/// The reference date a report period is anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodToken {
    /// No date given
    Today,
    /// A whole commercial year
    Year(i32),
    /// A whole calendar month
    YearMonth(i32, u32),
    /// A single ISO week, e.g. `2014-W34`
    IsoWeek(i32, u32),
    /// A week of the current commercial year, e.g. `W34`
    Week(u32),
    /// Month and day in the current year
    MonthDay(u32, u32),
    /// A specific calendar date
    ExplicitDate(NaiveDate),
}

impl PeriodToken {
    /// Parse an optional date token. Absent or blank input means today.
    pub fn parse(input: Option<&str>) -> Result<Self> {
        let raw = match input.map(str::trim) {
            None | Some("") => return Ok(PeriodToken::Today),
            Some(raw) => raw,
        };
        let invalid = || ReportError::InvalidDateToken(raw.to_string());

        if raw.eq_ignore_ascii_case("today") {
            return Ok(PeriodToken::Today);
        }

        if let Some(caps) = year_regex().captures(raw) {
            let year = caps[1].parse().map_err(|_| invalid())?;
            return Ok(PeriodToken::Year(year));
        }

        if let Some(caps) = year_month_regex().captures(raw) {
            let year: i32 = caps[1].parse().map_err(|_| invalid())?;
            let month: u32 = caps[2].parse().map_err(|_| invalid())?;
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
            return Ok(PeriodToken::YearMonth(year, month));
        }

        if let Some(caps) = iso_week_regex().captures(raw) {
            let year: i32 = caps[1].parse().map_err(|_| invalid())?;
            let week: u32 = caps[2].parse().map_err(|_| invalid())?;
            NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)?;
            return Ok(PeriodToken::IsoWeek(year, week));
        }

        if let Some(caps) = week_regex().captures(raw) {
            let week: u32 = caps[1].parse().map_err(|_| invalid())?;
            if !(1..=53).contains(&week) {
                return Err(invalid());
            }
            return Ok(PeriodToken::Week(week));
        }

        if let Some(caps) = full_date_regex().captures(raw) {
            let year: i32 = caps[1].parse().map_err(|_| invalid())?;
            let month: u32 = caps[2].parse().map_err(|_| invalid())?;
            let day: u32 = caps[3].parse().map_err(|_| invalid())?;
            return NaiveDate::from_ymd_opt(year, month, day)
                .map(PeriodToken::ExplicitDate)
                .ok_or_else(invalid);
        }

        if let Some(caps) = month_day_regex().captures(raw) {
            let month: u32 = caps[1].parse().map_err(|_| invalid())?;
            let day: u32 = caps[2].parse().map_err(|_| invalid())?;
            // Leap-year check for 2000 accepts 2/29; the real year is applied on resolve
            NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(invalid)?;
            return Ok(PeriodToken::MonthDay(month, day));
        }

        Err(invalid())
    }

    /// The calendar date this token points at
    pub fn given_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        let date = match *self {
            PeriodToken::Today => Some(today),
            PeriodToken::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1),
            PeriodToken::YearMonth(year, month) => NaiveDate::from_ymd_opt(year, month, 1),
            PeriodToken::IsoWeek(year, week) => {
                NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            }
            // Week 53 only exists in some years, so it is checked here
            PeriodToken::Week(week) => {
                NaiveDate::from_isoywd_opt(today.iso_week().year(), week, Weekday::Mon)
            }
            PeriodToken::MonthDay(month, day) => NaiveDate::from_ymd_opt(today.year(), month, day),
            PeriodToken::ExplicitDate(date) => Some(date),
        };

        date.ok_or_else(|| ReportError::InvalidDateToken(self.to_string()))
    }

    /// Number of weeks covered when no explicit span is requested.
    ///
    /// Years cover every commercial week of that year; months cover every
    /// commercial week that overlaps the month, spilling into the next one.
    fn default_span(&self, week_start: NaiveDate) -> Result<u32> {
        let last_day = match *self {
            PeriodToken::Year(year) => {
                // Dec 28 always falls in the last commercial week of its year
                NaiveDate::from_ymd_opt(year, 12, 28)
            }
            PeriodToken::YearMonth(year, month) => {
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
            }
            _ => return Ok(SINGLE_WEEK),
        };

        let last_day = last_day.ok_or_else(|| ReportError::InvalidDateToken(self.to_string()))?;
        let end = commercial_week_start(last_day) + Duration::days(6);
        Ok(((end - week_start).num_days() + 1) as u32 / 7)
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodToken::Today => write!(f, "today"),
            PeriodToken::Year(year) => write!(f, "{}", year),
            PeriodToken::YearMonth(year, month) => write!(f, "{}/{}", year, month),
            PeriodToken::IsoWeek(year, week) => write!(f, "{}-W{:02}", year, week),
            PeriodToken::Week(week) => write!(f, "W{:02}", week),
            PeriodToken::MonthDay(month, day) => write!(f, "{}/{}", month, day),
            PeriodToken::ExplicitDate(date) => write!(f, "{}", date.format("%Y/%-m/%-d")),
        }
    }
}

/// How far the range extends from the anchor week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanRequest {
    /// Use the token's natural span (one week, a whole month, a whole year)
    #[default]
    Default,
    /// This many weeks, starting with the anchor week
    Forward(u32),
    /// This many weeks before the anchor week, plus the anchor week itself
    Backward(u32),
}

impl SpanRequest {
    /// Build from the two mutually exclusive week options.
    /// Counts below one are clamped to one.
    pub fn from_options(week_length: Option<i64>, reverse: Option<i64>) -> Result<Self> {
        match (week_length, reverse) {
            (Some(week_length), Some(reverse)) => Err(ReportError::ConflictingSpan {
                week_length,
                reverse,
            }),
            (Some(weeks), None) => Ok(SpanRequest::Forward(clamp_weeks(weeks))),
            (None, Some(weeks)) => Ok(SpanRequest::Backward(clamp_weeks(weeks))),
            (None, None) => Ok(SpanRequest::Default),
        }
    }
}

fn clamp_weeks(weeks: i64) -> u32 {
    weeks.clamp(1, u32::MAX as i64) as u32
}

/// A validated report period request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSpec {
    token: PeriodToken,
    span: SpanRequest,
}

impl PeriodSpec {
    /// Parse and validate a period request
    pub fn new(date: Option<&str>, week_length: Option<i64>, reverse: Option<i64>) -> Result<Self> {
        let span = SpanRequest::from_options(week_length, reverse)?;
        let token = PeriodToken::parse(date)?;
        Ok(PeriodSpec { token, span })
    }

    pub fn token(&self) -> PeriodToken {
        self.token
    }

    pub fn span(&self) -> SpanRequest {
        self.span
    }

    /// Resolve to an inclusive range of whole commercial weeks
    pub fn resolve(&self, today: NaiveDate) -> Result<ResolvedPeriod> {
        let given = self.token.given_date(today)?;
        let anchor = commercial_week_start(given);

        let (start, end, span) = match self.span {
            SpanRequest::Forward(weeks) => {
                let end = offset_weeks(anchor, weeks as i64)? - Duration::days(1);
                (anchor, end, weeks as i64)
            }
            SpanRequest::Backward(weeks) => {
                let start = offset_weeks(anchor, -(weeks as i64))?;
                (start, anchor + Duration::days(6), -(weeks as i64))
            }
            SpanRequest::Default => {
                let weeks = self.token.default_span(anchor)?;
                let end = offset_weeks(anchor, weeks as i64)? - Duration::days(1);
                (anchor, end, weeks as i64)
            }
        };

        Ok(ResolvedPeriod {
            range: DateRange { start, end },
            anchor,
            span,
        })
    }
}

/// Inclusive date range aligned to commercial weeks (Monday to Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Number of whole weeks in the range
    pub fn weeks(&self) -> i64 {
        self.days() / 7
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Outcome of resolving a [`PeriodSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub range: DateRange,
    /// First day of the anchor week
    pub anchor: NaiveDate,
    /// Signed week count: negative when counted backwards
    pub span: i64,
}

impl ResolvedPeriod {
    /// Anchor date as used in report names, e.g. `2014-1-6`
    pub fn label(&self) -> String {
        self.anchor.format("%Y-%-m-%-d").to_string()
    }
}

fn offset_weeks(date: NaiveDate, weeks: i64) -> Result<NaiveDate> {
    Duration::try_weeks(weeks)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| ReportError::InvalidDateToken(format!("{} {:+} weeks", date, weeks)))
}

/// Monday of the commercial week containing `date`
pub fn commercial_week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commercial(year: i32, week: u32) -> NaiveDate {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).unwrap()
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn resolve(date: Option<&str>, week_length: Option<i64>, reverse: Option<i64>) -> DateRange {
        // Friday, Oct 17, 2014
        let today = day(2014, 10, 17);
        PeriodSpec::new(date, week_length, reverse)
            .unwrap()
            .resolve(today)
            .unwrap()
            .range
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(PeriodToken::parse(None).unwrap(), PeriodToken::Today);
        assert_eq!(PeriodToken::parse(Some("  ")).unwrap(), PeriodToken::Today);
        assert_eq!(PeriodToken::parse(Some("2014")).unwrap(), PeriodToken::Year(2014));
        assert_eq!(
            PeriodToken::parse(Some("2014/7")).unwrap(),
            PeriodToken::YearMonth(2014, 7)
        );
        assert_eq!(
            PeriodToken::parse(Some("2014.12")).unwrap(),
            PeriodToken::YearMonth(2014, 12)
        );
        assert_eq!(
            PeriodToken::parse(Some("2014-W34")).unwrap(),
            PeriodToken::IsoWeek(2014, 34)
        );
        assert_eq!(
            PeriodToken::parse(Some("2014w1")).unwrap(),
            PeriodToken::IsoWeek(2014, 1)
        );
        assert_eq!(PeriodToken::parse(Some("W34")).unwrap(), PeriodToken::Week(34));
        assert_eq!(PeriodToken::parse(Some("w5")).unwrap(), PeriodToken::Week(5));
        assert_eq!(
            PeriodToken::parse(Some("2014/12/25")).unwrap(),
            PeriodToken::ExplicitDate(day(2014, 12, 25))
        );
        assert_eq!(
            PeriodToken::parse(Some("2014-12-25")).unwrap(),
            PeriodToken::ExplicitDate(day(2014, 12, 25))
        );
        assert_eq!(
            PeriodToken::parse(Some("12/25")).unwrap(),
            PeriodToken::MonthDay(12, 25)
        );
    }

    #[test]
    fn test_parse_invalid_tokens() {
        for token in ["yesterday", "2014/13", "2014/2/30", "13/1", "2014-W60", "W0", "W54", "201", "2014/"] {
            let err = PeriodToken::parse(Some(token)).unwrap_err();
            assert!(err.is_invalid_specification(), "{} should be rejected", token);
        }
    }

    #[test]
    fn test_conflicting_options_rejected() {
        let err = PeriodSpec::new(Some("2014"), Some(2), Some(3)).unwrap_err();
        assert!(matches!(
            err,
            ReportError::ConflictingSpan {
                week_length: 2,
                reverse: 3
            }
        ));
        assert!(PeriodSpec::new(None, Some(1), Some(1)).is_err());
    }

    #[test]
    fn test_spans_clamped_to_one_week() {
        assert_eq!(
            SpanRequest::from_options(Some(0), None).unwrap(),
            SpanRequest::Forward(1)
        );
        assert_eq!(
            SpanRequest::from_options(None, Some(-4)).unwrap(),
            SpanRequest::Backward(1)
        );
    }

    #[test]
    fn test_today_week() {
        let range = resolve(None, None, None);
        assert_eq!(range.start, day(2014, 10, 13));
        assert_eq!(range.end, day(2014, 10, 19));
    }

    #[test]
    fn test_whole_year() {
        let range = resolve(Some("2014"), None, None);
        assert_eq!(range.start, commercial(2014, 1));
        assert_eq!(range.end, commercial(2015, 1) - Duration::days(1));
        assert_eq!(range.weeks(), 52);
        assert_eq!(range.days(), 364);
    }

    #[test]
    fn test_year_with_fifty_three_weeks() {
        let range = resolve(Some("2015"), None, None);
        assert_eq!(range.start, commercial(2015, 1));
        assert_eq!(range.end, commercial(2016, 1) - Duration::days(1));
        assert_eq!(range.weeks(), 53);
    }

    #[test]
    fn test_year_boundary_date_belongs_to_next_commercial_year() {
        let range = resolve(Some("2013/12/31"), None, None);
        assert_eq!(range.start, commercial(2014, 1));
        assert_eq!(range.end, commercial(2014, 1) + Duration::days(6));
    }

    #[test]
    fn test_forward_weeks() {
        let range = resolve(Some("2014/1/1"), Some(3), None);
        assert_eq!(range.start, commercial(2014, 1));
        assert_eq!(range.end, commercial(2014, 4) - Duration::days(1));

        let range = resolve(Some("2014-W34"), Some(3), None);
        assert_eq!(range.start, commercial(2014, 34));
        assert_eq!(range.end, commercial(2014, 37) - Duration::days(1));
    }

    #[test]
    fn test_reverse_weeks_include_anchor_week() {
        let range = resolve(Some("2014"), None, Some(3));
        assert_eq!(range.start, commercial(2013, 50));
        assert_eq!(range.end, commercial(2014, 2) - Duration::days(1));

        let range = resolve(Some("2014-W34"), None, Some(3));
        assert_eq!(range.start, commercial(2014, 31));
        assert_eq!(range.end, commercial(2014, 35) - Duration::days(1));

        let range = resolve(None, None, Some(3));
        assert_eq!(range.start, commercial(2014, 42) - Duration::weeks(3));
        assert_eq!(range.end, day(2014, 10, 19));
    }

    #[test]
    fn test_week_of_current_commercial_year() {
        let range = resolve(Some("W34"), None, None);
        assert_eq!(range.start, commercial(2014, 34));
        assert_eq!(range.end, commercial(2014, 35) - Duration::days(1));

        let range = resolve(Some("W34"), Some(3), None);
        assert_eq!(range.start, commercial(2014, 34));
        assert_eq!(range.end, commercial(2014, 37) - Duration::days(1));

        let range = resolve(Some("W34"), None, Some(3));
        assert_eq!(range.start, commercial(2014, 31));
        assert_eq!(range.end, commercial(2014, 35) - Duration::days(1));
    }

    #[test]
    fn test_week_uses_commercial_year_of_today() {
        // Dec 29, 2014 is already in commercial year 2015
        let spec = PeriodSpec::new(Some("W2"), None, None).unwrap();
        let resolved = spec.resolve(day(2014, 12, 29)).unwrap();
        assert_eq!(resolved.range.start, commercial(2015, 2));

        // 2014 has only 52 commercial weeks
        let spec = PeriodSpec::new(Some("W53"), None, None).unwrap();
        assert!(spec.resolve(day(2015, 6, 1)).is_ok());
        let err = spec.resolve(day(2014, 6, 1)).unwrap_err();
        assert!(err.is_invalid_specification());
    }

    #[test]
    fn test_reverse_span_is_negative() {
        let spec = PeriodSpec::new(Some("2014/12/25"), None, Some(2)).unwrap();
        let resolved = spec.resolve(day(2020, 1, 1)).unwrap();
        assert_eq!(resolved.span, -2);
        assert_eq!(resolved.anchor, day(2014, 12, 22));
        assert_eq!(resolved.label(), "2014-12-22");
    }

    #[test]
    fn test_month_covers_last_overlapping_week() {
        // July 2014: Tue 1st to Thu 31st
        let spec = PeriodSpec::new(Some("2014/7"), None, None).unwrap();
        let resolved = spec.resolve(day(2020, 1, 1)).unwrap();
        assert_eq!(resolved.range.start, day(2014, 6, 30));
        assert_eq!(resolved.range.end, day(2014, 8, 3));
        assert_eq!(resolved.span, 5);

        // March 2015 starts on a Sunday and needs six weeks
        let range = resolve(Some("2015.3"), None, None);
        assert_eq!(range.start, day(2015, 2, 23));
        assert_eq!(range.end, day(2015, 4, 5));
        assert_eq!(range.weeks(), 6);
    }

    #[test]
    fn test_december_month_spills_into_january() {
        let range = resolve(Some("2014/12"), None, None);
        assert_eq!(range.start, day(2014, 12, 1));
        assert_eq!(range.end, day(2015, 1, 4));
    }

    #[test]
    fn test_month_day_uses_current_year() {
        let range = resolve(Some("3/5"), None, None);
        assert_eq!(range.start, day(2014, 3, 3));
        assert_eq!(range.end, day(2014, 3, 9));
    }

    #[test]
    fn test_month_day_leap_day_outside_leap_year() {
        let spec = PeriodSpec::new(Some("2/29"), None, None).unwrap();
        assert!(spec.resolve(day(2016, 6, 1)).is_ok());
        let err = spec.resolve(day(2014, 6, 1)).unwrap_err();
        assert!(err.is_invalid_specification());
    }

    #[test]
    fn test_resolved_range_is_week_aligned() {
        for token in ["2014", "2014/2", "2014/5/17", "2015-W53", "11/30"] {
            for (week_length, reverse) in [(None, None), (Some(4), None), (None, Some(2))] {
                let range = resolve(Some(token), week_length, reverse);
                assert_eq!(range.start.weekday(), Weekday::Mon, "{}", token);
                assert_eq!(range.end.weekday(), Weekday::Sun, "{}", token);
                assert!(range.start <= range.end);
            }
        }
    }

    #[test]
    fn test_date_range_contains() {
        let range = resolve(Some("2014-W34"), None, None);
        assert!(range.contains(day(2014, 8, 18)));
        assert!(range.contains(day(2014, 8, 24)));
        assert!(!range.contains(day(2014, 8, 25)));
        assert_eq!(range.to_string(), "2014-08-18 to 2014-08-24");
    }
}
