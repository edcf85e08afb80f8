//! # Temporal Types — Timestamps and Date Grammars
//!
//! Two grammars coexist in Anamnesis documents:
//!
//! - **Strict ISO-8601** ([`is_iso8601_timestamp`]): four-digit year,
//!   month, day, `T`, time, optional fractional seconds, and a mandatory
//!   `Z` or `±hh:mm` offset. Bare local times and date-only strings are
//!   rejected. Memory entries always use this grammar.
//!
//! - **Permissive dates** ([`parse_permissive_date`]): anything a generous
//!   date parser would accept, including date-only strings, offset-less
//!   date-times and RFC 2822. Attestation and capability documents use
//!   this grammar unless the caller asks for strict dates.
//!
//! The strict grammar is purely syntactic: `2026-13-45T99:00:00Z` matches
//! it. That mirrors how published entries have always been checked.
//!
//! `Timestamp` is the UTC-only value type used when this workspace
//! *produces* timestamps (e.g. defaulting a new memory entry's time).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO8601_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$")
        .expect("ISO-8601 pattern is a valid regex")
});

/// Offset-less date-time layouts accepted by the permissive parser,
/// interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted by the permissive parser.
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Returns true if `s` matches the strict ISO-8601 timestamp pattern.
pub fn is_iso8601_timestamp(s: &str) -> bool {
    ISO8601_PATTERN.is_match(s)
}

/// Parse a date string permissively, returning the instant in UTC.
///
/// Accepts RFC 3339, RFC 2822, ISO date-times with a compact `±hhmm`
/// offset, minute-precision date-times with `Z` or `±hh:mm`, offset-less
/// date-times (read as UTC), date-only strings, and the reduced forms
/// `YYYY-MM` and `YYYY`. Leading and trailing whitespace
/// is ignored. Returns `None` when nothing matches.
pub fn parse_permissive_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
        }
    }
    parse_reduced_date(s)
}

/// `YYYY-MM` and `YYYY`.
fn parse_reduced_date(s: &str) -> Option<DateTime<Utc>> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let (year, month) = match s.split_once('-') {
        Some((y, m)) if y.len() == 4 && m.len() == 2 && all_digits(y) && all_digits(m) => {
            (y.parse().ok()?, m.parse().ok()?)
        }
        None if s.len() == 4 && all_digits(s) => (s.parse().ok()?, 1),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| Utc.from_utc_datetime(&n))
}

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
///
/// Incoming document timestamps stay strings and are checked with
/// [`is_iso8601_timestamp`] or [`parse_permissive_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO-8601 with Z suffix (e.g., `2026-02-07T10:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- strict pattern ----

    #[test]
    fn test_iso8601_accepts_z_and_offsets() {
        assert!(is_iso8601_timestamp("2026-02-07T10:00:00Z"));
        assert!(is_iso8601_timestamp("2026-02-07T10:00:00.123Z"));
        assert!(is_iso8601_timestamp("2026-02-07T10:00:00+05:30"));
        assert!(is_iso8601_timestamp("2026-02-07T10:00:00-04:00"));
    }

    #[test]
    fn test_iso8601_rejects_bare_local_time() {
        assert!(!is_iso8601_timestamp("2026-02-07T10:00:00"));
    }

    #[test]
    fn test_iso8601_rejects_date_only() {
        assert!(!is_iso8601_timestamp("2026-02-07"));
    }

    #[test]
    fn test_iso8601_rejects_compact_offset_and_space() {
        assert!(!is_iso8601_timestamp("2026-02-07T10:00:00+0530"));
        assert!(!is_iso8601_timestamp("2026-02-07 10:00:00Z"));
        assert!(!is_iso8601_timestamp(" 2026-02-07T10:00:00Z"));
    }

    #[test]
    fn test_iso8601_is_syntactic_only() {
        assert!(is_iso8601_timestamp("2026-13-45T99:00:00Z"));
    }

    // ---- permissive parse ----

    #[test]
    fn test_permissive_accepts_date_only() {
        let dt = parse_permissive_date("2026-02-07").unwrap();
        assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S").to_string(), "2026-02-07T00:00:00");
    }

    #[test]
    fn test_permissive_accepts_rfc3339() {
        let dt = parse_permissive_date("2026-02-07T15:00:00+05:00").unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-02-07T10:00:00Z");
    }

    #[test]
    fn test_permissive_accepts_offsetless_datetime() {
        assert!(parse_permissive_date("2026-02-07T10:00:00").is_some());
        assert!(parse_permissive_date("2026-02-07T10:00").is_some());
        assert!(parse_permissive_date("2026-02-07 10:00:00").is_some());
    }

    #[test]
    fn test_permissive_accepts_minute_precision_utc() {
        let dt = parse_permissive_date("2026-02-07T10:00Z").unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-02-07T10:00:00Z");
    }

    #[test]
    fn test_permissive_accepts_minute_precision_offset() {
        let dt = parse_permissive_date("2026-02-07T10:00+05:30").unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-02-07T04:30:00Z");
        let dt = parse_permissive_date("2026-02-07T10:00-04:00").unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-02-07T14:00:00Z");
    }

    #[test]
    fn test_permissive_accepts_month_name_without_comma() {
        for s in ["Feb 7 2026", "February 7 2026", "Feb 07 2026"] {
            let dt = parse_permissive_date(s).unwrap_or_else(|| panic!("{s} rejected"));
            assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-02-07T00:00:00Z");
        }
        assert!(parse_permissive_date("Feb 7, 2026").is_some());
        assert!(parse_permissive_date("Feb 30 2026").is_none());
    }

    #[test]
    fn test_permissive_accepts_rfc2822() {
        assert!(parse_permissive_date("Sat, 07 Feb 2026 10:00:00 +0000").is_some());
    }

    #[test]
    fn test_permissive_accepts_reduced_forms() {
        assert!(parse_permissive_date("2026-02").is_some());
        assert!(parse_permissive_date("2026").is_some());
        assert!(parse_permissive_date("  2026-02-07  ").is_some());
    }

    #[test]
    fn test_permissive_rejects_garbage() {
        assert!(parse_permissive_date("not-a-date").is_none());
        assert!(parse_permissive_date("").is_none());
        assert!(parse_permissive_date("2026-13").is_none());
        assert!(parse_permissive_date("2026-02-30").is_none());
        assert!(parse_permissive_date("yesterday").is_none());
    }

    // ---- Timestamp ----

    #[test]
    fn test_now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_now_matches_strict_pattern() {
        assert!(is_iso8601_timestamp(&Timestamp::now().to_iso8601()));
    }

    #[test]
    fn test_display_matches_to_iso8601() {
        let ts = Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 2, 7, 10, 0, 0).unwrap());
        assert_eq!(ts.to_string(), "2026-02-07T10:00:00Z");
        assert!(is_iso8601_timestamp(&ts.to_string()));
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 2, 7, 10, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.to_iso8601(), "2026-02-07T10:30:45Z");
    }
}
