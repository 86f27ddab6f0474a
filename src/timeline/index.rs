use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::foundation::error::{HemicycleError, HemicycleResult};

/// Milliseconds in a Julian year (365.25 days).
pub const MS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;

/// Years added after "today" so an ongoing legislature keeps a visible height.
pub const NOW_PADDING_YEARS: f64 = 2.0;

/// Sentinel used in `end` fields for an unterminated legislature.
pub const NOW_SENTINEL: &str = "now";

/// Reference instant used to resolve the `"now"` sentinel.
///
/// Passed explicitly so that two layouts computed from the same inputs are bit-identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineClock {
    /// Instant standing for "today".
    pub now: DateTime<Utc>,
}

impl TimelineClock {
    /// Capture the system clock once.
    pub fn system() -> Self {
        Self { now: Utc::now() }
    }

    /// Clock pinned to midnight UTC of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

/// A parsed `begin`/`end` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeMarker {
    /// A concrete instant.
    At(DateTime<Utc>),
    /// The open-ended `"now"` sentinel.
    Now,
}

impl TimeMarker {
    /// Parse an ISO-8601 date (or date-time) or the `"now"` sentinel.
    ///
    /// Dates without an offset are read as UTC.
    pub fn parse(raw: &str) -> HemicycleResult<Self> {
        let s = raw.trim();
        if s.eq_ignore_ascii_case(NOW_SENTINEL) {
            return Ok(Self::Now);
        }
        parse_instant(s)
            .map(Self::At)
            .ok_or_else(|| HemicycleError::validation(format!("unparsable date \"{raw}\"")))
    }

    /// Whether this is the `"now"` sentinel.
    pub fn is_now(self) -> bool {
        matches!(self, Self::Now)
    }

    /// Calendar year of a concrete date; `None` for `"now"`.
    pub fn calendar_year(self) -> Option<i32> {
        match self {
            Self::At(t) => Some(t.year()),
            Self::Now => None,
        }
    }

    /// Year coordinate of this marker.
    pub fn coordinate(self, clock: &TimelineClock) -> f64 {
        match self {
            Self::At(t) => epoch_ms_to_coordinate(t.timestamp_millis()),
            Self::Now => epoch_ms_to_coordinate(clock.now.timestamp_millis()) + NOW_PADDING_YEARS,
        }
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc());
        }
    }
    let (year, month) = match s.len() {
        4 => (s, "01"),
        7 if s.as_bytes()[4] == b'-' => (&s[..4], &s[5..]),
        _ => return None,
    };
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{year}-{month}-01"), "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Convert Unix epoch milliseconds to a year coordinate.
pub fn epoch_ms_to_coordinate(ms: i64) -> f64 {
    (ms as f64) / MS_PER_YEAR + 1970.0
}

/// Year coordinate of a raw `begin`/`end` value.
pub fn year_coordinate(raw: &str, clock: &TimelineClock) -> HemicycleResult<f64> {
    Ok(TimeMarker::parse(raw)?.coordinate(clock))
}

/// Vertical pixel position of a coordinate relative to the timeline origin.
pub fn pixel_y(coordinate: f64, origin: f64, row_height: f64) -> f64 {
    (coordinate - origin) * row_height
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/index.rs"]
mod tests;
