//! Cutoff resolution: turn `--since` text into an absolute instant.
//!
//! Accepted forms, tried in order:
//!
//! - RFC 3339 instant: `2024-05-01T12:00:00Z`
//! - Date: `2024-05-01` (start of that local day)
//! - Local datetime: `2024-05-01T12:00`
//! - Keywords: `now`, `today`, `yesterday`
//! - Relative span: `7 days ago`, `2w`, `3 hours ago`
//!
//! Anything naming a whole day rather than a time of day snaps to the
//! start of that day in the local time zone.

use jiff::civil::{Date, DateTime};
use jiff::{Span, Timestamp, Zoned};

/// The cutoff used when none is given.
pub const DEFAULT_SINCE: &str = "7 days ago";

#[derive(Debug, thiserror::Error)]
pub enum CutoffError {
    #[error(
        "unrecognized --since value {0:?}: expected a date (2024-05-01), \
         a timestamp (2024-05-01T12:00:00Z), `today`, `yesterday`, \
         or a span like `7 days ago`"
    )]
    Unrecognized(String),

    #[error("--since {input:?} is out of range: {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: jiff::Error,
    },
}

/// Resolve `input` relative to `now`, whose time zone is the local one.
pub fn resolve_since(input: &str, now: &Zoned) -> Result<Timestamp, CutoffError> {
    let input = input.trim();
    let out_of_range = |source| CutoffError::OutOfRange {
        input: input.to_string(),
        source,
    };

    if let Ok(ts) = input.parse::<Timestamp>() {
        return Ok(ts);
    }

    // A bare date also parses as a datetime at midnight; only an explicit
    // time part pins the cutoff to that time of day.
    if let Ok(datetime) = input.parse::<DateTime>() {
        if !input.contains(['T', 't', ' ']) {
            return start_of(datetime.date(), now).map_err(out_of_range);
        }
        return datetime
            .to_zoned(now.time_zone().clone())
            .map(|z| z.timestamp())
            .map_err(out_of_range);
    }

    match input.to_ascii_lowercase().as_str() {
        "now" => return Ok(now.timestamp()),
        "today" => return start_of(now.date(), now).map_err(out_of_range),
        "yesterday" => {
            let date = now.date().yesterday().map_err(out_of_range)?;
            return start_of(date, now).map_err(out_of_range);
        }
        _ => {}
    }

    let Ok(span) = input.parse::<Span>() else {
        return Err(CutoffError::Unrecognized(input.to_string()));
    };

    // A bare span still means "that long ago".
    let back = if span.is_positive() { span.negate() } else { span };
    let then = now.checked_add(back).map_err(out_of_range)?;

    if has_time_of_day(back) {
        Ok(then.timestamp())
    } else {
        start_of(then.date(), now).map_err(out_of_range)
    }
}

/// Whether a span has any unit smaller than a day.
fn has_time_of_day(span: Span) -> bool {
    span.get_hours() != 0
        || span.get_minutes() != 0
        || span.get_seconds() != 0
        || span.get_milliseconds() != 0
        || span.get_microseconds() != 0
        || span.get_nanoseconds() != 0
}

fn start_of(date: Date, now: &Zoned) -> Result<Timestamp, jiff::Error> {
    let zoned = date.to_zoned(now.time_zone().clone())?;
    Ok(zoned.start_of_day()?.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::tz::{self, TimeZone};

    /// Friday 2024-03-15 14:30 in UTC-5.
    fn now() -> Zoned {
        "2024-03-15T19:30:00Z"
            .parse::<Timestamp>()
            .unwrap()
            .to_zoned(TimeZone::fixed(tz::offset(-5)))
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn rfc3339_is_used_verbatim() {
        let got = resolve_since("2024-03-01T08:15:00+01:00", &now()).unwrap();
        assert_eq!(got, ts("2024-03-01T07:15:00Z"));
    }

    #[test]
    fn date_snaps_to_local_midnight() {
        let got = resolve_since("2024-03-10", &now()).unwrap();
        assert_eq!(got, ts("2024-03-10T05:00:00Z"));
    }

    #[test]
    fn local_datetime_uses_local_zone() {
        let got = resolve_since("2024-03-10T09:00", &now()).unwrap();
        assert_eq!(got, ts("2024-03-10T14:00:00Z"));
    }

    #[test]
    fn keywords() {
        assert_eq!(resolve_since("now", &now()).unwrap(), now().timestamp());
        assert_eq!(
            resolve_since("today", &now()).unwrap(),
            ts("2024-03-15T05:00:00Z")
        );
        assert_eq!(
            resolve_since("Yesterday", &now()).unwrap(),
            ts("2024-03-14T05:00:00Z")
        );
    }

    #[test]
    fn default_is_start_of_day_a_week_back() {
        let got = resolve_since(DEFAULT_SINCE, &now()).unwrap();
        assert_eq!(got, ts("2024-03-08T05:00:00Z"));
    }

    #[test]
    fn span_without_ago_still_looks_back() {
        let with_ago = resolve_since("2 weeks ago", &now()).unwrap();
        let without = resolve_since("2w", &now()).unwrap();
        assert_eq!(with_ago, without);
        assert_eq!(without, ts("2024-03-01T05:00:00Z"));
    }

    #[test]
    fn span_with_hours_keeps_time_of_day() {
        let got = resolve_since("3 hours ago", &now()).unwrap();
        assert_eq!(got, ts("2024-03-15T16:30:00Z"));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = resolve_since("last tuesday-ish", &now()).unwrap_err();
        assert!(matches!(err, CutoffError::Unrecognized(s) if s == "last tuesday-ish"));
    }
}
