use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::reconcile::PollCursor;

// Parse a cursor seed like "1700000000", "2d", "YYYY-MM-DD", or RFC3339.
// Returns None if unparseable.
pub fn parse_from_date(s: &str) -> Option<PollCursor> {
    let s = s.trim();
    // plain Unix seconds, as the status API takes them
    if let Ok(secs) = s.parse::<i64>() {
        return (secs >= 0).then(|| PollCursor::from_unix(secs));
    }
    // "2d" -> now - 2 days
    if let Some(stripped) = s.strip_suffix('d') {
        if let Ok(days) = stripped.parse::<i64>() {
            if days > 0 {
                return Some(PollCursor::from_unix((Utc::now() - Duration::days(days)).timestamp()));
            }
        }
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = nd.and_hms_opt(0, 0, 0) {
            return Some(PollCursor::from_unix(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).timestamp()));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(PollCursor::from_unix(dt.timestamp()));
    }
    None
}

/// Cursor for a command: the `--from-date` seed if given, else now.
pub fn cursor_or_now(from_date: Option<&str>) -> anyhow::Result<PollCursor> {
    match from_date {
        None => Ok(PollCursor::now()),
        Some(s) => parse_from_date(s).ok_or_else(|| anyhow::anyhow!("unparseable --from-date: {s}")),
    }
}
