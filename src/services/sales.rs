use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;

const DEFAULT_WINDOW_DAYS: i64 = 6;
/// Longest window served, counted inclusively.
pub const MAX_WINDOW_DAYS: i64 = 366;

/// Inclusive reporting window in UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A `YYYY-MM-DD` date with room for the window arithmetic on either side.
fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .filter(|d| d.succ_opt().is_some())
        .filter(|d| d.checked_sub_signed(Duration::days(MAX_WINDOW_DAYS)).is_some())
}

impl SalesWindow {
    /// Both dates must parse as `YYYY-MM-DD`; otherwise the last seven days
    /// ending `today` are used. A start after the end snaps to the seven days
    /// ending at `end`, and a window longer than [`MAX_WINDOW_DAYS`] keeps
    /// only its most recent days.
    pub fn resolve(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Self {
        let parsed = match (start, end) {
            (Some(s), Some(e)) => parse_day(s).zip(parse_day(e)),
            _ => None,
        };
        let (mut start, end) = parsed.unwrap_or((today - Duration::days(DEFAULT_WINDOW_DAYS), today));
        if start > end {
            start = end - Duration::days(DEFAULT_WINDOW_DAYS);
        }
        let earliest = end - Duration::days(MAX_WINDOW_DAYS - 1);
        if start < earliest {
            start = earliest;
        }
        Self { start, end }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// `[start 00:00, end+1 00:00)` in UTC.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let to = self
            .end
            .succ_opt()
            .map_or_else(|| Utc.from_utc_datetime(&NaiveDateTime::MAX), day_start);
        (day_start(self.start), to)
    }
}

pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Buckets `(created_at, amount)` rows into one total per day of the window.
pub fn daily_totals(window: &SalesWindow, rows: &[(DateTime<Utc>, f64)]) -> Vec<(NaiveDate, f64)> {
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for (at, amount) in rows {
        *by_day.entry(at.date_naive()).or_default() += amount;
    }
    window
        .days()
        .map(|day| {
            let total = by_day.get(&day).copied().unwrap_or(0.0);
            (day, crate::services::pricing::round_money(total))
        })
        .collect()
}
