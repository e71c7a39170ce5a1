use chrono::{Datelike, NaiveDate};

/// Weekly bucket key "{year}-W{week:02}" using the day-of-year/7
/// ceiling. This is deliberately not ISO-8601 week numbering and must
/// stay that way for output compatibility.
pub fn week_key(date: &str) -> Option<String> {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let week = (d.ordinal() + 6) / 7;
    Some(format!("{}-W{:02}", d.year(), week))
}

/// Monthly bucket key "YYYY-MM".
pub fn month_key(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}

/// Whole days from `since` to `until`, both ends inclusive.
/// None if either date fails to parse.
pub fn diff_days_inclusive(since: &str, until: &str) -> Option<i64> {
    let s = NaiveDate::parse_from_str(since, "%Y-%m-%d").ok()?;
    let u = NaiveDate::parse_from_str(until, "%Y-%m-%d").ok()?;
    Some(u.signed_duration_since(s).num_days() + 1)
}

/// Today's local calendar date as "YYYY-MM-DD".
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
