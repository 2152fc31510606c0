// src/timefmt.rs
//! Timestamp helpers: tolerant parsing of `publishedAt`, card dates, and
//! "distance to now" phrases for the dashboard header.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Parse an item timestamp. Accepts RFC 3339, RFC 2822, naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and bare dates (UTC midnight).
/// Returns `None` for anything else; callers decide the fallback.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
    }
    None
}

/// Card date (`02 May 2024`). Falls back to the raw string when unparsable.
pub fn format_card_date(raw: &str) -> String {
    match parse_published(raw) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Relative description of a raw timestamp ("3 days ago"), or the raw string
/// when it cannot be parsed.
pub fn describe_relative(raw: &str, now: DateTime<Utc>) -> String {
    match parse_published(raw) {
        Some(dt) => format_distance_to_now(dt, now),
        None => raw.to_string(),
    }
}

/// Human distance between `then` and `now` with an `ago` / `in` suffix.
pub fn format_distance_to_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (earlier, later, past) = if then <= now {
        (then, now, true)
    } else {
        (now, then, false)
    };

    let seconds = (later - earlier).num_milliseconds() as f64 / 1_000.0;
    let minutes = (seconds / 60.0).round() as i64;

    let phrase = if minutes < 2 {
        if minutes < 1 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        }
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        let hours = round_div(minutes, 60);
        format!("about {hours} hours")
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        let days = round_div(minutes, MINUTES_IN_DAY);
        format!("{days} days")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        let months = round_div(minutes, MINUTES_IN_MONTH);
        format!("about {}", plural(months, "month"))
    } else {
        let months = months_between(earlier, later);
        if months < 12 {
            let nearest = round_div(minutes, MINUTES_IN_MONTH);
            plural(nearest, "month")
        } else {
            let rem = months % 12;
            let years = months / 12;
            if rem < 3 {
                format!("about {}", plural(years, "year"))
            } else if rem < 9 {
                format!("over {}", plural(years, "year"))
            } else {
                format!("almost {}", plural(years + 1, "year"))
            }
        }
    };

    if past {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

fn round_div(n: i64, d: i64) -> i64 {
    (n as f64 / d as f64).round() as i64
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Whole calendar months from `earlier` to `later`; an unfinished last month
/// does not count.
fn months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    if (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_common_shapes() {
        assert!(parse_published("2024-05-02T10:00:00Z").is_some());
        assert!(parse_published("2024-05-02T10:00:00.123+02:00").is_some());
        assert!(parse_published("Thu, 02 May 2024 10:00:00 GMT").is_some());
        assert!(parse_published("2024-05-02T10:00:00").is_some());
        assert_eq!(
            parse_published("2024-05-02"),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
        );
        assert!(parse_published("last tuesday").is_none());
        assert!(parse_published("   ").is_none());
    }

    #[test]
    fn card_date_format_and_fallback() {
        assert_eq!(format_card_date("2024-05-02T10:00:00Z"), "02 May 2024");
        assert_eq!(format_card_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn distance_short_ranges() {
        let n = now();
        assert_eq!(
            format_distance_to_now(n - Duration::seconds(20), n),
            "less than a minute ago"
        );
        assert_eq!(format_distance_to_now(n - Duration::seconds(70), n), "1 minute ago");
        assert_eq!(format_distance_to_now(n - Duration::minutes(10), n), "10 minutes ago");
        assert_eq!(format_distance_to_now(n - Duration::minutes(60), n), "about 1 hour ago");
        assert_eq!(format_distance_to_now(n - Duration::hours(5), n), "about 5 hours ago");
    }

    #[test]
    fn distance_days_and_months() {
        let n = now();
        assert_eq!(format_distance_to_now(n - Duration::hours(30), n), "1 day ago");
        assert_eq!(format_distance_to_now(n - Duration::days(2), n), "2 days ago");
        assert_eq!(format_distance_to_now(n - Duration::days(40), n), "about 1 month ago");
        assert_eq!(format_distance_to_now(n - Duration::days(55), n), "about 2 months ago");
        assert_eq!(format_distance_to_now(n - Duration::days(150), n), "5 months ago");
    }

    #[test]
    fn distance_years() {
        let n = now();
        let one_year = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_distance_to_now(one_year, n), "about 1 year ago");
        let over = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_distance_to_now(over, n), "over 1 year ago");
        let almost = Utc.with_ymd_and_hms(2022, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(format_distance_to_now(almost, n), "almost 2 years ago");
    }

    #[test]
    fn future_gets_in_prefix() {
        let n = now();
        assert_eq!(format_distance_to_now(n + Duration::days(3), n), "in 3 days");
    }

    #[test]
    fn describe_relative_falls_back_to_raw() {
        assert_eq!(describe_relative("garbage", now()), "garbage");
        assert_eq!(describe_relative("2024-06-13T12:00:00Z", now()), "2 days ago");
    }
}
