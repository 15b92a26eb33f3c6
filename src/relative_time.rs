use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

pub const MISSING_TIMESTAMP: &str = "--";

/// Label for the "Created On" column, relative to `now`.
///
/// Elapsed minutes, hours and days are whole units truncated toward zero.
/// Anything two or more days old is shown as a long local date.
pub fn relative_label(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    relative_label_in(created, now, &Local)
}

pub fn relative_label_in<Tz>(created: Option<DateTime<Utc>>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(created) = created else {
        return MISSING_TIMESTAMP.to_string();
    };

    let elapsed = now - created;
    let diff_minutes = elapsed.num_minutes();
    let diff_days = elapsed.num_days();

    if diff_minutes < 60 {
        if diff_minutes <= 1 {
            "a min ago".to_string()
        } else {
            format!("{diff_minutes} min ago")
        }
    } else if diff_days < 1 {
        let diff_hours = elapsed.num_hours();
        if diff_hours <= 1 {
            "1 hour ago".to_string()
        } else {
            format!("{diff_hours} hours ago")
        }
    } else if diff_days < 2 {
        if diff_days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{diff_days} days ago")
        }
    } else {
        long_date_in(created, tz)
    }
}

/// Local calendar date, e.g. "June 3, 2024".
pub fn long_date(created: DateTime<Utc>) -> String {
    long_date_in(created, &Local)
}

fn long_date_in<Tz>(created: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created.with_timezone(tz).format("%B %-d, %Y").to_string()
}
