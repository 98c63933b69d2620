use chrono::{DateTime, Utc};

fn plural(count: i64, unit: &str) -> String {
    format!("{count} {unit}s")
}

/// Relative description of `then` as seen from `now`, e.g. "3 days ago".
pub fn humanize_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let (amount, future) = match seconds < 0 {
        true => (-seconds, true),
        false => (seconds, false),
    };

    let minutes = amount / 60;
    let hours = amount / 3600;
    let days = amount / 86400;
    let phrase = match amount {
        0..45 => return "just now".to_owned(),
        45..90 => "a minute".to_owned(),
        _ if minutes < 45 => plural(minutes, "minute"),
        _ if minutes < 90 => "an hour".to_owned(),
        _ if hours < 24 => plural(hours, "hour"),
        _ if hours < 48 => "a day".to_owned(),
        _ if days < 30 => plural(days, "day"),
        _ if days < 45 => "a month".to_owned(),
        _ if days < 365 => plural((days / 30).max(2), "month"),
        _ if days < 730 => "a year".to_owned(),
        _ => plural(days / 365, "year"),
    };
    match future {
        true => format!("in {phrase}"),
        false => format!("{phrase} ago"),
    }
}
