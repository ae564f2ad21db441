/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Day key for a calendar date (`YYYY-MM-DD`).
///
/// Day keys partition the visitor log; the core treats them as opaque
/// strings and never parses them back.
pub fn day_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's day key in venue-local time.
pub fn today_key() -> String {
    day_key(chrono::Local::now().date_naive())
}

/// Wall-clock arrival time (`HH:MM`), captured once when a record is
/// created.
pub fn arrival_time_now() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_is_iso_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(day_key(date), "2025-03-07");
    }

    #[test]
    fn arrival_time_is_hh_mm() {
        let time = arrival_time_now();
        assert_eq!(time.len(), 5);
        assert_eq!(time.as_bytes()[2], b':');
    }
}
