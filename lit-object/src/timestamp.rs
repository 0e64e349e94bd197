use chrono::{TimeZone, Utc};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(raw_time: u64) -> String {
    Utc.timestamp_opt(raw_time as i64, 0)
        .single()
        .expect("raw_time within representable range")
        .format(FORMAT)
        .to_string()
}
