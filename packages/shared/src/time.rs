use chrono::{DateTime, FixedOffset, Utc};

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap() // JST is UTC+9
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in JST.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .with_timezone(&jst())
        .to_rfc3339()
}
