use chrono::{DateTime, TimeZone, Utc};

/// Current time from the browser clock
pub fn current_time() -> DateTime<Utc> {
    let millis = js_sys::Date::now() as i64;
    Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
}

