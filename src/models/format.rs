use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats an API timestamp as "Fri, Aug 22, 2025". Unparseable input is returned as is.
pub fn display_date(raw: &str) -> String {
    const FORMAT: &str = "%a, %b %-d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(FORMAT).to_string();
        }
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
