//! Display strings for byte counts, upload timestamps and MIME types.

use chrono::{DateTime, NaiveDateTime};

const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// `0` is `"0 Bytes"`; otherwise the largest unit with a quotient of at least 1,
/// rounded to two fractional digits with trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{} {}", trim_fraction(format!("{:.2}", size)), UNITS[unit_index])
}

fn trim_fraction(mut number: String) -> String {
    if number.contains('.') {
        while number.ends_with('0') {
            number.pop();
        }
        if number.ends_with('.') {
            number.pop();
        }
    }
    number
}

/// Short type label for a MIME type.
pub fn file_type_label(mime: Option<&str>) -> String {
    let mime = match mime {
        Some(m) if !m.is_empty() => m,
        _ => return "Unknown".to_string(),
    };

    if let Some(subtype) = mime.strip_prefix("image/") {
        subtype.to_uppercase()
    } else if mime == "application/pdf" {
        "PDF".to_string()
    } else if mime.contains("word") {
        "Word".to_string()
    } else if mime.contains("excel") || mime.contains("spreadsheet") {
        "Excel".to_string()
    } else if mime.contains("presentation") {
        "PowerPoint".to_string()
    } else if let Some(subtype) = mime.strip_prefix("text/") {
        subtype.to_uppercase()
    } else {
        mime.rsplit('/').next().unwrap_or(mime).to_uppercase()
    }
}

/// Upload timestamp as a locale-style string, e.g. `1/1/2024, 12:00:00 AM`.
///
/// Offsets are kept as sent. Timestamps without an offset are shown as is, and
/// anything unparseable is returned verbatim.
pub fn format_date(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return String::new();
    }

    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.naive_local())
        .or_else(|_| timestamp.parse::<NaiveDateTime>());

    match parsed {
        Ok(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
