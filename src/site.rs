use chrono::{Datelike, Utc};

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inline error banner, or an empty string when there is nothing to show.
pub fn error_block(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            "<div class=\"error-banner\"><p class=\"error-title\">Error</p><p>{}</p></div>",
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Current year for the page footers.
pub fn year() -> String {
    Utc::now().year().to_string()
}
