//! Formatting utilities used for CLI outputs.

/// Render a fee amount in cents as "12.50".
pub fn cents2readable(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

/// Render a "seats remaining / capacity" cell, e.g. "3/10".
pub fn seats_cell(seats: u32, capacity: u32) -> String {
    format!("{}/{}", seats, capacity)
}

/// Returns a textual description and an ANSI color for a category code.
/// Used by tests and human-readable listings.
pub fn describe_category(code: &str) -> (String, &'static str) {
    match code.to_lowercase().as_str() {
        "sports" => ("Sports".into(), "\x1b[32m"),
        "creative" => ("Creative".into(), "\x1b[35m"),
        "music" => ("Music".into(), "\x1b[36m"),
        "social" => ("Social".into(), "\x1b[33m"),
        "education" => ("Education".into(), "\x1b[34m"),
        "outdoor" => ("Outdoor".into(), "\x1b[92m"),
        other => (other.to_string(), "\x1b[0m"),
    }
}
