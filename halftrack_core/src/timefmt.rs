//! Parsing and formatting of race times and paces.

/// Parse `M:SS` or `H:MM:SS` into seconds.
///
/// Blank input, non-numeric parts and any other number of separators
/// yield `None` rather than an error.
pub fn parse_time_secs(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts = trimmed
        .split(':')
        .map(|p| p.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [m, s] => Some(m * 60 + s),
        [h, m, s] => Some(h * 3600 + m * 60 + s),
        _ => None,
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` past an hour
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--".into();
    }
    let total = seconds.round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Format a pace in seconds per mile as `M:SS/mi`
pub fn format_pace(seconds_per_mile: Option<f64>) -> String {
    match seconds_per_mile {
        Some(p) if p.is_finite() && p > 0.0 => {
            let total = p.round() as u64;
            format!("{}:{:02}/mi", total / 60, total % 60)
        }
        _ => "--".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_time_secs("5:30"), Some(330));
        assert_eq!(parse_time_secs("05:04"), Some(304));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_time_secs("1:05:30"), Some(3930));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_time_secs(""), None);
        assert_eq!(parse_time_secs("   "), None);
        assert_eq!(parse_time_secs("abc"), None);
        assert_eq!(parse_time_secs("5:xx"), None);
        assert_eq!(parse_time_secs("330"), None);
        assert_eq!(parse_time_secs("1:2:3:4"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(330.0), "5:30");
        assert_eq!(format_duration(60.0), "1:00");
        assert_eq!(format_duration(3930.0), "1:05:30");
        assert_eq!(format_duration(330.7), "5:31");
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(Some(330.0)), "5:30/mi");
        assert_eq!(format_pace(Some(600.0)), "10:00/mi");
        assert_eq!(format_pace(Some(0.0)), "--");
        assert_eq!(format_pace(None), "--");
    }
}
