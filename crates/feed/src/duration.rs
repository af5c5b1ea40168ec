// ABOUTME: Episode duration formatting for itunes:duration and its inverse.
// ABOUTME: Renders whole seconds as H:MM:SS and parses H:MM:SS, MM:SS, or plain seconds back.

/// Formats whole seconds as `H:MM:SS`.
///
/// Hours are not padded and have no upper bound; minutes and seconds are
/// always two digits.
pub fn format_hmmss(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let remainder = total_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parses a duration string into whole seconds.
/// Supports:
/// - Plain integers (seconds)
/// - H:MM:SS format
/// - MM:SS format
/// Returns None for anything else, including minute or second fields >= 60.
pub fn parse_hmmss(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }

    if s.contains(':') {
        return parse_colon_format(s);
    }

    None
}

fn parse_colon_format(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.split(':').collect();

    match parts.len() {
        2 => {
            // MM:SS
            let mins: u64 = parts[0].parse().ok()?;
            let secs = sexagesimal(parts[1])?;
            mins.checked_mul(60)?.checked_add(secs)
        }
        3 => {
            // H:MM:SS
            let hours: u64 = parts[0].parse().ok()?;
            let mins = sexagesimal(parts[1])?;
            let secs = sexagesimal(parts[2])?;
            hours.checked_mul(3600)?.checked_add(mins * 60 + secs)
        }
        _ => None,
    }
}

fn sexagesimal(part: &str) -> Option<u64> {
    let value: u64 = part.parse().ok()?;
    (value < 60).then_some(value)
}
