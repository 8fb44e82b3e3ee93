//! Duration parsing and formatting for the command line and the display.

use std::time::Duration;

use crate::error::{Error, Result};

const FORMAT_HINT: &str = "Use formats like: 25m, 30s, 1m30s, 1h";

/// Parse a duration like `25m`, `30s`, `1m30s` or `1h`.
///
/// A bare number is read as minutes.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim().to_lowercase();

    if let Ok(minutes) = input.parse::<u64>() {
        return minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(too_long);
    }

    let mut total_seconds = 0u64;
    let mut current_number = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            current_number.push(ch);
        } else if matches!(ch, 'h' | 'm' | 's') {
            if current_number.is_empty() {
                return Err(Error::InvalidDuration(format!(
                    "Invalid duration format. {FORMAT_HINT}"
                )));
            }

            let number: u64 = current_number
                .parse()
                .map_err(|_| Error::InvalidDuration("Invalid number in duration".to_string()))?;

            let unit = match ch {
                'h' => 3600,
                'm' => 60,
                _ => 1,
            };
            total_seconds = number
                .checked_mul(unit)
                .and_then(|seconds| total_seconds.checked_add(seconds))
                .ok_or_else(too_long)?;

            current_number.clear();
        } else if !ch.is_whitespace() {
            return Err(Error::InvalidDuration(format!(
                "Invalid character in duration. {FORMAT_HINT}"
            )));
        }
    }

    if !current_number.is_empty() {
        return Err(Error::InvalidDuration(
            "Duration must end with 'h', 'm' or 's'".to_string(),
        ));
    }

    if input.is_empty() {
        return Err(Error::InvalidDuration(format!("Empty duration. {FORMAT_HINT}")));
    }

    Ok(Duration::from_secs(total_seconds))
}

fn too_long() -> Error {
    Error::InvalidDuration("Duration is too long".to_string())
}

/// Human readable form, e.g. `1 minute 30 seconds`.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;

    if minutes > 0 && remaining_seconds > 0 {
        format!(
            "{} minute{} {} second{}",
            minutes,
            plural(minutes),
            remaining_seconds,
            plural(remaining_seconds)
        )
    } else if minutes > 0 {
        format!("{} minute{}", minutes, plural(minutes))
    } else {
        format!("{} second{}", remaining_seconds, plural(remaining_seconds))
    }
}

/// Clock face form, `MM:SS`. Partial seconds round up so a running
/// countdown shows `00:01` until it actually reaches zero.
pub fn format_clock(duration: Duration) -> String {
    let mut seconds = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        seconds = seconds.saturating_add(1);
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_minutes() {
        assert_eq!(parse_duration("25").unwrap(), Duration::from_secs(1500));
    }

    #[test]
    fn parses_mixed_units() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1h 5m").unwrap(), Duration::from_secs(3900));
        assert_eq!(parse_duration(" 45S ").unwrap(), Duration::from_secs(45));
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("1m30").is_err());
    }

    #[test]
    fn rejects_overflowing_durations() {
        assert!(parse_duration("307445734561825861").is_err());
        assert!(parse_duration("18446744073709551615s1s").is_err());
        assert!(parse_duration("5124095576030432h").is_err());
    }

    #[test]
    fn formats_human_readable() {
        assert_eq!(format_duration(Duration::from_secs(1)), "1 second");
        assert_eq!(format_duration(Duration::from_secs(60)), "1 minute");
        assert_eq!(format_duration(Duration::from_secs(150)), "2 minutes 30 seconds");
    }

    #[test]
    fn clock_rounds_partial_seconds_up() {
        assert_eq!(format_clock(Duration::from_secs(1500)), "25:00");
        assert_eq!(format_clock(Duration::from_millis(400)), "00:01");
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }
}
