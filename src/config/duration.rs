//! Duration literals
//!
//! A duration is a non-negative integer followed by a single unit character:
//! `30s`, `15m`, `1h`, `30d` or `1y`. Composite literals like `1h30m` are
//! rejected.

use chrono::Duration;

use crate::error::DurationError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Seconds in one `unit`, or `None` for an unknown unit.
fn unit_seconds(unit: char) -> Option<i64> {
    match unit {
        's' => Some(1),
        'm' => Some(SECONDS_PER_MINUTE),
        'h' => Some(SECONDS_PER_HOUR),
        'd' => Some(SECONDS_PER_DAY),
        'y' => Some(SECONDS_PER_YEAR),
        _ => None,
    }
}

/// Parse a duration literal such as `30d`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut chars = input.chars();
    let unit = match chars.next_back() {
        Some(unit) if !chars.as_str().is_empty() => unit,
        _ => return Err(DurationError::TooShort),
    };
    let number = chars.as_str();

    let unit_size = unit_seconds(unit).ok_or(DurationError::UnknownUnit)?;

    let value: i64 = number
        .parse()
        .map_err(|source| DurationError::InvalidNumber {
            value: number.to_string(),
            source,
        })?;

    if value < 0 {
        return Err(DurationError::Negative);
    }

    value
        .checked_mul(unit_size)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DurationError::OutOfRange(input.to_string()))
}
