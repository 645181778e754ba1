//! Interval fields written as human-readable strings.
//!
//! The kernel's intervals (supervisor tick, restart delay) are short by
//! nature, so accepted units stop at minutes: `"250ms"`, `"10s"`, `"5m"`.
//! A bare number is taken as seconds.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;

/// Parse an interval like `"250ms"`, `"10s"`, or `"5m"`.
pub fn parse_duration(text: &str) -> std::result::Result<Duration, String> {
    let text = text.trim();
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    let (value, unit) = text.split_at(digits);

    let value: u64 = value
        .parse()
        .map_err(|_| format!("invalid interval: {:?}", text))?;
    let unit_millis = match unit {
        "ms" => 1,
        "" | "s" => MILLIS_PER_SECOND,
        "m" => MILLIS_PER_MINUTE,
        _ => {
            return Err(format!(
                "unsupported interval unit {:?} (expected ms, s, or m)",
                unit
            ))
        }
    };

    value
        .checked_mul(unit_millis)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("interval out of range: {}", text))
}

/// Render an interval with the coarsest unit that divides it evenly.
pub fn format_duration(duration: &Duration) -> String {
    let millis = duration.as_millis() as u64;
    if millis == 0 {
        "0s".to_string()
    } else if millis % MILLIS_PER_MINUTE == 0 {
        format!("{}m", millis / MILLIS_PER_MINUTE)
    } else if millis % MILLIS_PER_SECOND == 0 {
        format!("{}s", millis / MILLIS_PER_SECOND)
    } else {
        format!("{}ms", millis)
    }
}

/// Serde adapter: read an interval field from its string form.
pub fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_duration(&text).map_err(serde::de::Error::custom)
}

/// Serde adapter: write an interval field back out as a string.
pub fn serialize_duration<S>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(duration))
}
