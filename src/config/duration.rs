//! Startup timeout parsing.

use std::time::Duration;

use anyhow::Context;

/// Parses a timeout such as `"600"`, `"300s"`, `"10m"` or `"1h"`. A bare
/// number is taken as seconds.
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (digits, unit, seconds_per_unit) = if let Some(n) = s.strip_suffix('h') {
        (n, "hours", 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, "minutes", 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, "seconds", 1)
    } else {
        (s, "seconds", 1)
    };

    let value: u64 = digits
        .parse()
        .with_context(|| format!("Invalid {unit} value in duration '{s}'"))?;
    let secs = value
        .checked_mul(seconds_per_unit)
        .with_context(|| format!("Duration '{s}' is too large"))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("300s").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration(" 1h ").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_duration_errors() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-5").is_err());
        assert!(parse_duration("tenm").is_err());
        assert!(parse_duration("5d").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_an_error() {
        let err = parse_duration("10000000000000000h").unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(parse_duration("400000000000000000m").is_err());

        let max = u64::MAX.to_string();
        assert_eq!(parse_duration(&max).unwrap(), Duration::from_secs(u64::MAX));
    }
}
