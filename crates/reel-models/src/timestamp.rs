//! Timestamp parsing utilities.
//!
//! Highlight text quotes positions as `H:MM:SS`, `MM:SS`, bare seconds,
//! or a seconds value with an `s` suffix (`"12.5s"`).

/// Parse a timestamp string to total seconds.
///
/// Supports formats:
/// - `<seconds>s` (e.g. `45.5s`)
/// - `H:MM:SS` or `H:MM:SS.mmm`
/// - `MM:SS` or `MM:SS.mmm`
/// - `SS` or `SS.mmm`
///
/// # Examples
/// ```
/// use reel_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("1:02:03").unwrap(), 3723.0);
/// assert_eq!(parse_timestamp("02:15").unwrap(), 135.0);
/// assert_eq!(parse_timestamp("45.5s").unwrap(), 45.5);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Some(stripped) = ts.strip_suffix('s') {
        let seconds: f64 = stripped
            .trim()
            .parse()
            .map_err(|_| TimestampError::InvalidValue("seconds", stripped.to_string()))?;
        if seconds < 0.0 {
            return Err(TimestampError::Negative);
        }
        return Ok(seconds);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    match parts.len() {
        1 => {
            let seconds: f64 = parts[0]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("seconds", parts[0].to_string()))?;
            if seconds < 0.0 {
                return Err(TimestampError::Negative);
            }
            Ok(seconds)
        }
        2 => {
            let minutes: f64 = parts[0]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("minutes", parts[0].to_string()))?;
            let seconds: f64 = parts[1]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("seconds", parts[1].to_string()))?;
            if minutes < 0.0 || seconds < 0.0 {
                return Err(TimestampError::Negative);
            }
            Ok(minutes * 60.0 + seconds)
        }
        3 => {
            let hours: f64 = parts[0]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("hours", parts[0].to_string()))?;
            let minutes: f64 = parts[1]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("minutes", parts[1].to_string()))?;
            let seconds: f64 = parts[2]
                .parse()
                .map_err(|_| TimestampError::InvalidValue("seconds", parts[2].to_string()))?;
            if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
                return Err(TimestampError::Negative);
            }
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(TimestampError::InvalidFormat(ts.to_string())),
    }
}

/// Parse a timestamp, treating any malformed token as `0.0`.
///
/// Highlight text comes from a language model and is not guaranteed to be
/// well-formed. The segment extractor keeps the historical behavior of
/// substituting zero for unparseable tokens; the resulting window almost
/// always dies on the start/end ordering check. Callers that need the
/// failure surfaced should use [`parse_timestamp`] instead.
pub fn parse_timestamp_or_zero(ts: &str) -> f64 {
    parse_timestamp(ts).unwrap_or(0.0)
}

/// Format seconds as `MM:SS` with total minutes (e.g. `125:07` for long
/// sources). Used when quoting the media duration in prompts and
/// notifications.
pub fn format_mm_ss(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let minutes = (total_secs / 60.0).floor() as u64;
    let seconds = (total_secs % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampError {
    /// Timestamp string is empty
    Empty,
    /// Timestamp contains negative values
    Negative,
    /// Invalid numeric value for a component
    InvalidValue(&'static str, String),
    /// Invalid timestamp format
    InvalidFormat(String),
}

impl std::fmt::Display for TimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Timestamp cannot be empty"),
            Self::Negative => write!(f, "Timestamp cannot be negative"),
            Self::InvalidValue(component, value) => {
                write!(f, "Invalid {} value: {}", component, value)
            }
            Self::InvalidFormat(ts) => write!(
                f,
                "Invalid timestamp format '{}'. Use H:MM:SS, MM:SS, seconds, or '<seconds>s'",
                ts
            ),
        }
    }
}

impl std::error::Error for TimestampError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_h_mm_ss() {
        assert_eq!(parse_timestamp("1:02:03").unwrap(), 3723.0);
        assert_eq!(parse_timestamp("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("01:30:45").unwrap(), 5445.0);
    }

    #[test]
    fn test_parse_timestamp_mm_ss() {
        assert_eq!(parse_timestamp("02:15").unwrap(), 135.0);
        assert_eq!(parse_timestamp("53:53").unwrap(), 3233.0);
    }

    #[test]
    fn test_parse_timestamp_bare_seconds() {
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_timestamp("12.25").unwrap(), 12.25);
    }

    #[test]
    fn test_parse_timestamp_seconds_suffix() {
        assert_eq!(parse_timestamp("45.5s").unwrap(), 45.5);
        assert_eq!(parse_timestamp("12s").unwrap(), 12.0);
        assert_eq!(parse_timestamp(" 7s ").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_timestamp_with_milliseconds() {
        let result = parse_timestamp("00:00:30.500").unwrap();
        assert!((result - 30.5).abs() < 0.001);
    }

    #[test]
    fn test_parse_timestamp_errors() {
        assert!(matches!(parse_timestamp(""), Err(TimestampError::Empty)));
        assert!(matches!(parse_timestamp("  "), Err(TimestampError::Empty)));
        assert!(matches!(
            parse_timestamp("abc"),
            Err(TimestampError::InvalidValue(_, _))
        ));
        assert!(matches!(
            parse_timestamp("abcs"),
            Err(TimestampError::InvalidValue(_, _))
        ));
        assert!(matches!(
            parse_timestamp("1:2:3:4"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(parse_timestamp("-5"), Err(TimestampError::Negative)));
    }

    #[test]
    fn test_parse_timestamp_or_zero() {
        assert_eq!(parse_timestamp_or_zero("abc"), 0.0);
        assert_eq!(parse_timestamp_or_zero(""), 0.0);
        assert_eq!(parse_timestamp_or_zero("-5"), 0.0);
        assert_eq!(parse_timestamp_or_zero("02:15"), 135.0);
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0.0), "00:00");
        assert_eq!(format_mm_ss(135.0), "02:15");
        assert_eq!(format_mm_ss(7507.9), "125:07");
    }
}
