//! Human-readable rendering of delta-seconds values.

use std::fmt;

const UNITS: [(i64, &str); 4] = [(86_400, "day"), (3_600, "hour"), (60, "minute"), (1, "second")];

/// Display wrapper that renders a number of seconds as prose.
///
/// Only non-zero components are printed, largest first:
///
/// ```
/// use cachectl::HumanDuration;
///
/// assert_eq!(HumanDuration(3661).to_string(), "1 hour, 1 minute, 1 second");
/// assert_eq!(HumanDuration(0).to_string(), "0 seconds");
/// assert_eq!(HumanDuration(-5).to_string(), "invalid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub i64);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut remainder = self.0;
        if remainder < 0 {
            return f.write_str("invalid");
        }
        if remainder == 0 {
            return f.write_str("0 seconds");
        }

        let mut first = true;
        for (unit, name) in UNITS {
            let amount = remainder / unit;
            remainder %= unit;
            if amount == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            let plural = if amount == 1 { "" } else { "s" };
            write!(f, "{amount} {name}{plural}")?;
        }
        Ok(())
    }
}

/// Renders `seconds` as prose, e.g. `"2 days, 3 hours"`.
pub fn humanize_seconds(seconds: i64) -> String {
    HumanDuration(seconds).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(humanize_seconds(0), "0 seconds");
    }

    #[test]
    fn test_negative() {
        assert_eq!(humanize_seconds(-1), "invalid");
        assert_eq!(humanize_seconds(i64::MIN), "invalid");
    }

    #[test]
    fn test_all_components() {
        assert_eq!(humanize_seconds(3661), "1 hour, 1 minute, 1 second");
        assert_eq!(
            humanize_seconds(2 * 86_400 + 2 * 3_600 + 2 * 60 + 2),
            "2 days, 2 hours, 2 minutes, 2 seconds"
        );
    }

    #[test]
    fn test_skips_zero_components() {
        assert_eq!(humanize_seconds(86_400), "1 day");
        assert_eq!(humanize_seconds(86_401), "1 day, 1 second");
        assert_eq!(humanize_seconds(31_536_000), "365 days");
    }

    #[test]
    fn test_plural() {
        assert_eq!(humanize_seconds(1), "1 second");
        assert_eq!(humanize_seconds(45), "45 seconds");
        assert_eq!(humanize_seconds(120), "2 minutes");
    }
}
