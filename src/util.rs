//! Clock and display formatting helpers.

use crate::error::{NhlError, Result};

/// Parse a scoreboard clock (`"MM:SS"`) into seconds.
///
/// The NHL play-by-play feed reports `timeInPeriod` as elapsed time in the
/// period. Rejects anything that is not exactly two numeric fields with
/// seconds below 60.
///
/// # Examples
///
/// ```rust
/// use nhl_fantasy::util::parse_clock;
///
/// assert_eq!(parse_clock("05:33").unwrap(), 333);
/// assert_eq!(parse_clock("19:59").unwrap(), 1199);
/// assert!(parse_clock("5:99").is_err());
/// ```
pub fn parse_clock(clock: &str) -> Result<u32> {
    let invalid = || NhlError::InvalidClock {
        value: clock.to_string(),
    };

    let (minutes, seconds) = clock.split_once(':').ok_or_else(invalid)?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }

    Ok(minutes * 60 + seconds)
}

/// Format a number of seconds as `"MM:SS"`.
pub fn format_mm_ss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format a percentage value with one decimal, e.g. `12.5` -> `"12.5%"`.
///
/// Non-finite input (0/0 conversion rates) renders as `"0.0%"` so summary
/// tables stay aligned.
pub fn format_percent(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:.1}%", pct)
    } else {
        "0.0%".to_string()
    }
}
