use anyhow::{Context, Result, bail};

/// Parses a clock time of the form `[[H:]MM:]SS[.mmm]` into milliseconds.
///
/// The seconds component may carry a fractional part; hours and minutes
/// must be whole numbers. Used for anchor target times and translation
/// amounts supplied on the command line.
pub fn parse_clock_time(value: &str) -> Result<i64> {
    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds_part) = match parts.as_slice() {
        [s] => (0u64, 0u64, *s),
        [m, s] => (
            0,
            m.parse()
                .with_context(|| format!("Invalid minutes in time '{value}'"))?,
            *s,
        ),
        [h, m, s] => (
            h.parse()
                .with_context(|| format!("Invalid hours in time '{value}'"))?,
            m.parse()
                .with_context(|| format!("Invalid minutes in time '{value}'"))?,
            *s,
        ),
        _ => bail!("Time '{value}' has more than three clock components"),
    };

    let seconds: f64 = seconds_part
        .parse()
        .with_context(|| format!("Invalid seconds in time '{value}'"))?;
    if seconds < 0.0 {
        bail!("Time '{value}' must not be negative");
    }

    Ok((seconds * 1000.0).round() as i64 + (hours * 3_600_000 + minutes * 60_000) as i64)
}
