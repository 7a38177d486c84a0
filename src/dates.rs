//! Parsing of dates, times and durations typed on the command line.

use agenda_core::TimeOfDay;
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse YYYY-MM-DD, "today"/"hoje" or "tomorrow"/"amanhã" relative to `today`,
/// falling back to natural language ("next friday", "march 20").
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" | "hoje" => Ok(today),
        "tomorrow" | "amanhã" | "amanha" => Ok(today + Duration::days(1)),
        "yesterday" | "ontem" => Ok(today - Duration::days(1)),
        other => match NaiveDate::parse_from_str(other, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => fuzzydate::parse(other)
                .map(|dt| dt.date())
                .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\". Expected YYYY-MM-DD", input)),
        },
    }
}

pub fn parse_time(input: &str) -> Result<TimeOfDay> {
    Ok(input.parse::<TimeOfDay>()?)
}

/// End time from a start and a duration like "30m", "1h" or "1h30m".
pub fn end_after(start: TimeOfDay, duration: &str) -> Result<TimeOfDay> {
    let std_dur = humantime::parse_duration(duration)
        .with_context(|| format!("Could not parse duration: \"{}\"", duration))?;
    let minutes = Duration::from_std(std_dur)
        .context("Duration too large")?
        .num_minutes();

    start
        .checked_add_minutes(minutes)
        .with_context(|| format!("{} plus {} ends after midnight", start, duration))
}
