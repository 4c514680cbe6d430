use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

const TICKS_PER_SECOND: i64 = 10_000_000;

// [-][d.]hh:mm[:ss[.fffffff]], or a whole number of days
static TIME_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<neg>-)?(?:(?:(?P<days>\d+)\.)?(?P<hours>\d{1,2}):(?P<minutes>\d{1,2})(?::(?P<seconds>\d{1,2})(?:\.(?P<fraction>\d{1,7}))?)?|(?P<only_days>\d+))$",
    )
    .expect("time span pattern is valid")
});

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses an invariant culture date, returning milliseconds since the UNIX epoch.
///
/// Values with an offset are converted to UTC. Values without one are taken as UTC.
pub(crate) fn parse_date_time(text: &str) -> Option<i64> {
    let text = text.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.timestamp_millis());
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(naive.and_utc().timestamp_millis())
}

/// The JSON form of a date, `/Date(1577836800000)/`.
pub(crate) fn date_literal(millis: i64) -> String {
    format!("/Date({millis})/")
}

/// A signed duration in 100ns ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeSpan(i64);

impl TimeSpan {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let caps = TIME_SPAN.captures(text.trim())?;

        let number = |name: &str| -> Option<i64> {
            caps.name(name).map_or(Some(0), |m| m.as_str().parse().ok())
        };

        let (days, hours, minutes, seconds) = match caps.name("only_days") {
            Some(days) => (days.as_str().parse().ok()?, 0, 0, 0),
            None => (
                number("days")?,
                number("hours")?,
                number("minutes")?,
                number("seconds")?,
            ),
        };

        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }

        // Fractions are right padded to seven digits, ".5" is half a second
        let fraction = match caps.name("fraction") {
            Some(m) => format!("{:0<7}", m.as_str()).parse::<i64>().ok()?,
            None => 0,
        };

        let ticks = days
            .checked_mul(24)?
            .checked_add(hours)?
            .checked_mul(60)?
            .checked_add(minutes)?
            .checked_mul(60)?
            .checked_add(seconds)?
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(fraction)?;

        Some(if caps.name("neg").is_some() {
            Self(-ticks)
        } else {
            Self(ticks)
        })
    }

    pub(crate) fn ticks(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ticks() < 0 {
            write!(f, "-")?;
        }

        let ticks = self.ticks().unsigned_abs();
        let per_second = TICKS_PER_SECOND as u64;

        let fraction = ticks % per_second;
        let total_seconds = ticks / per_second;
        let seconds = total_seconds % 60;
        let minutes = total_seconds / 60 % 60;
        let hours = total_seconds / 3600 % 24;
        let days = total_seconds / 86_400;

        if days > 0 {
            write!(f, "{days}.")?;
        }

        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;

        if fraction > 0 {
            write!(f, ".{fraction:07}")?;
        }

        Ok(())
    }
}
