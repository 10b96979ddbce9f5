//! Life progress calculation.
//!
//! Progress is the share of an assumed 70-year lifespan (365.25-day years)
//! elapsed since the birth date, clamped to `[0, 100]`. Unparseable input is
//! never an error: it simply counts as zero progress.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    Time,
};

pub const LIFE_EXPECTANCY_YEARS: f64 = 70.0;
pub const MS_IN_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;
pub const LIFESPAN_MS: f64 = LIFE_EXPECTANCY_YEARS * MS_IN_YEAR;

/// A validated calendar birth date (no time component).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BirthDate(Date);

impl BirthDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn date(&self) -> Date {
        self.0
    }

    /// Day of month, 1..=31.
    pub fn day(&self) -> u8 {
        self.0.day()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Midnight UTC of the birth day.
    pub fn start(&self) -> OffsetDateTime {
        self.0.with_time(Time::MIDNIGHT).assume_utc()
    }

    /// Year-difference age (birthday within the year is ignored).
    pub fn approximate_age(&self, now: OffsetDateTime) -> i32 {
        now.year() - self.0.year()
    }
}

/// State of the date field. Empty and invalid are distinct, and neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateInput {
    #[default]
    Empty,
    Invalid,
    Valid(BirthDate),
}

impl DateInput {
    pub fn is_empty(&self) -> bool {
        matches!(self, DateInput::Empty)
    }

    pub fn birth_date(&self) -> Option<BirthDate> {
        match self {
            DateInput::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

/// Parse the raw value of a date control.
///
/// Accepts `YYYY-MM-DD` and falls back to the date part of an RFC 3339 stamp.
pub fn parse_birth_date(raw: &str) -> DateInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateInput::Empty;
    }

    if let Ok(date) = Date::parse(trimmed, &format_description!("[year]-[month]-[day]")) {
        return DateInput::Valid(BirthDate::new(date));
    }

    match OffsetDateTime::parse(trimmed, &Rfc3339) {
        Ok(stamp) => DateInput::Valid(BirthDate::new(stamp.date())),
        Err(_) => DateInput::Invalid,
    }
}

/// Unrounded progress in `[0, 100]` between a birth date and `now`.
pub fn progress_between(birth: BirthDate, now: OffsetDateTime) -> f64 {
    let elapsed_ms = (now - birth.start()).whole_milliseconds() as f64;
    clamp_progress(elapsed_ms / LIFESPAN_MS * 100.0)
}

/// Progress for a raw date string; anything unparseable is zero.
pub fn calculate_progress(raw: &str, now: OffsetDateTime) -> f64 {
    match parse_birth_date(raw) {
        DateInput::Valid(birth) => progress_between(birth, now),
        DateInput::Empty | DateInput::Invalid => 0.0,
    }
}

/// Clamp into `[0, 100]`, mapping NaN to zero.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
