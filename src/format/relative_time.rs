//! Relative time formatting ("3 days ago", "in 5 minutes", "now")
//!
//! The offset is walked up a fixed division table, from seconds to years,
//! and rounded once at the tier where the walk stops. Turning the resulting
//! [`RelativeTime`] into words is the job of a [`RelativeTimeLocale`].

use time::OffsetDateTime;

/// Unit of a relative time, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelativeTimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl RelativeTimeUnit {
    pub fn singular(self) -> &'static str {
        match self {
            RelativeTimeUnit::Seconds => "second",
            RelativeTimeUnit::Minutes => "minute",
            RelativeTimeUnit::Hours => "hour",
            RelativeTimeUnit::Days => "day",
            RelativeTimeUnit::Weeks => "week",
            RelativeTimeUnit::Months => "month",
            RelativeTimeUnit::Years => "year",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            RelativeTimeUnit::Seconds => "seconds",
            RelativeTimeUnit::Minutes => "minutes",
            RelativeTimeUnit::Hours => "hours",
            RelativeTimeUnit::Days => "days",
            RelativeTimeUnit::Weeks => "weeks",
            RelativeTimeUnit::Months => "months",
            RelativeTimeUnit::Years => "years",
        }
    }
}

/// One tier of the division table
///
/// A duration smaller than `threshold` (in this tier's unit) is expressed in
/// `unit`; otherwise it is divided by `threshold` and moves to the next tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    pub threshold: f64,
    pub unit: RelativeTimeUnit,
}

/// Average weeks per month
const WEEKS_PER_MONTH: f64 = 4.34524;

pub const DIVISIONS: [Division; 7] = [
    Division {
        threshold: 60.0,
        unit: RelativeTimeUnit::Seconds,
    },
    Division {
        threshold: 60.0,
        unit: RelativeTimeUnit::Minutes,
    },
    Division {
        threshold: 24.0,
        unit: RelativeTimeUnit::Hours,
    },
    Division {
        threshold: 7.0,
        unit: RelativeTimeUnit::Days,
    },
    Division {
        threshold: WEEKS_PER_MONTH,
        unit: RelativeTimeUnit::Weeks,
    },
    Division {
        threshold: 12.0,
        unit: RelativeTimeUnit::Months,
    },
    Division {
        threshold: f64::INFINITY,
        unit: RelativeTimeUnit::Years,
    },
];

/// A signed offset in a single unit. Negative is past, positive is future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub value: i64,
    pub unit: RelativeTimeUnit,
}

/// Compute the offset of `target_seconds` from `now_seconds`
pub fn relative_time(target_seconds: i64, now_seconds: i64) -> RelativeTime {
    let mut duration = target_seconds.saturating_sub(now_seconds) as f64;
    let mut tier = &DIVISIONS[0];

    for division in &DIVISIONS {
        tier = division;
        if duration.abs() < division.threshold {
            break;
        }
        duration /= division.threshold;
    }

    RelativeTime {
        // f64::round rounds half away from zero
        value: duration.round() as i64,
        unit: tier.unit,
    }
}

/// Turns a [`RelativeTime`] into words
pub trait RelativeTimeLocale {
    fn phrase(&self, time: RelativeTime) -> String;
}

/// Whether to prefer words like "yesterday" over "1 day ago"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Numeric {
    #[default]
    Always,
    Auto,
}

/// English phrasing
#[derive(Debug, Clone, Copy, Default)]
pub struct English {
    pub numeric: Numeric,
}

impl English {
    pub fn new(numeric: Numeric) -> Self {
        Self { numeric }
    }
}

impl RelativeTimeLocale for English {
    fn phrase(&self, time: RelativeTime) -> String {
        if time.value == 0 {
            return "now".to_string();
        }
        if self.numeric == Numeric::Auto
            && let Some(word) = english_word(time)
        {
            return word.to_string();
        }

        let count = time.value.unsigned_abs();
        let unit = if count == 1 {
            time.unit.singular()
        } else {
            time.unit.plural()
        };

        if time.value < 0 {
            format!("{count} {unit} ago")
        } else {
            format!("in {count} {unit}")
        }
    }
}

fn english_word(time: RelativeTime) -> Option<&'static str> {
    use RelativeTimeUnit::*;
    match (time.value, time.unit) {
        (-1, Days) => Some("yesterday"),
        (1, Days) => Some("tomorrow"),
        (-1, Weeks) => Some("last week"),
        (1, Weeks) => Some("next week"),
        (-1, Months) => Some("last month"),
        (1, Months) => Some("next month"),
        (-1, Years) => Some("last year"),
        (1, Years) => Some("next year"),
        _ => None,
    }
}

/// Phrase the offset of `target_seconds` from `now_seconds`
pub fn format_relative<L>(target_seconds: i64, now_seconds: i64, locale: &L) -> String
where
    L: RelativeTimeLocale + ?Sized,
{
    locale.phrase(relative_time(target_seconds, now_seconds))
}

/// Phrase the offset of `target_seconds` from the system clock
pub fn format_relative_to_now<L>(target_seconds: i64, locale: &L) -> String
where
    L: RelativeTimeLocale + ?Sized,
{
    format_relative(target_seconds, now_seconds(), locale)
}

/// Current Unix time in seconds
pub fn now_seconds() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
