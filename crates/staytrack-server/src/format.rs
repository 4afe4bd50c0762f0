//! Human-readable renderings of entry timestamps and stay durations.

use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeDelta, Timelike, Utc};
use std::str::FromStr;

use crate::jalali::JalaliDate;

/// Calendar, meridiem markers and unit words used for display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    /// Jalali calendar with Persian labels.
    #[default]
    Persian,
    /// Gregorian calendar with English labels.
    English,
}

impl DisplayLocale {
    fn meridiem(self, hour: u32) -> &'static str {
        match (self, hour < 12) {
            (Self::Persian, true) => "ق.ظ",
            (Self::Persian, false) => "ب.ظ",
            (Self::English, true) => "AM",
            (Self::English, false) => "PM",
        }
    }

    fn conjunction(self) -> &'static str {
        match self {
            Self::Persian => " و ",
            Self::English => " and ",
        }
    }

    fn unit(self, unit: Unit, count: i64) -> String {
        match self {
            Self::Persian => {
                let word = match unit {
                    Unit::Day => "روز",
                    Unit::Hour => "ساعت",
                    Unit::Minute => "دقیقه",
                    Unit::Second => "ثانیه",
                };
                format!("{count} {word}")
            }
            Self::English => {
                let word = match unit {
                    Unit::Day => "day",
                    Unit::Hour => "hour",
                    Unit::Minute => "minute",
                    Unit::Second => "second",
                };
                let plural = if count == 1 { "" } else { "s" };
                format!("{count} {word}{plural}")
            }
        }
    }

    /// The string shown for an absent or zero-length stay.
    pub fn zero_duration(self) -> String {
        self.unit(Unit::Second, 0)
    }
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fa" | "fa-ir" | "persian" => Ok(Self::Persian),
            "en" | "en-us" | "english" => Ok(Self::English),
            other => Err(format!("unknown locale '{other}' (expected 'fa' or 'en')")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}

/// Offset of Iran Standard Time, the default display zone.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 210;

/// Locale plus the local offset entry timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub locale: DisplayLocale,
    pub utc_offset: FixedOffset,
}

impl DisplayConfig {
    /// Returns `None` when the offset is outside ±24h.
    pub fn new(locale: DisplayLocale, utc_offset_minutes: i32) -> Option<Self> {
        let utc_offset = FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?;
        Some(Self { locale, utc_offset })
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: DisplayLocale::Persian,
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Render an entry instant as `YYYY/MM/DD - hh:mm <meridiem>` in local time.
///
/// The date uses the locale's calendar; the clock is 12-hour with `12`
/// standing in for hour 0. Absent instants render as `-`.
pub fn format_entry_timestamp(instant: Option<DateTime<Utc>>, display: &DisplayConfig) -> String {
    let Some(instant) = instant else {
        return "-".to_string();
    };
    let local = instant.with_timezone(&display.utc_offset);

    let (year, month, day) = match display.locale {
        DisplayLocale::Persian => {
            let date = JalaliDate::from(local.date_naive());
            (date.year, date.month, date.day)
        }
        DisplayLocale::English => (local.year(), local.month(), local.day()),
    };

    let hour = local.hour();
    let hour_12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!(
        "{year:04}/{month:02}/{day:02} - {hour_12:02}:{minute:02} {meridiem}",
        minute = local.minute(),
        meridiem = display.locale.meridiem(hour),
    )
}

/// Render a stay length as days, hours, minutes and seconds, largest first,
/// skipping zero components. Absent, zero and negative spans render as the
/// locale's zero string.
pub fn format_duration_span(span: Option<TimeDelta>, locale: DisplayLocale) -> String {
    let total = span.map(|s| s.num_seconds()).unwrap_or(0);
    if total <= 0 {
        return locale.zero_duration();
    }

    let components = [
        (Unit::Day, total / 86_400),
        (Unit::Hour, (total % 86_400) / 3_600),
        (Unit::Minute, (total % 3_600) / 60),
        (Unit::Second, total % 60),
    ];

    let parts: Vec<String> = components
        .into_iter()
        .filter(|(_, count)| *count != 0)
        .map(|(unit, count)| locale.unit(unit, count))
        .collect();

    parts.join(locale.conjunction())
}
