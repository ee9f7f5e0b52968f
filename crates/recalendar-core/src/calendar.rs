//! Calendar and date computations.
//!
//! All functions here are pure. Weekdays are addressed by their canonical
//! index (Monday = 0 … Sunday = 6); a [`Locale`] only affects names and the
//! order in which weekdays are displayed.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, DateResultExt, Result};
use crate::locale::Locale;

/// Canonical weekday, indexed Monday = 0 … Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical index of the weekday.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekday for a canonical index, or `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_jiff(weekday: jiff::civil::Weekday) -> Self {
        // to_monday_zero_offset is always in 0..=6
        Self::ALL[weekday.to_monday_zero_offset() as usize]
    }

    fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = CalendarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Ok(index) = normalized.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| {
                CalendarError::invalid_input("weekday")
                    .with_reason(format!("index {index} is outside 0-6"))
            });
        }
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == normalized || day.as_str()[..3] == normalized)
            .ok_or_else(|| {
                CalendarError::invalid_input("weekday")
                    .with_reason(format!("unknown weekday '{s}'"))
            })
    }
}

/// A weekday as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayDescriptor {
    /// Canonical weekday, used for itinerary lookup
    pub weekday: Weekday,
    /// Localized full name
    pub name: &'static str,
    /// Localized abbreviated name
    pub short_name: &'static str,
}

impl WeekdayDescriptor {
    /// Canonical index of the described weekday.
    pub fn index(&self) -> usize {
        self.weekday.index()
    }
}

/// A (year, zero-based month) pair produced by [`months_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i16,
    /// Zero-based month index (0 = January)
    pub month: u8,
}

impl CalendarMonth {
    /// Creates a month after checking both fields are representable dates.
    pub fn new(year: i32, month: u8) -> Result<Self> {
        if month > 11 {
            return Err(CalendarError::invalid_input("month")
                .with_reason(format!("month index {month} is outside 0-11")));
        }
        let year = i16::try_from(year).map_err(|_| {
            CalendarError::invalid_input("year").with_reason(format!("year {year} is out of range"))
        })?;
        let candidate = Self { year, month };
        candidate.first_day()?;
        Ok(candidate)
    }

    /// First calendar date of the month.
    pub fn first_day(&self) -> Result<Date> {
        Date::new(self.year, self.month as i8 + 1, 1)
            .date_context(&format!("invalid month {}-{}", self.year, self.month + 1))
    }

    /// Number of days in the month.
    pub fn day_count(&self) -> Result<u8> {
        Ok(self.first_day()?.days_in_month() as u8)
    }

    /// Localized heading such as "October 2024".
    pub fn title(&self, locale: Locale) -> String {
        format!("{} {}", locale.month_name(self.month), self.year)
    }
}

/// A date tagged with its canonical weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub weekday: Weekday,
}

impl CalendarDay {
    fn from_date(date: Date) -> Self {
        Self {
            date,
            weekday: Weekday::from_jiff(date.weekday()),
        }
    }

    /// Day of month, 1-based.
    pub fn day(&self) -> u8 {
        self.date.day() as u8
    }

    /// ISO 8601 week number.
    pub fn iso_week(&self) -> i8 {
        self.date.iso_week_date().week()
    }

    /// Localized long form, e.g. "16 October 2024".
    pub fn long_date(&self, locale: Locale) -> String {
        locale.format_date(self.day(), self.date.month() as u8 - 1, self.date.year())
    }
}

/// Weekdays in the locale's display order.
///
/// The result always has seven entries; each carries its canonical index so
/// callers never need to map display positions back to storage slots.
pub fn weekday_order(locale: Locale) -> Vec<WeekdayDescriptor> {
    let start = locale.week_start().index();
    (0..7)
        .map(|offset| {
            let weekday = Weekday::ALL[(start + offset) % 7];
            WeekdayDescriptor {
                weekday,
                name: locale.weekday_name(weekday),
                short_name: locale.weekday_short_name(weekday),
            }
        })
        .collect()
}

/// Consecutive months starting at `start_month` of `year`, wrapping into
/// following years.
///
/// # Errors
///
/// Returns `CalendarError::InvalidInput` when `start_month` is not in 0-11 and
/// `CalendarError::Date` when a month falls outside the supported civil range.
pub fn months_of(year: i32, start_month: u8, month_count: u8) -> Result<Vec<CalendarMonth>> {
    if start_month > 11 {
        return Err(CalendarError::invalid_input("start_month")
            .with_reason(format!("{start_month} is outside 0-11")));
    }
    (0..u32::from(month_count))
        .map(|offset| {
            let absolute = u32::from(start_month) + offset;
            let month_year = year + (absolute / 12) as i32;
            CalendarMonth::new(month_year, (absolute % 12) as u8)
        })
        .collect()
}

/// Every day of a month in order, tagged with its canonical weekday.
pub fn days_of(month: CalendarMonth) -> Result<Vec<CalendarDay>> {
    let first = month.first_day()?;
    let count = first.days_in_month();
    (1..=count)
        .map(|day| {
            Date::new(month.year, first.month(), day)
                .date_context("invalid day of month")
                .map(CalendarDay::from_date)
        })
        .collect()
}

/// Mini-calendar rows for a month: each row has seven cells in the locale's
/// display order holding the day of month, or `None` for padding.
pub fn month_grid(month: CalendarMonth, locale: Locale) -> Result<Vec<[Option<u8>; 7]>> {
    let mut rows: Vec<[Option<u8>; 7]> = Vec::new();
    let mut current = [None; 7];
    for day in days_of(month)? {
        let column = locale.display_position(day.weekday);
        if column == 0 && current.iter().any(Option::is_some) {
            rows.push(current);
            current = [None; 7];
        }
        current[column] = Some(day.day());
    }
    if current.iter().any(Option::is_some) {
        rows.push(current);
    }
    Ok(rows)
}
