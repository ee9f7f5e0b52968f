//! Immutable calendar configuration snapshot.

use serde::Serialize;

use crate::{
    calendar::{months_of, CalendarMonth},
    error::{CalendarError, Result},
    locale::Locale,
};

/// Smallest number of months a calendar can cover.
pub const MIN_MONTH_COUNT: u8 = 1;
/// Largest number of months a calendar can cover.
pub const MAX_MONTH_COUNT: u8 = 12;

/// Describes what to generate.
///
/// Values are validated on construction and every `with_*` method returns a
/// new validated snapshot, so an instance is never observed half-edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarConfiguration {
    year: i32,
    start_month: u8,
    month_count: u8,
    month_overview_enabled: bool,
    language: Locale,
}

impl CalendarConfiguration {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidInput` if `start_month` is outside 0-11
    /// or `month_count` is outside 1-12.
    pub fn new(
        year: i32,
        start_month: u8,
        month_count: u8,
        month_overview_enabled: bool,
        language: Locale,
    ) -> Result<Self> {
        Ok(Self {
            year,
            start_month: validate_start_month(start_month)?,
            month_count: validate_month_count(i64::from(month_count))?,
            month_overview_enabled,
            language,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    pub fn month_count(&self) -> u8 {
        self.month_count
    }

    pub fn month_overview_enabled(&self) -> bool {
        self.month_overview_enabled
    }

    pub fn language(&self) -> Locale {
        self.language
    }

    /// Copy with a different year. Any year is accepted here; years outside
    /// the civil calendar range fail at generation time.
    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year,
            ..self.clone()
        }
    }

    pub fn with_start_month(&self, start_month: u8) -> Result<Self> {
        Ok(Self {
            start_month: validate_start_month(start_month)?,
            ..self.clone()
        })
    }

    /// Copy with a different month count.
    ///
    /// Takes a wide integer so that out-of-range input such as `13` or `-1`
    /// is rejected rather than clamped or wrapped.
    pub fn with_month_count(&self, month_count: i64) -> Result<Self> {
        Ok(Self {
            month_count: validate_month_count(month_count)?,
            ..self.clone()
        })
    }

    pub fn with_month_overview_enabled(&self, enabled: bool) -> Self {
        Self {
            month_overview_enabled: enabled,
            ..self.clone()
        }
    }

    pub fn with_language(&self, language: Locale) -> Self {
        Self {
            language,
            ..self.clone()
        }
    }

    /// Months covered by this configuration, in order.
    pub fn months(&self) -> Result<Vec<CalendarMonth>> {
        months_of(self.year, self.start_month, self.month_count)
    }
}

impl Default for CalendarConfiguration {
    /// January of the current year, twelve months, overview enabled.
    fn default() -> Self {
        Self {
            year: i32::from(jiff::Zoned::now().year()),
            start_month: 0,
            month_count: MAX_MONTH_COUNT,
            month_overview_enabled: true,
            language: Locale::default(),
        }
    }
}

fn validate_start_month(start_month: u8) -> Result<u8> {
    if start_month > 11 {
        return Err(CalendarError::invalid_input("start_month")
            .with_reason(format!("{start_month} is not a month index (0-11)")));
    }
    Ok(start_month)
}

fn validate_month_count(month_count: i64) -> Result<u8> {
    if !(i64::from(MIN_MONTH_COUNT)..=i64::from(MAX_MONTH_COUNT)).contains(&month_count) {
        return Err(CalendarError::invalid_input("month_count").with_reason(format!(
            "{month_count} is outside {MIN_MONTH_COUNT}-{MAX_MONTH_COUNT}"
        )));
    }
    Ok(month_count as u8)
}
