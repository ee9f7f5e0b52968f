//! Wrappers for displaying weekday and month collections.

use std::{fmt, ops::Index};

use crate::{
    calendar::{CalendarMonth, WeekdayDescriptor},
    locale::Locale,
};

/// Weekdays in display order, shown as a markdown table that pairs each
/// display position with the canonical index itineraries are stored under.
///
/// # Examples
///
/// ```rust
/// use recalendar_core::{calendar::weekday_order, display::WeekdayTable, Locale};
///
/// let table = WeekdayTable(weekday_order(Locale::EnglishUs));
/// let output = table.to_string();
/// assert!(output.contains("| 1 | 6 | Sunday | Sun |"));
/// ```
pub struct WeekdayTable(pub Vec<WeekdayDescriptor>);

impl WeekdayTable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeekdayDescriptor> {
        self.0.iter()
    }
}

impl Index<usize> for WeekdayTable {
    type Output = WeekdayDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for WeekdayTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Position | Index | Weekday | Short |")?;
        writeln!(f, "|---|---|---|---|")?;
        for (position, descriptor) in self.0.iter().enumerate() {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                position + 1,
                descriptor.index(),
                descriptor.name,
                descriptor.short_name
            )?;
        }
        Ok(())
    }
}

/// Months of a calendar range as a numbered markdown list.
pub struct MonthList {
    pub months: Vec<CalendarMonth>,
    pub locale: Locale,
}

impl fmt::Display for MonthList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months.is_empty() {
            return writeln!(f, "No months in range.");
        }
        for (position, month) in self.months.iter().enumerate() {
            let days = month
                .day_count()
                .map_or_else(|_| "?".to_string(), |count| count.to_string());
            writeln!(
                f,
                "{}. **{}** ({days} days)",
                position + 1,
                month.title(self.locale)
            )?;
        }
        Ok(())
    }
}
