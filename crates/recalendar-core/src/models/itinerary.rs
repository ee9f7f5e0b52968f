//! Itinerary entries and the per-weekday itinerary store.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::Weekday,
    error::{CalendarError, Result},
};

/// Upper bound for a single block of reserved writing lines.
pub const MAX_LINES_PER_ENTRY: u32 = 200;

/// One row group in an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ItineraryEntry {
    /// A single checklist row with a short label
    Item(String),
    /// A number of blank ruled lines reserved for free writing
    Lines(u32),
}

impl ItineraryEntry {
    /// The kind of this entry.
    pub fn kind(&self) -> EntryKind {
        match self {
            ItineraryEntry::Item(_) => EntryKind::Item,
            ItineraryEntry::Lines(_) => EntryKind::Lines,
        }
    }

    /// Checks the entry value is renderable.
    pub fn validate(&self) -> Result<()> {
        match self {
            ItineraryEntry::Item(_) => Ok(()),
            ItineraryEntry::Lines(count) if *count > MAX_LINES_PER_ENTRY => {
                Err(CalendarError::invalid_input("lines").with_reason(format!(
                    "{count} lines exceeds the limit of {MAX_LINES_PER_ENTRY}"
                )))
            }
            ItineraryEntry::Lines(_) => Ok(()),
        }
    }
}

/// Entry type selector used when appending a blank entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Item,
    Lines,
}

impl EntryKind {
    /// Blank entry of this kind.
    pub fn blank(self) -> ItineraryEntry {
        match self {
            EntryKind::Item => ItineraryEntry::Item(String::new()),
            EntryKind::Lines => ItineraryEntry::Lines(0),
        }
    }
}

impl FromStr for EntryKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "item" => Ok(EntryKind::Item),
            "lines" => Ok(EntryKind::Lines),
            other => Err(CalendarError::invalid_input("type")
                .with_reason(format!("unknown entry type '{other}'; expected item or lines"))),
        }
    }
}

/// Selects which itinerary list an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItineraryTarget {
    /// The month overview itinerary
    Month,
    /// The itinerary shared by every occurrence of a weekday
    Day(Weekday),
}

impl fmt::Display for ItineraryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItineraryTarget::Month => f.write_str("month"),
            ItineraryTarget::Day(weekday) => write!(f, "day:{}", weekday.index()),
        }
    }
}

impl FromStr for ItineraryTarget {
    type Err = CalendarError;

    /// Accepts `month`, `day:<index>`, or a weekday name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("month") {
            return Ok(ItineraryTarget::Month);
        }
        let weekday = trimmed
            .strip_prefix("day:")
            .unwrap_or(trimmed)
            .parse::<Weekday>()?;
        Ok(ItineraryTarget::Day(weekday))
    }
}

/// The collection of itineraries the user edits.
///
/// `days` always holds exactly seven lists indexed by canonical weekday;
/// display order is computed at view time and never reorders storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ItinerarySet {
    #[serde(default)]
    month: Vec<ItineraryEntry>,
    #[serde(default)]
    days: [Vec<ItineraryEntry>; 7],
}

impl ItinerarySet {
    /// Creates a set from already validated lists.
    pub fn new(month: Vec<ItineraryEntry>, days: [Vec<ItineraryEntry>; 7]) -> Result<Self> {
        let set = Self { month, days };
        set.validate()?;
        Ok(set)
    }

    /// Entries of the month overview itinerary.
    pub fn month(&self) -> &[ItineraryEntry] {
        &self.month
    }

    /// Entries shown on every day page falling on `weekday`.
    pub fn day(&self, weekday: Weekday) -> &[ItineraryEntry] {
        &self.days[weekday.index()]
    }

    /// Entries of the given target list.
    pub fn entries(&self, target: ItineraryTarget) -> &[ItineraryEntry] {
        match target {
            ItineraryTarget::Month => self.month(),
            ItineraryTarget::Day(weekday) => self.day(weekday),
        }
    }

    fn list_mut(&mut self, target: ItineraryTarget) -> &mut Vec<ItineraryEntry> {
        match target {
            ItineraryTarget::Month => &mut self.month,
            ItineraryTarget::Day(weekday) => &mut self.days[weekday.index()],
        }
    }

    /// Appends a blank entry of `kind`, returning its index.
    pub fn append_entry(&mut self, target: ItineraryTarget, kind: EntryKind) -> usize {
        let list = self.list_mut(target);
        list.push(kind.blank());
        list.len() - 1
    }

    /// Replaces the entry at `index`, or appends when `index` equals the list
    /// length.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidInput` if the entry is invalid or the
    /// index is past the end of the list. The list is unchanged on error.
    pub fn upsert_entry(
        &mut self,
        target: ItineraryTarget,
        index: usize,
        entry: ItineraryEntry,
    ) -> Result<()> {
        entry.validate()?;
        let list = self.list_mut(target);
        match index.cmp(&list.len()) {
            std::cmp::Ordering::Less => list[index] = entry,
            std::cmp::Ordering::Equal => list.push(entry),
            std::cmp::Ordering::Greater => {
                return Err(index_error(target, index, list.len()));
            }
        }
        Ok(())
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_entry(&mut self, target: ItineraryTarget, index: usize) -> Result<ItineraryEntry> {
        let list = self.list_mut(target);
        if index >= list.len() {
            return Err(index_error(target, index, list.len()));
        }
        Ok(list.remove(index))
    }

    /// Validates every entry in every list.
    pub fn validate(&self) -> Result<()> {
        self.month
            .iter()
            .chain(self.days.iter().flatten())
            .try_for_each(ItineraryEntry::validate)
    }

    /// True when no list holds any entry.
    pub fn is_empty(&self) -> bool {
        self.month.is_empty() && self.days.iter().all(Vec::is_empty)
    }
}

fn index_error(target: ItineraryTarget, index: usize, len: usize) -> CalendarError {
    CalendarError::invalid_input("index")
        .with_reason(format!("index {index} is out of bounds for {target} (length {len})"))
}
