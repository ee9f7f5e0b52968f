//! Serialized form of a calendar configuration.
//!
//! The document is what users write by hand (or what `recal template`
//! prints). It is converted into validated [`CalendarState`] values through
//! the same setters the interactive editors use, so an invalid document is
//! rejected the same way an invalid edit is.
//!
//! [`CalendarState`]: crate::state::CalendarState

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CalendarConfiguration, ItineraryEntry, MAX_MONTH_COUNT};
use crate::locale::Locale;

/// On-disk configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ConfigurationDocument {
    /// Calendar year of the first month
    pub year: i32,
    /// Zero-based first month (0 = January)
    #[serde(default)]
    pub start_month: i64,
    /// Number of months to generate (1-12)
    #[serde(default = "default_month_count")]
    pub month_count: i64,
    /// Whether each month starts with an overview page
    #[serde(default = "default_true")]
    pub month_overview_enabled: bool,
    /// Locale code (en, en-US, pl)
    #[serde(default)]
    pub language: Locale,
    /// Itinerary rendered on every month overview page
    #[serde(default)]
    pub month_itinerary: Vec<ItineraryEntry>,
    /// Seven itineraries indexed Monday = 0 … Sunday = 6
    #[serde(default)]
    pub day_itineraries: [Vec<ItineraryEntry>; 7],
}

fn default_month_count() -> i64 {
    i64::from(MAX_MONTH_COUNT)
}

fn default_true() -> bool {
    true
}

impl Default for ConfigurationDocument {
    fn default() -> Self {
        let configuration = CalendarConfiguration::default();
        Self {
            year: configuration.year(),
            start_month: i64::from(configuration.start_month()),
            month_count: i64::from(configuration.month_count()),
            month_overview_enabled: configuration.month_overview_enabled(),
            language: configuration.language(),
            month_itinerary: Vec::new(),
            day_itineraries: Default::default(),
        }
    }
}

impl ConfigurationDocument {
    /// An example document with a few entries, used by `recal template`.
    pub fn sample(year: i32) -> Self {
        let mut day_itineraries: [Vec<ItineraryEntry>; 7] = Default::default();
        day_itineraries[0] = vec![
            ItineraryEntry::Item("Plan the week".to_string()),
            ItineraryEntry::Lines(3),
        ];
        day_itineraries[2] = vec![ItineraryEntry::Item("Gym".to_string())];
        day_itineraries[4] = vec![ItineraryEntry::Item("Weekly review".to_string())];
        Self {
            year,
            start_month: 9,
            month_count: 3,
            month_overview_enabled: true,
            language: Locale::English,
            month_itinerary: vec![
                ItineraryEntry::Item("Buy books".to_string()),
                ItineraryEntry::Lines(5),
            ],
            day_itineraries,
        }
    }
}
