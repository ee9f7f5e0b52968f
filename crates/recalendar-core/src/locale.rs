//! Locale tables for weekday and month names.
//!
//! A locale only changes how weekdays and months are *named* and in which
//! order weekdays are *displayed*. The canonical weekday index used to store
//! itineraries (Monday = 0) never depends on the locale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::Weekday;
use crate::error::CalendarError;

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(try_from = "String")]
pub enum Locale {
    /// English with Monday as the first day of the week
    #[default]
    #[serde(rename = "en")]
    English,
    /// US English, Sunday first
    #[serde(rename = "en-US")]
    EnglishUs,
    /// Polish
    #[serde(rename = "pl")]
    Polish,
}

struct LocaleTable {
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    months: [&'static str; 12],
    // Month form used inside a full date ("16 października 2024").
    months_in_date: [&'static str; 12],
    week_label: &'static str,
    continued_label: &'static str,
    week_start: Weekday,
    day_first: bool,
}

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const ENGLISH_WEEKDAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static ENGLISH: LocaleTable = LocaleTable {
    weekdays: ENGLISH_WEEKDAYS,
    weekdays_short: ENGLISH_WEEKDAYS_SHORT,
    months: ENGLISH_MONTHS,
    months_in_date: ENGLISH_MONTHS,
    week_label: "Week",
    continued_label: "continued",
    week_start: Weekday::Monday,
    day_first: true,
};

static ENGLISH_US: LocaleTable = LocaleTable {
    weekdays: ENGLISH_WEEKDAYS,
    weekdays_short: ENGLISH_WEEKDAYS_SHORT,
    months: ENGLISH_MONTHS,
    months_in_date: ENGLISH_MONTHS,
    week_label: "Week",
    continued_label: "continued",
    week_start: Weekday::Sunday,
    day_first: false,
};

static POLISH: LocaleTable = LocaleTable {
    weekdays: [
        "poniedziałek",
        "wtorek",
        "środa",
        "czwartek",
        "piątek",
        "sobota",
        "niedziela",
    ],
    weekdays_short: ["pon", "wt", "śr", "czw", "pt", "sob", "niedz"],
    months: [
        "styczeń",
        "luty",
        "marzec",
        "kwiecień",
        "maj",
        "czerwiec",
        "lipiec",
        "sierpień",
        "wrzesień",
        "październik",
        "listopad",
        "grudzień",
    ],
    months_in_date: [
        "stycznia",
        "lutego",
        "marca",
        "kwietnia",
        "maja",
        "czerwca",
        "lipca",
        "sierpnia",
        "września",
        "października",
        "listopada",
        "grudnia",
    ],
    week_label: "Tydzień",
    continued_label: "cd.",
    week_start: Weekday::Monday,
    day_first: true,
};

impl Locale {
    /// All supported locales.
    pub const ALL: [Locale; 3] = [Locale::English, Locale::EnglishUs, Locale::Polish];

    fn table(self) -> &'static LocaleTable {
        match self {
            Locale::English => &ENGLISH,
            Locale::EnglishUs => &ENGLISH_US,
            Locale::Polish => &POLISH,
        }
    }

    /// BCP 47 style code of the locale.
    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::EnglishUs => "en-US",
            Locale::Polish => "pl",
        }
    }

    /// First day of the week in display order.
    pub fn week_start(self) -> Weekday {
        self.table().week_start
    }

    /// Full weekday name.
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        self.table().weekdays[weekday.index()]
    }

    /// Abbreviated weekday name.
    pub fn weekday_short_name(self, weekday: Weekday) -> &'static str {
        self.table().weekdays_short[weekday.index()]
    }

    /// Standalone month name for a zero-based month index.
    ///
    /// # Panics
    ///
    /// Panics if `month` is not in `0..12`.
    pub fn month_name(self, month: u8) -> &'static str {
        self.table().months[usize::from(month)]
    }

    /// Label placed before ISO week numbers.
    pub fn week_label(self) -> &'static str {
        self.table().week_label
    }

    /// Marker appended to headers of continuation pages.
    pub fn continued_label(self) -> &'static str {
        self.table().continued_label
    }

    /// Position of `weekday` in this locale's display order (0 = first column).
    pub fn display_position(self, weekday: Weekday) -> usize {
        (weekday.index() + 7 - self.week_start().index()) % 7
    }

    /// Formats a full date such as "16 October 2024" or "October 16, 2024".
    pub fn format_date(self, day: u8, month: u8, year: i16) -> String {
        let table = self.table();
        let month_name = table.months_in_date[usize::from(month)];
        if table.day_first {
            format!("{day} {month_name} {year}")
        } else {
            format!("{month_name} {day}, {year}")
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_lowercase().as_str() {
            "en" | "en-gb" => Ok(Locale::English),
            "en-us" => Ok(Locale::EnglishUs),
            "pl" | "pl-pl" => Ok(Locale::Polish),
            other => Err(CalendarError::invalid_input("language")
                .with_reason(format!("unsupported locale '{other}'; expected en, en-US or pl"))),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
