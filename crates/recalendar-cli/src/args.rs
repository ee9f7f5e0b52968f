//! Command-line argument definitions.
//!
//! Arguments map onto core types at the edge: calendar overrides are applied
//! through the validating [`CalendarState`] setters and page options become a
//! [`LayoutConfig`], so invalid input is rejected by the same checks the
//! library uses.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args as ClapArgs, Parser, Subcommand};
use recalendar_core::{
    CalendarError, CalendarState, EntryKind, ItineraryEntry, ItineraryTarget, LayoutConfig,
    Locale, Orientation, PageFormat,
};

/// Generate printable ReCalendar planners
///
/// Builds a PDF planner with an optional overview page per month and a page
/// for every day. Month and weekday itineraries come from a JSON
/// configuration document; see `recal template` for an example.
#[derive(Parser)]
#[command(version, about, name = "recal")]
pub struct Args {
    /// Path to the JSON configuration document. Defaults to
    /// $XDG_CONFIG_HOME/recalendar/calendar.json when it exists
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub calendar: CalendarArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the full planner and save it as recalendar.pdf
    #[command(alias = "g")]
    Generate {
        /// Directory to save the document in
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Generate the first month only and write it to a file
    #[command(alias = "p")]
    Preview {
        /// File to write the preview document to
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show weekdays in the locale's display order
    Weekdays,
    /// Show the months the planner covers
    Months,
    /// Print a sample configuration document
    Template,
    /// Print the JSON schema of the configuration document
    Schema,
}

/// Overrides applied on top of the configuration document.
#[derive(ClapArgs, Debug, Default)]
pub struct CalendarArgs {
    /// Locale code (en, en-US, pl)
    #[arg(long, global = true)]
    pub language: Option<Locale>,

    /// Year of the first month
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub year: Option<i32>,

    /// First month as a zero-based index (0 = January)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub start_month: Option<i64>,

    /// Number of months to generate (1-12)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub month_count: Option<i64>,

    /// Skip the overview page at the start of each month
    #[arg(long, global = true)]
    pub no_overview: bool,

    /// Append an itinerary entry for this run, as TARGET=KIND[:VALUE]
    /// (e.g. month=item:Buy books, friday=lines:4, day:0=item)
    #[arg(long = "add", value_name = "ENTRY", global = true)]
    pub entries: Vec<EntryArg>,
}

/// One `--add` value: where the entry goes and what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryArg {
    pub target: ItineraryTarget,
    pub entry: ItineraryEntry,
}

impl FromStr for EntryArg {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, spec) = s.split_once('=').ok_or_else(|| {
            CalendarError::invalid_input("add")
                .with_reason(format!("'{s}' is not of the form TARGET=KIND[:VALUE]"))
        })?;
        let target = target.parse::<ItineraryTarget>()?;
        let (kind, value) = match spec.split_once(':') {
            Some((kind, value)) => (kind.parse::<EntryKind>()?, Some(value)),
            None => (spec.parse::<EntryKind>()?, None),
        };
        let entry = match (kind, value) {
            (kind, None) => kind.blank(),
            (EntryKind::Item, Some(label)) => ItineraryEntry::Item(label.to_string()),
            (EntryKind::Lines, Some(count)) => {
                let count = count.trim().parse::<u32>().map_err(|e| {
                    CalendarError::invalid_input("add")
                        .with_reason(format!("line count '{count}' is not a number: {e}"))
                })?;
                ItineraryEntry::Lines(count)
            }
        };
        Ok(Self { target, entry })
    }
}

impl CalendarArgs {
    /// Applies every given override, stopping at the first invalid one.
    pub fn apply(&self, state: &mut CalendarState) -> recalendar_core::Result<()> {
        if let Some(language) = self.language {
            state.set_language(language);
        }
        if let Some(year) = self.year {
            state.set_year(year);
        }
        if let Some(start_month) = self.start_month {
            state.set_start_month(start_month)?;
        }
        if let Some(month_count) = self.month_count {
            state.set_month_count(month_count)?;
        }
        if self.no_overview {
            state.set_month_overview_enabled(false);
        }
        for EntryArg { target, entry } in &self.entries {
            let index = state.itineraries().entries(*target).len();
            state.upsert_entry(*target, index, entry.clone())?;
        }
        Ok(())
    }
}

/// Physical page options.
#[derive(ClapArgs, Debug, Default)]
pub struct LayoutArgs {
    /// Page format (a4, a5, letter, remarkable)
    #[arg(long, global = true, default_value_t = PageFormat::A4)]
    pub format: PageFormat,

    /// Lay pages out in landscape orientation
    #[arg(long, global = true)]
    pub landscape: bool,
}

impl TryFrom<&LayoutArgs> for LayoutConfig {
    type Error = recalendar_core::CalendarError;

    fn try_from(val: &LayoutArgs) -> Result<Self, Self::Error> {
        let orientation = if val.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        LayoutConfig::builder()
            .with_format(val.format)
            .with_orientation(orientation)
            .build()
    }
}
