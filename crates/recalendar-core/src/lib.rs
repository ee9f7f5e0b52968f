//! Core library for the ReCalendar planner generator.
//!
//! This crate turns a calendar configuration and a set of recurring
//! itineraries into a printable PDF planner: one optional overview page per
//! month followed by a page for every day, each carrying the checklist items
//! and writing lines configured for that month or weekday.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐ snapshot ┌───────────────┐ request ┌───────────────┐
//! │ CalendarState │─────────▶│   Session     │────────▶│ Worker thread │
//! │ (live edits)  │          │ (foreground)  │◀────────│ (LayoutEngine)│
//! └───────────────┘          └───────┬───────┘ response└───────────────┘
//!                                    │
//!                     ┌──────────────┴──────────────┐
//!                     ▼                             ▼
//!             ┌───────────────┐             ┌───────────────┐
//!             │ ArtifactStore │             │  SaveTarget   │
//!             │   (preview)   │             │ (full export) │
//!             └───────────────┘             └───────────────┘
//! ```
//!
//! - [`calendar`] and [`locale`]: month ranges, weekday order and localized
//!   names
//! - [`models`] and [`state`]: configuration, itineraries and requests
//! - [`layout`]: pagination and PDF output
//! - [`worker`]: the background generation protocol
//! - [`artifact`]: preview handle lifetime and saving
//! - [`session`]: the foreground controller
//! - [`display`]: markdown formatting for front ends
//!
//! # Quick Start
//!
//! ```rust
//! use recalendar_core::{CalendarState, ItineraryEntry, ItineraryTarget, LayoutEngine, RequestId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut state = CalendarState::default();
//! state.set_year(2024);
//! state.set_start_month(9)?;
//! state.set_month_count(3)?;
//! state.upsert_entry(
//!     ItineraryTarget::Month,
//!     0,
//!     ItineraryEntry::Item("Buy books".to_string()),
//! )?;
//!
//! let request = state.snapshot(RequestId(1), false)?;
//! let document = LayoutEngine::default().layout(&request)?;
//! assert_eq!(document.sections.len(), 3);
//!
//! let pdf = LayoutEngine::default().render_document(&request)?;
//! assert!(pdf.starts_with(b"%PDF-"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod artifact;
pub mod calendar;
pub mod display;
pub mod error;
pub mod layout;
pub mod locale;
pub mod models;
pub mod session;
pub mod state;
pub mod worker;

// Re-export commonly used types
pub use artifact::{ArtifactStore, DirectorySaveTarget, DisplayHandle, SaveTarget, DOWNLOAD_FILENAME};
pub use calendar::{CalendarDay, CalendarMonth, Weekday, WeekdayDescriptor};
pub use display::{GenerationSummary, MonthList, WeekdayTable};
pub use error::{CalendarError, Result};
pub use layout::{Document, LayoutConfig, LayoutEngine, Margins, Orientation, PageFormat};
pub use locale::Locale;
pub use models::{
    CalendarConfiguration, ConfigurationDocument, EntryKind, GenerationRequest,
    GenerationResponse, ItineraryEntry, ItinerarySet, ItineraryTarget, RequestId,
};
pub use session::{
    GenerationOutcome, GenerationSession, GenerationState, NoopObserver, SessionObserver,
};
pub use state::CalendarState;
pub use worker::{GenerationClient, Renderer, WorkerBuilder, WorkerHealth};
