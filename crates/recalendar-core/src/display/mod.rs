//! Markdown formatting for calendar data and generation results.
//!
//! Wrapper types implement [`std::fmt::Display`] so the same data can be
//! printed as markdown by any front end.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Calendar data  │    │ Display Wrapper │    │    Markdown     │
//! │ (months, days)  │───▶│      Types      │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: weekday order and month range tables
//! - [`results`]: generation outcome summaries

pub mod collections;
pub mod results;

pub use collections::{MonthList, WeekdayTable};
pub use results::GenerationSummary;
