//! Data models for calendar generation.
//!
//! - [`config`]: the immutable [`CalendarConfiguration`] snapshot
//! - [`itinerary`]: [`ItineraryEntry`] variants and the [`ItinerarySet`] store
//! - [`request`]: messages crossing the worker boundary
//! - [`document`]: the JSON configuration document users edit by hand

pub mod config;
pub mod document;
pub mod itinerary;
pub mod request;


pub use config::{CalendarConfiguration, MAX_MONTH_COUNT, MIN_MONTH_COUNT};
pub use document::ConfigurationDocument;
pub use itinerary::{EntryKind, ItineraryEntry, ItinerarySet, ItineraryTarget, MAX_LINES_PER_ENTRY};
pub use request::{GenerationRequest, GenerationResponse, RequestId};
