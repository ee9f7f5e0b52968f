//! Messages exchanged with the background generation worker.

use std::fmt;

use serde::Serialize;

use super::{CalendarConfiguration, ItinerarySet};
use crate::{error::CalendarError, locale::Locale};

/// Correlates a response with the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point-in-time copy of everything needed to generate a document.
///
/// Requests own their data; later edits to the live state never reach a
/// request that has already been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub request_id: RequestId,
    pub is_preview: bool,
    pub configuration: CalendarConfiguration,
    pub itineraries: ItinerarySet,
}

impl GenerationRequest {
    /// Locale the document is rendered in.
    pub fn language(&self) -> Locale {
        self.configuration.language()
    }

    /// "preview" or "full", for log lines and messages.
    pub fn scope(&self) -> &'static str {
        scope_label(self.is_preview)
    }
}

/// The worker's answer to a [`GenerationRequest`].
#[derive(Debug)]
pub struct GenerationResponse {
    pub request_id: RequestId,
    pub is_preview: bool,
    pub outcome: std::result::Result<Vec<u8>, CalendarError>,
}

impl GenerationResponse {
    pub fn scope(&self) -> &'static str {
        scope_label(self.is_preview)
    }
}

pub(crate) fn scope_label(is_preview: bool) -> &'static str {
    if is_preview {
        "preview"
    } else {
        "full"
    }
}
