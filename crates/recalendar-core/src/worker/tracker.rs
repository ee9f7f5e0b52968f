//! Single-flight and staleness bookkeeping for submitted requests.

use crate::{
    error::{CalendarError, Result},
    models::RequestId,
};

/// Tracks the in-flight request and the most recent submission.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    in_flight: Option<(RequestId, bool)>,
    latest: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submission.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Busy` while another request is in flight.
    pub fn begin(&mut self, id: RequestId, is_preview: bool) -> Result<()> {
        if let Some((current, _)) = self.in_flight {
            return Err(CalendarError::Busy { id: current.0 });
        }
        self.in_flight = Some((id, is_preview));
        self.latest = Some(id);
        Ok(())
    }

    /// Returns true when a response for `id` should be delivered, clearing
    /// the in-flight slot. Responses for any other id are stale.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.latest != Some(id) {
            return false;
        }
        if self.in_flight.map(|(current, _)| current) == Some(id) {
            self.in_flight = None;
        }
        true
    }

    /// Releases the in-flight slot without a response, returning what was
    /// in flight.
    pub fn abandon(&mut self) -> Option<(RequestId, bool)> {
        self.in_flight.take()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.map(|(id, _)| id)
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_is_busy() {
        let mut tracker = RequestTracker::new();
        tracker.begin(RequestId(1), true).unwrap();
        let error = tracker.begin(RequestId(2), false).unwrap_err();
        assert!(matches!(error, CalendarError::Busy { id: 1 }));
        assert_eq!(tracker.latest(), Some(RequestId(1)));
    }

    #[test]
    fn test_accept_clears_in_flight() {
        let mut tracker = RequestTracker::new();
        tracker.begin(RequestId(1), true).unwrap();
        assert!(tracker.accept(RequestId(1)));
        assert!(!tracker.is_busy());
        tracker.begin(RequestId(2), false).unwrap();
        assert_eq!(tracker.in_flight(), Some(RequestId(2)));
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut tracker = RequestTracker::new();
        tracker.begin(RequestId(1), true).unwrap();
        tracker.abandon();
        tracker.begin(RequestId(2), true).unwrap();

        assert!(!tracker.accept(RequestId(1)));
        assert!(tracker.is_busy());
        assert!(tracker.accept(RequestId(2)));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_response_before_any_submission_ignored() {
        let mut tracker = RequestTracker::new();
        assert!(!tracker.accept(RequestId(7)));
    }

    #[test]
    fn test_abandon_reports_scope() {
        let mut tracker = RequestTracker::new();
        tracker.begin(RequestId(3), false).unwrap();
        assert_eq!(tracker.abandon(), Some((RequestId(3), false)));
        assert_eq!(tracker.abandon(), None);
    }
}
