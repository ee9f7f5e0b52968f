//! Summaries of finished generation requests.

use std::fmt;

use crate::session::GenerationOutcome;

/// Markdown summary of a [`GenerationOutcome`].
pub struct GenerationSummary<'a>(pub &'a GenerationOutcome);

impl fmt::Display for GenerationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            GenerationOutcome::Preview { request_id, handle } => {
                writeln!(f, "Preview ready for request {request_id}")?;
                writeln!(f)?;
                writeln!(f, "**Handle:** `{handle}`")
            }
            GenerationOutcome::Saved { request_id, path } => {
                writeln!(f, "Saved full document for request {request_id}")?;
                writeln!(f)?;
                writeln!(f, "**Path:** {}", path.display())
            }
            GenerationOutcome::Failed {
                request_id,
                is_preview,
                error,
            } => {
                let scope = crate::models::request::scope_label(*is_preview);
                writeln!(f, "Error: {scope} request {request_id} failed")?;
                writeln!(f)?;
                writeln!(f, "{error}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{error::CalendarError, models::RequestId};

    #[test]
    fn test_saved_summary() {
        let outcome = GenerationOutcome::Saved {
            request_id: RequestId(4),
            path: PathBuf::from("/tmp/recalendar.pdf"),
        };
        let output = GenerationSummary(&outcome).to_string();
        assert!(output.contains("request #4"));
        assert!(output.contains("**Path:** /tmp/recalendar.pdf"));
    }

    #[test]
    fn test_failure_summary_names_scope() {
        let outcome = GenerationOutcome::Failed {
            request_id: RequestId(2),
            is_preview: true,
            error: CalendarError::layout("no room"),
        };
        let output = GenerationSummary(&outcome).to_string();
        assert!(output.starts_with("Error: preview request #2 failed"));
        assert!(output.contains("Layout error: no room"));
    }
}
