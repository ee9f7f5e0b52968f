//! Error types for the calendar generation library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all calendar operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Civil date arithmetic errors
    #[error("Date error: {message}")]
    Date {
        message: String,
        #[source]
        source: jiff::Error,
    },
    /// Fault while laying out or serializing a document
    #[error("Layout error: {reason}")]
    Layout { reason: String },
    /// A generation request is already in flight
    #[error("Generation request {id} is still in progress")]
    Busy { id: u64 },
    /// The background generation context is gone
    #[error("Generation worker unavailable: {reason}")]
    WorkerUnavailable { reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Unreadable configuration document
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CalendarError {
        CalendarError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating date errors with context.
pub struct DateErrorBuilder {
    message: String,
}

impl DateErrorBuilder {
    /// Create a new date error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: jiff::Error) -> CalendarError {
        CalendarError::Date {
            message: self.message,
            source,
        }
    }
}

impl CalendarError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for date errors.
    pub fn date(message: impl Into<String>) -> DateErrorBuilder {
        DateErrorBuilder::new(message)
    }

    /// Creates a layout error.
    pub fn layout(reason: impl Into<String>) -> Self {
        Self::Layout {
            reason: reason.into(),
        }
    }

    /// Creates a worker-unavailable error.
    pub fn worker_unavailable(reason: impl Into<String>) -> Self {
        Self::WorkerUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised before anything reaches the worker.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to CalendarError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for jiff Results.
pub trait DateResultExt<T> {
    /// Map date errors with a message.
    fn date_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| CalendarError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DateResultExt<T> for std::result::Result<T, jiff::Error> {
    fn date_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CalendarError::date(message).with_source(e))
    }
}

/// Result type alias for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let error = CalendarError::invalid_input("month_count").with_reason("must be 1-12");
        assert!(error.is_validation());
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'month_count': must be 1-12"
        );
    }

    #[test]
    fn test_date_context_wraps_jiff_error() {
        let result = jiff::civil::Date::new(2024, 13, 1).date_context("building date");
        let error = result.expect_err("month 13 must fail");
        assert!(matches!(error, CalendarError::Date { .. }));
        assert!(!error.is_validation());
        assert!(error.to_string().starts_with("Date error: building date"));
    }

    #[test]
    fn test_with_context_maps_to_configuration() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let error = io.with_context("reading config").expect_err("must fail");
        assert_eq!(
            error.to_string(),
            "Configuration error: reading config: missing"
        );
    }
}
