//! Live, editable calendar state owned by the foreground.
//!
//! Every edit either fully applies or leaves the state untouched. Generation
//! never reads this struct directly: [`CalendarState::snapshot`] copies it
//! into a [`GenerationRequest`] that the worker owns.

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    error::{CalendarError, Result, ResultExt},
    locale::Locale,
    models::{
        CalendarConfiguration, ConfigurationDocument, EntryKind, GenerationRequest,
        ItineraryEntry, ItinerarySet, ItineraryTarget, RequestId,
    },
};

/// File name looked up under the XDG config directory.
pub const CONFIG_FILE_NAME: &str = "calendar.json";

/// Configuration plus itineraries, as edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarState {
    configuration: CalendarConfiguration,
    itineraries: ItinerarySet,
}

impl CalendarState {
    pub fn new(configuration: CalendarConfiguration, itineraries: ItinerarySet) -> Self {
        Self {
            configuration,
            itineraries,
        }
    }

    pub fn configuration(&self) -> &CalendarConfiguration {
        &self.configuration
    }

    pub fn itineraries(&self) -> &ItinerarySet {
        &self.itineraries
    }

    pub fn set_year(&mut self, year: i32) {
        self.configuration = self.configuration.with_year(year);
    }

    pub fn set_start_month(&mut self, start_month: i64) -> Result<()> {
        let start_month = u8::try_from(start_month).map_err(|_| {
            CalendarError::invalid_input("start_month")
                .with_reason(format!("{start_month} is not a month index (0-11)"))
        })?;
        self.configuration = self.configuration.with_start_month(start_month)?;
        Ok(())
    }

    /// Sets the month count, rejecting values outside 1-12.
    pub fn set_month_count(&mut self, month_count: i64) -> Result<()> {
        self.configuration = self.configuration.with_month_count(month_count)?;
        Ok(())
    }

    pub fn set_month_overview_enabled(&mut self, enabled: bool) {
        self.configuration = self.configuration.with_month_overview_enabled(enabled);
    }

    pub fn set_language(&mut self, language: Locale) {
        self.configuration = self.configuration.with_language(language);
    }

    pub fn upsert_entry(
        &mut self,
        target: ItineraryTarget,
        index: usize,
        entry: ItineraryEntry,
    ) -> Result<()> {
        self.itineraries.upsert_entry(target, index, entry)
    }

    pub fn remove_entry(&mut self, target: ItineraryTarget, index: usize) -> Result<ItineraryEntry> {
        self.itineraries.remove_entry(target, index)
    }

    pub fn append_entry(&mut self, target: ItineraryTarget, kind: EntryKind) -> usize {
        self.itineraries.append_entry(target, kind)
    }

    /// Copies the current state into a request for the worker.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidInput` if any itinerary entry is invalid;
    /// no request is built in that case.
    pub fn snapshot(&self, request_id: RequestId, is_preview: bool) -> Result<GenerationRequest> {
        self.itineraries.validate()?;
        Ok(GenerationRequest {
            request_id,
            is_preview,
            configuration: self.configuration.clone(),
            itineraries: self.itineraries.clone(),
        })
    }

    /// Builds state from a configuration document, validating every field.
    pub fn from_document(document: ConfigurationDocument) -> Result<Self> {
        let mut state = Self::default();
        state.set_year(document.year);
        state.set_start_month(document.start_month)?;
        state.set_month_count(document.month_count)?;
        state.set_month_overview_enabled(document.month_overview_enabled);
        state.set_language(document.language);
        state.itineraries = ItinerarySet::new(document.month_itinerary, document.day_itineraries)?;
        Ok(state)
    }

    /// Converts the state back into its document form.
    pub fn to_document(&self) -> ConfigurationDocument {
        let configuration = &self.configuration;
        ConfigurationDocument {
            year: configuration.year(),
            start_month: i64::from(configuration.start_month()),
            month_count: i64::from(configuration.month_count()),
            month_overview_enabled: configuration.month_overview_enabled(),
            language: configuration.language(),
            month_itinerary: self.itineraries.month().to_vec(),
            day_itineraries: std::array::from_fn(|index| {
                self.itineraries.entries(ItineraryTarget::Day(
                    crate::calendar::Weekday::ALL[index],
                ))
                .to_vec()
            }),
        }
    }

    /// Reads and validates a JSON configuration document.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CalendarError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let document: ConfigurationDocument = serde_json::from_str(&contents)
            .with_context(format!("invalid configuration document {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_document(document)
    }

    /// Loads `path` when given, else the XDG config file when present, else
    /// the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Existing configuration file following XDG Base Directory
    /// specification: `$XDG_CONFIG_HOME/recalendar/calendar.json`.
    pub fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("recalendar").find_config_file(CONFIG_FILE_NAME)
    }
}
