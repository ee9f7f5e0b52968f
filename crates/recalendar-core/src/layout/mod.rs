//! Document layout engine.
//!
//! Turns a [`GenerationRequest`] into a paginated [`Document`] and then into
//! PDF bytes.
//!
//! ```text
//! ┌──────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ GenerationRequest│    │    Document     │    │    PDF bytes    │
//! │ (config + items) │───▶│ (sections/pages)│───▶│   (pdf-writer)  │
//! └──────────────────┘    └─────────────────┘    └─────────────────┘
//!       layout()               write_pdf()
//! ```
//!
//! For each month in the requested range (only the first one for previews)
//! the engine emits an optional overview page carrying the month itinerary,
//! then one page per day carrying the itinerary of that day's canonical
//! weekday. Rows that do not fit continue on continuation pages.
//!
//! ## Submodules
//!
//! - [`format`]: page formats, orientation, margins
//! - [`page`]: the laid-out document model
//! - [`pdf`]: PDF serialization
//! - [`text`]: WinAnsi encoding and text measurement

pub mod format;
pub mod page;
pub mod pdf;
pub mod text;

use log::debug;

pub use format::{LayoutConfig, LayoutConfigBuilder, Margins, Orientation, PageFormat};
pub use page::{Document, DrawOp, Font, MonthSection, Page, PageKind, Row};
pub use pdf::write_pdf;

use self::format::ContentBox;
use self::page::{PageComposer, BODY_SIZE, SMALL_SIZE, SUBTITLE_SIZE, TITLE_SIZE};
use crate::{
    calendar::{days_of, month_grid, months_of, weekday_order, CalendarDay, CalendarMonth},
    error::{CalendarError, Result},
    locale::Locale,
    models::{GenerationRequest, ItineraryEntry},
    worker::Renderer,
};

/// Lays out calendars and renders them to PDF.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out every page for `request`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Layout` when an itinerary entry is corrupt or
    /// the page setup has no room for content, and `CalendarError::Date` when
    /// a month lies outside the supported civil calendar.
    pub fn layout(&self, request: &GenerationRequest) -> Result<Document> {
        request
            .itineraries
            .validate()
            .map_err(|e| CalendarError::layout(format!("corrupt itinerary entry: {e}")))?;
        let content = self.config.content_box()?;

        let configuration = &request.configuration;
        let months = if request.is_preview {
            months_of(configuration.year(), configuration.start_month(), 1)?
        } else {
            configuration.months()?
        };

        let sections = months
            .into_iter()
            .map(|month| self.layout_month(request, month, content))
            .collect::<Result<Vec<_>>>()?;

        let (width, height) = self.config.page_size();
        let document = Document {
            width,
            height,
            sections,
        };
        debug!(
            "Laid out request {} ({}) into {} pages",
            request.request_id,
            request.scope(),
            document.page_count()
        );
        Ok(document)
    }

    /// Lays out and serializes `request` into PDF bytes.
    pub fn render_document(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        write_pdf(&self.layout(request)?)
    }

    fn layout_month(
        &self,
        request: &GenerationRequest,
        month: CalendarMonth,
        content: ContentBox,
    ) -> Result<MonthSection> {
        let locale = request.language();
        let title = capitalize(&month.title(locale));
        let mut pages = Vec::new();

        if request.configuration.month_overview_enabled() {
            pages.extend(overview_pages(
                month,
                &title,
                locale,
                request.itineraries.month(),
                content,
            )?);
        }
        for day in days_of(month)? {
            pages.extend(day_pages(
                &day,
                locale,
                request.itineraries.day(day.weekday),
                content,
            )?);
        }

        Ok(MonthSection {
            month,
            title,
            pages,
        })
    }
}

impl Renderer for LayoutEngine {
    fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        self.render_document(request)
    }
}

fn overview_pages(
    month: CalendarMonth,
    title: &str,
    locale: Locale,
    entries: &[ItineraryEntry],
    content: ContentBox,
) -> Result<Vec<Page>> {
    let continued = format!("{title} ({})", locale.continued_label());
    let mut composer =
        PageComposer::new(content, PageKind::MonthOverview, title.to_string(), continued)?;

    composer.text_line(title, TITLE_SIZE, Font::Bold);
    composer.advance(4.0);
    composer.rule(1.0);
    composer.advance(12.0);

    let column = composer.content().width() / 7.0;
    let left = composer.content().left;
    let line_height = SMALL_SIZE * 1.9;
    composer.ensure_room(line_height);
    for (position, descriptor) in weekday_order(locale).iter().enumerate() {
        let y = composer.cursor() - SMALL_SIZE;
        let x = left + column * position as f32;
        composer.text_at(x, y, descriptor.short_name, SMALL_SIZE, Font::Bold);
    }
    composer.advance(line_height);
    for week in month_grid(month, locale)? {
        composer.ensure_room(line_height);
        let y = composer.cursor() - SMALL_SIZE;
        for (position, cell) in week.iter().enumerate() {
            if let Some(day) = cell {
                let x = left + column * position as f32;
                composer.text_at(x, y, &day.to_string(), SMALL_SIZE, Font::Regular);
            }
        }
        composer.advance(line_height);
    }
    composer.ensure_room(14.0);
    composer.advance(8.0);
    composer.rule(0.5);
    composer.advance(6.0);

    for row in rows_for(entries) {
        composer.row(row);
    }
    Ok(composer.finish())
}

fn day_pages(
    day: &CalendarDay,
    locale: Locale,
    entries: &[ItineraryEntry],
    content: ContentBox,
) -> Result<Vec<Page>> {
    let weekday_name = capitalize(locale.weekday_name(day.weekday));
    let long_date = day.long_date(locale);
    let heading = format!("{weekday_name}, {long_date}");
    let continued = format!("{heading} ({})", locale.continued_label());
    let kind = PageKind::Day {
        date: day.date,
        weekday: day.weekday,
    };
    let mut composer = PageComposer::new(content, kind, heading, continued)?;

    let week = format!("{} {}", locale.week_label(), day.iso_week());
    composer.text_right(&week, BODY_SIZE, Font::Regular);
    composer.text_line(&weekday_name, TITLE_SIZE, Font::Bold);
    composer.text_line(&long_date, SUBTITLE_SIZE, Font::Regular);
    composer.advance(4.0);
    composer.rule(1.0);

    if !entries.is_empty() {
        composer.advance(6.0);
        for row in rows_for(entries) {
            composer.row(row);
        }
    }
    Ok(composer.finish())
}

/// Expands entries into rows: one checklist row per item, `n` ruled rows per
/// block of `n` lines.
fn rows_for(entries: &[ItineraryEntry]) -> Vec<Row> {
    entries
        .iter()
        .flat_map(|entry| match entry {
            ItineraryEntry::Item(label) => vec![Row::Checklist(label.clone())],
            ItineraryEntry::Lines(count) => vec![Row::Ruled; *count as usize],
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
