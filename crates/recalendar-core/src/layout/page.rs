//! Laid-out document model.
//!
//! The layout engine produces a [`Document`] made of month sections and
//! pages. Each page keeps both its semantic content (heading, itinerary
//! rows) and the drawing operations the PDF writer replays.

use jiff::civil::Date;
use serde::Serialize;

use super::format::ContentBox;
use super::text::{fit_text, text_width};
use crate::{
    calendar::{CalendarMonth, Weekday},
    error::{CalendarError, Result},
};

pub(crate) const TITLE_SIZE: f32 = 22.0;
pub(crate) const SUBTITLE_SIZE: f32 = 12.0;
pub(crate) const BODY_SIZE: f32 = 11.0;
pub(crate) const SMALL_SIZE: f32 = 9.0;
pub(crate) const ROW_HEIGHT: f32 = 22.0;
const CHECKBOX_SIZE: f32 = 9.0;
const CHECKBOX_GAP: f32 = 8.0;
const RULE_GRAY: f32 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    Regular,
    Bold,
}

/// A primitive the PDF writer knows how to draw. Coordinates are in points
/// with the origin at the bottom-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        gray: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
}

/// One rendered itinerary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Row {
    /// Checklist row with a label
    Checklist(String),
    /// Blank ruled line for free writing
    Ruled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageKind {
    MonthOverview,
    Day { date: Date, weekday: Weekday },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub kind: PageKind,
    pub heading: String,
    /// True for pages that only carry rows overflowing from the previous page
    pub continuation: bool,
    pub rows: Vec<Row>,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Checklist labels on this page, in order.
    pub fn checklist_labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Checklist(label) => Some(label.as_str()),
                Row::Ruled => None,
            })
            .collect()
    }

    /// Number of blank ruled rows on this page.
    pub fn ruled_row_count(&self) -> usize {
        self.rows.iter().filter(|row| **row == Row::Ruled).count()
    }
}

/// All pages generated for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSection {
    pub month: CalendarMonth,
    pub title: String,
    pub pages: Vec<Page>,
}

impl MonthSection {
    /// The overview page, when overviews are enabled.
    pub fn overview(&self) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| page.kind == PageKind::MonthOverview && !page.continuation)
    }

    /// First page of every day, in date order.
    pub fn day_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages
            .iter()
            .filter(|page| matches!(page.kind, PageKind::Day { .. }) && !page.continuation)
    }
}

/// A fully laid-out calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub sections: Vec<MonthSection>,
}

impl Document {
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.sections.iter().flat_map(|section| section.pages.iter())
    }

    pub fn page_count(&self) -> usize {
        self.sections.iter().map(|section| section.pages.len()).sum()
    }
}

/// Places headers and rows on pages, starting continuation pages when the
/// printable area runs out.
pub(crate) struct PageComposer {
    content: ContentBox,
    kind: PageKind,
    heading: String,
    continued_heading: String,
    cursor: f32,
    current: Page,
    finished: Vec<Page>,
}

impl PageComposer {
    /// Starts a page. `continued_heading` is printed at the top of every
    /// continuation page.
    pub(crate) fn new(
        content: ContentBox,
        kind: PageKind,
        heading: String,
        continued_heading: String,
    ) -> Result<Self> {
        if content.height() < SUBTITLE_SIZE * 2.0 + ROW_HEIGHT {
            return Err(CalendarError::layout(format!(
                "printable area of {:.0}pt is too short for a single row",
                content.height()
            )));
        }
        Ok(Self {
            content,
            kind,
            current: Self::blank_page(kind, &heading, false),
            heading,
            continued_heading,
            cursor: content.top,
            finished: Vec::new(),
        })
    }

    fn blank_page(kind: PageKind, heading: &str, continuation: bool) -> Page {
        Page {
            kind,
            heading: heading.to_string(),
            continuation,
            rows: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub(crate) fn content(&self) -> ContentBox {
        self.content
    }

    /// Current vertical position (top of the remaining space).
    pub(crate) fn cursor(&self) -> f32 {
        self.cursor
    }

    pub(crate) fn advance(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    /// Draws text with its baseline `size` below the cursor, then moves the
    /// cursor past it.
    pub(crate) fn text_line(&mut self, text: &str, size: f32, font: Font) {
        let baseline = self.cursor - size;
        let fitted = fit_text(text, size, font, self.content.width());
        self.current.ops.push(DrawOp::Text {
            x: self.content.left,
            y: baseline,
            size,
            font,
            text: fitted,
        });
        self.cursor = baseline - size * 0.35;
    }

    /// Right-aligned text on the same baseline as the next `text_line`.
    pub(crate) fn text_right(&mut self, text: &str, size: f32, font: Font) {
        let width = text_width(text, size, font);
        self.current.ops.push(DrawOp::Text {
            x: (self.content.right - width).max(self.content.left),
            y: self.cursor - size,
            size,
            font,
            text: text.to_string(),
        });
    }

    pub(crate) fn text_at(&mut self, x: f32, y: f32, text: &str, size: f32, font: Font) {
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            size,
            font,
            text: text.to_string(),
        });
    }

    /// Full-width rule at the cursor.
    pub(crate) fn rule(&mut self, width: f32) {
        let y = self.cursor;
        self.current.ops.push(DrawOp::Line {
            x1: self.content.left,
            y1: y,
            x2: self.content.right,
            y2: y,
            width,
            gray: 0.0,
        });
    }

    /// Starts a continuation page unless `height` fits above the bottom
    /// margin.
    pub(crate) fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.content.bottom {
            self.break_page();
        }
    }

    /// Appends an itinerary row, breaking to a continuation page first when
    /// the row would cross the bottom margin.
    pub(crate) fn row(&mut self, row: Row) {
        self.ensure_room(ROW_HEIGHT);
        let bottom = self.cursor - ROW_HEIGHT;
        let left = self.content.left;
        match &row {
            Row::Checklist(label) => {
                let box_y = bottom + (ROW_HEIGHT - CHECKBOX_SIZE) / 2.0 - 2.0;
                self.current.ops.push(DrawOp::Rect {
                    x: left,
                    y: box_y,
                    width: CHECKBOX_SIZE,
                    height: CHECKBOX_SIZE,
                    line_width: 0.8,
                });
                let text_x = left + CHECKBOX_SIZE + CHECKBOX_GAP;
                let label = fit_text(label, BODY_SIZE, Font::Regular, self.content.right - text_x);
                self.current.ops.push(DrawOp::Text {
                    x: text_x,
                    y: box_y + 1.0,
                    size: BODY_SIZE,
                    font: Font::Regular,
                    text: label,
                });
            }
            Row::Ruled => {
                self.current.ops.push(DrawOp::Line {
                    x1: left,
                    y1: bottom + 2.0,
                    x2: self.content.right,
                    y2: bottom + 2.0,
                    width: 0.5,
                    gray: RULE_GRAY,
                });
            }
        }
        self.current.rows.push(row);
        self.cursor = bottom;
    }

    fn break_page(&mut self) {
        let next = Self::blank_page(self.kind, &self.heading, true);
        self.finished.push(std::mem::replace(&mut self.current, next));
        self.cursor = self.content.top;
        let heading = self.continued_heading.clone();
        self.text_line(&heading, SUBTITLE_SIZE, Font::Bold);
        self.rule(0.5);
        self.advance(SUBTITLE_SIZE * 0.5);
    }

    /// Finishes composition, returning the page and any continuation pages.
    pub(crate) fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }
}
