//! Serializes a laid-out [`Document`] into PDF bytes.
//!
//! Output contains no info dictionary, timestamps or file identifiers, so
//! identical documents always serialize to identical bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::page::{Document, DrawOp, Font, Page};
use super::text::encode_win_ansi;
use crate::error::{CalendarError, Result};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const WIN_ANSI: Name<'static> = Name(b"WinAnsiEncoding");

/// Hands out sequential object references.
struct RefAllocator {
    next: i32,
}

impl RefAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

/// Writes every page of `document` in order.
///
/// # Errors
///
/// Returns `CalendarError::Layout` for an empty document.
pub fn write_pdf(document: &Document) -> Result<Vec<u8>> {
    let page_count = document.page_count();
    if page_count == 0 {
        return Err(CalendarError::layout("document has no pages"));
    }
    let page_total = i32::try_from(page_count)
        .map_err(|_| CalendarError::layout(format!("too many pages: {page_count}")))?;

    let mut refs = RefAllocator::new();
    let catalog_id = refs.bump();
    let tree_id = refs.bump();
    let regular_id = refs.bump();
    let bold_id = refs.bump();
    let page_refs: Vec<(Ref, Ref)> = (0..page_count)
        .map(|_| (refs.bump(), refs.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(page_total);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(WIN_ANSI);
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(WIN_ANSI);

    let media_box = Rect::new(0.0, 0.0, document.width, document.height);
    for (page, (page_id, content_id)) in document.pages().zip(&page_refs) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(media_box);
        writer.parent(tree_id);
        writer.contents(*content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        writer.finish();

        pdf.stream(*content_id, &page_content(page));
    }

    Ok(pdf.finish())
}

fn font_name(font: Font) -> Name<'static> {
    match font {
        Font::Regular => REGULAR_FONT,
        Font::Bold => BOLD_FONT,
    }
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                text,
            } => {
                let encoded = encode_win_ansi(text);
                content.begin_text();
                content.set_font(font_name(*font), *size);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *x, *y]);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                gray,
            } => {
                content.save_state();
                content.set_line_width(*width);
                content.set_stroke_gray(*gray);
                content.move_to(*x1, *y1);
                content.line_to(*x2, *y2);
                content.stroke();
                content.restore_state();
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                line_width,
            } => {
                content.save_state();
                content.set_line_width(*line_width);
                content.rect(*x, *y, *width, *height);
                content.stroke();
                content.restore_state();
            }
        }
    }
    content.finish()
}
