mod common;

use std::collections::BTreeMap;

use jiff::civil::Date;
use recalendar_core::{
    layout::{Page, PageKind},
    CalendarError, CalendarState, Document, EntryKind, ItineraryEntry, ItineraryTarget,
    LayoutConfig, LayoutEngine, Locale, Margins, RequestId, Weekday,
};

fn layout(state: &CalendarState, is_preview: bool) -> Document {
    let request = state
        .snapshot(RequestId(1), is_preview)
        .expect("Failed to snapshot state");
    LayoutEngine::default()
        .layout(&request)
        .expect("Failed to lay out document")
}

/// Checklist labels of the first page of every day, keyed by date.
fn labels_by_date(document: &Document) -> BTreeMap<Date, Vec<String>> {
    document
        .sections
        .iter()
        .flat_map(|section| section.day_pages())
        .map(|page| {
            let PageKind::Day { date, .. } = page.kind else {
                unreachable!("day_pages only yields day pages");
            };
            let labels = page.checklist_labels().into_iter().map(String::from).collect();
            (date, labels)
        })
        .collect()
}

#[test]
fn test_three_month_scenario() {
    let document = layout(&common::scenario_state(), false);

    let titles: Vec<&str> = document.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["October 2024", "November 2024", "December 2024"]);

    let day_counts: Vec<usize> = document
        .sections
        .iter()
        .map(|section| section.day_pages().count())
        .collect();
    assert_eq!(day_counts, vec![31, 30, 31]);

    for section in &document.sections {
        let overview = section.overview().expect("overview enabled");
        assert_eq!(overview.checklist_labels(), vec!["Buy books"]);
        assert!(section.day_pages().all(|page| page.rows.is_empty()));
    }
}

#[test]
fn test_preview_covers_first_month_only() {
    let document = layout(&common::scenario_state(), true);
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].title, "October 2024");
    assert_eq!(document.sections[0].day_pages().count(), 31);
}

#[test]
fn test_section_count_matches_month_count() {
    let mut state = common::scenario_state();
    for count in 1..=12 {
        state.set_month_count(count).unwrap();
        assert_eq!(layout(&state, false).sections.len(), count as usize);
        assert_eq!(layout(&state, true).sections.len(), 1);
    }
}

#[test]
fn test_disabled_overview_omits_overview_pages() {
    let mut state = common::scenario_state();
    state.set_month_overview_enabled(false);
    let document = layout(&state, false);
    assert!(document.sections.iter().all(|s| s.overview().is_none()));
    assert!(document
        .pages()
        .all(|page| matches!(page.kind, PageKind::Day { .. })));
}

#[test]
fn test_day_itinerary_follows_weekday_across_months() {
    let mut state = common::scenario_state();
    state.set_month_count(12).unwrap();
    for weekday in Weekday::ALL {
        state
            .upsert_entry(
                ItineraryTarget::Day(weekday),
                0,
                ItineraryEntry::Item(format!("slot {}", weekday.index())),
            )
            .unwrap();
    }
    let document = layout(&state, false);

    let mut per_weekday = [0usize; 7];
    for page in document.sections.iter().flat_map(|s| s.day_pages()) {
        let PageKind::Day { weekday, .. } = page.kind else {
            unreachable!();
        };
        per_weekday[weekday.index()] += 1;
        let expected = format!("slot {}", weekday.index());
        assert_eq!(page.checklist_labels(), vec![expected.as_str()], "{}", page.heading);
    }
    // October 2024 through September 2025: 365 days starting on a Tuesday
    assert_eq!(per_weekday, [52, 53, 52, 52, 52, 52, 52]);
}

#[test]
fn test_language_change_keeps_entries_on_same_dates() {
    let mut state = common::scenario_state();
    state
        .upsert_entry(
            ItineraryTarget::Day(Weekday::Sunday),
            0,
            ItineraryEntry::Item("Call home".to_string()),
        )
        .unwrap();
    state
        .upsert_entry(
            ItineraryTarget::Day(Weekday::Monday),
            0,
            ItineraryEntry::Item("Plan the week".to_string()),
        )
        .unwrap();

    let english = labels_by_date(&layout(&state, false));
    for locale in [Locale::EnglishUs, Locale::Polish] {
        state.set_language(locale);
        assert_eq!(labels_by_date(&layout(&state, false)), english, "{locale}");
    }

    let sunday = Date::new(2024, 10, 6).unwrap();
    assert_eq!(english[&sunday], vec!["Call home"]);
}

#[test]
fn test_polish_headings() {
    let mut state = common::scenario_state();
    state.set_language(Locale::Polish);
    let document = layout(&state, true);
    let section = &document.sections[0];
    assert_eq!(section.title, "Październik 2024");

    let first_day: &Page = section.day_pages().next().unwrap();
    assert_eq!(first_day.heading, "Wtorek, 1 października 2024");
}

#[test]
fn test_blank_entries_render() {
    let mut state = common::scenario_state();
    state.append_entry(ItineraryTarget::Month, EntryKind::Item);
    state.append_entry(ItineraryTarget::Month, EntryKind::Lines);
    let document = layout(&state, true);

    let overview = document.sections[0].overview().unwrap();
    assert_eq!(overview.checklist_labels(), vec!["Buy books", ""]);
    assert_eq!(overview.ruled_row_count(), 0);
}

#[test]
fn test_rendering_is_deterministic() {
    let state = common::scenario_state();
    let request = state.snapshot(RequestId(9), false).unwrap();
    let engine = LayoutEngine::default();
    let first = engine.render_document(&request).unwrap();
    let second = engine.render_document(&request).unwrap();
    assert!(first.starts_with(b"%PDF-"));
    assert_eq!(first, second);
}

#[test]
fn test_margins_leaving_no_room_fail() {
    let engine = LayoutEngine::new(LayoutConfig {
        margins: Margins::uniform(1000.0),
        ..LayoutConfig::default()
    });
    let request = common::scenario_state()
        .snapshot(RequestId(1), true)
        .unwrap();
    let error = engine.layout(&request).unwrap_err();
    assert!(matches!(error, CalendarError::Layout { .. }));
}

#[test]
fn test_year_past_civil_range_fails_at_generation() {
    let mut state = common::scenario_state();
    state.set_year(9999);
    state.set_start_month(11).unwrap();
    state.set_month_count(2).unwrap();
    let request = state.snapshot(RequestId(1), false).unwrap();

    let error = LayoutEngine::default().layout(&request).unwrap_err();
    assert!(matches!(error, CalendarError::Date { .. }));
    assert!(!error.is_validation());
}

#[test]
fn test_preview_only_needs_first_month_in_range() {
    let mut state = common::scenario_state();
    state.set_year(9999);
    state.set_start_month(11).unwrap();
    state.set_month_count(2).unwrap();
    let request = state.snapshot(RequestId(1), true).unwrap();

    let document = LayoutEngine::default().layout(&request).unwrap();
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].title, "December 9999");
}
