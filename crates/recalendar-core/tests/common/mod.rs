#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
};

use recalendar_core::{
    CalendarError, CalendarState, DirectorySaveTarget, GenerationClient, GenerationRequest,
    GenerationSession, ItineraryEntry, ItineraryTarget, Renderer, Result, SessionObserver,
    WorkerBuilder,
};
use tempfile::TempDir;

/// 2024, starting October, three months, overview on, "Buy books" on the
/// month itinerary.
pub fn scenario_state() -> CalendarState {
    let mut state = CalendarState::default();
    state.set_year(2024);
    state.set_start_month(9).expect("valid start month");
    state.set_month_count(3).expect("valid month count");
    state.set_month_overview_enabled(true);
    state
        .upsert_entry(
            ItineraryTarget::Month,
            0,
            ItineraryEntry::Item("Buy books".to_string()),
        )
        .expect("valid entry");
    state
}

/// Session over `state` saving into a fresh temp dir, rendering with the
/// default layout engine.
pub fn create_test_session(state: CalendarState) -> (TempDir, GenerationSession) {
    let client = WorkerBuilder::new().build().expect("Failed to start worker");
    create_session_with_client(state, client)
}

pub fn create_session_with_client(
    state: CalendarState,
    client: GenerationClient,
) -> (TempDir, GenerationSession) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = DirectorySaveTarget::new(temp_dir.path());
    (temp_dir, GenerationSession::new(state, client, target))
}

/// Records observer notifications as short strings.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl SessionObserver for RecordingObserver {
    fn state_changed(&mut self, state: recalendar_core::GenerationState) {
        self.push(format!("state:{state}"));
    }

    fn preview_ready(&mut self, handle: &recalendar_core::DisplayHandle, document: &[u8]) {
        self.push(format!("preview:{handle}:{}", document.len()));
    }

    fn document_saved(&mut self, path: &std::path::Path) {
        self.push(format!("saved:{}", path.display()));
    }

    fn generation_failed(&mut self, is_preview: bool, _error: &CalendarError) {
        self.push(format!("failed:{}", if is_preview { "preview" } else { "full" }));
    }
}

/// Returns a fixed document after waiting for a release signal per request.
pub struct GatedRenderer {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedRenderer {
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (Self { gate: Mutex::new(rx) }, tx)
    }
}

impl Renderer for GatedRenderer {
    fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        self.gate
            .lock()
            .unwrap()
            .recv()
            .map_err(|_| CalendarError::layout("gate closed"))?;
        Ok(format!("document {}", request.request_id).into_bytes())
    }
}

/// Always fails with a layout error.
pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, _request: &GenerationRequest) -> Result<Vec<u8>> {
        Err(CalendarError::layout("renderer refused"))
    }
}

/// Panics on the first request only.
#[derive(Default)]
pub struct PanicOnceRenderer {
    panicked: AtomicBool,
}

impl Renderer for PanicOnceRenderer {
    fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("renderer crashed");
        }
        Ok(format!("document {}", request.request_id).into_bytes())
    }
}

/// Keeps a copy of every request it renders.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub seen: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(b"%PDF-recorded".to_vec())
    }
}
