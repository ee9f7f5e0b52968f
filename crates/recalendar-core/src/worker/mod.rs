//! Background generation worker.
//!
//! Rendering runs on a dedicated OS thread so the foreground never blocks on
//! layout. Requests travel to the thread over a tokio channel and responses
//! come back on a second one, tagged with the originating [`RequestId`].
//!
//! [`GenerationClient`] is the foreground half. It enforces that at most one
//! request is in flight, drops responses for anything but the latest
//! submission, and reports a dead thread as [`CalendarError::WorkerUnavailable`]
//! until [`GenerationClient::restart`] brings up a fresh one.
//!
//! [`RequestId`]: crate::models::RequestId
//! [`CalendarError::WorkerUnavailable`]: crate::error::CalendarError::WorkerUnavailable

mod client;
mod tracker;

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub use client::GenerationClient;
pub use tracker::RequestTracker;

use crate::{
    error::{CalendarError, Result},
    layout::LayoutEngine,
    models::{GenerationRequest, GenerationResponse},
};

/// Name given to the background thread.
pub const WORKER_THREAD_NAME: &str = "recalendar-worker";

/// Produces a binary document from a request.
///
/// Implementations run on the worker thread and must not touch foreground
/// state; everything they need is in the request.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>>;
}

/// Whether the background context can accept work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerHealth {
    Running,
    Stopped,
}

impl fmt::Display for WorkerHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerHealth::Running => f.write_str("running"),
            WorkerHealth::Stopped => f.write_str("stopped"),
        }
    }
}

/// Channel ends held by the foreground for one worker thread.
pub(crate) struct WorkerChannels {
    pub(crate) requests: UnboundedSender<GenerationRequest>,
    pub(crate) responses: UnboundedReceiver<GenerationResponse>,
    pub(crate) thread: Option<JoinHandle<()>>,
}

/// Spawns a worker thread serving `renderer`.
pub(crate) fn spawn_worker(renderer: Arc<dyn Renderer>) -> Result<WorkerChannels> {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<GenerationRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<GenerationResponse>();

    let thread = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            debug!("Worker thread started");
            while let Some(request) = request_rx.blocking_recv() {
                debug!("Rendering {} request {}", request.scope(), request.request_id);
                let outcome = renderer.render(&request);
                let response = GenerationResponse {
                    request_id: request.request_id,
                    is_preview: request.is_preview,
                    outcome,
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
            debug!("Worker thread exiting");
        })
        .map_err(|e| CalendarError::worker_unavailable(format!("failed to spawn thread: {e}")))?;

    info!("Started generation worker");
    Ok(WorkerChannels {
        requests: request_tx,
        responses: response_rx,
        thread: Some(thread),
    })
}

/// Builder for [`GenerationClient`] instances.
#[derive(Clone)]
pub struct WorkerBuilder {
    renderer: Option<Arc<dyn Renderer>>,
}

impl WorkerBuilder {
    /// Creates a builder that renders with the default [`LayoutEngine`].
    pub fn new() -> Self {
        Self { renderer: None }
    }

    /// Sets the renderer the worker thread runs.
    pub fn with_renderer<R: Renderer>(mut self, renderer: R) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::WorkerUnavailable` if the thread cannot be
    /// spawned.
    pub fn build(self) -> Result<GenerationClient> {
        let renderer: Arc<dyn Renderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(LayoutEngine::default()),
        };
        GenerationClient::start(renderer)
    }
}

impl Default for WorkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WorkerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerBuilder")
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}
