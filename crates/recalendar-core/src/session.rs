//! Foreground controller tying state, worker and artifacts together.
//!
//! A [`GenerationSession`] snapshots the live [`CalendarState`] into a
//! request, hands it to the worker, and routes the answer: previews are
//! published through the [`ArtifactStore`], full documents are saved through
//! the [`SaveTarget`]. A [`SessionObserver`] hears about every state change.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::{
    artifact::{trigger_save, ArtifactStore, DisplayHandle, SaveTarget, DOWNLOAD_FILENAME},
    error::{CalendarError, Result},
    models::{GenerationResponse, RequestId},
    state::CalendarState,
    worker::{GenerationClient, WorkerHealth},
};

/// What the session is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    GeneratingPreview,
    GeneratingFull,
}

impl GenerationState {
    fn generating(is_preview: bool) -> Self {
        if is_preview {
            GenerationState::GeneratingPreview
        } else {
            GenerationState::GeneratingFull
        }
    }

    pub fn is_busy(self) -> bool {
        self != GenerationState::Idle
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationState::Idle => f.write_str("idle"),
            GenerationState::GeneratingPreview => f.write_str("generating preview"),
            GenerationState::GeneratingFull => f.write_str("generating full document"),
        }
    }
}

/// Receives session notifications. Every method defaults to doing nothing.
pub trait SessionObserver: Send {
    fn state_changed(&mut self, _state: GenerationState) {}

    fn preview_ready(&mut self, _handle: &DisplayHandle, _document: &[u8]) {}

    fn document_saved(&mut self, _path: &Path) {}

    fn generation_failed(&mut self, _is_preview: bool, _error: &CalendarError) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Result of one processed response.
#[derive(Debug)]
pub enum GenerationOutcome {
    Preview {
        request_id: RequestId,
        handle: DisplayHandle,
    },
    Saved {
        request_id: RequestId,
        path: PathBuf,
    },
    Failed {
        request_id: RequestId,
        is_preview: bool,
        error: CalendarError,
    },
}

impl GenerationOutcome {
    pub fn request_id(&self) -> RequestId {
        match self {
            GenerationOutcome::Preview { request_id, .. }
            | GenerationOutcome::Saved { request_id, .. }
            | GenerationOutcome::Failed { request_id, .. } => *request_id,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GenerationOutcome::Failed { .. })
    }
}

/// Drives generation for one editing surface.
pub struct GenerationSession {
    state: CalendarState,
    client: GenerationClient,
    artifacts: ArtifactStore,
    save_target: Box<dyn SaveTarget>,
    observer: Box<dyn SessionObserver>,
    generation_state: GenerationState,
}

impl GenerationSession {
    pub fn new<T: SaveTarget + 'static>(
        state: CalendarState,
        client: GenerationClient,
        save_target: T,
    ) -> Self {
        Self {
            state,
            client,
            artifacts: ArtifactStore::new(),
            save_target: Box::new(save_target),
            observer: Box::new(NoopObserver),
            generation_state: GenerationState::Idle,
        }
    }

    /// Replaces the observer.
    pub fn with_observer<O: SessionObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Live state for editing. Edits never affect a request already
    /// submitted.
    pub fn state_mut(&mut self) -> &mut CalendarState {
        &mut self.state
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn generation_state(&self) -> GenerationState {
        self.generation_state
    }

    pub fn worker_health(&self) -> WorkerHealth {
        self.client.health()
    }

    /// Brings up a fresh worker after a boundary failure.
    pub fn restart_worker(&mut self) -> Result<()> {
        self.client.restart()?;
        self.set_generation_state(GenerationState::Idle);
        Ok(())
    }

    /// Snapshots the current state and submits it.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidInput` when the state does not
    /// validate, `CalendarError::Busy` while a request is in flight and
    /// `CalendarError::WorkerUnavailable` when the worker has stopped. Nothing
    /// is submitted in any of these cases.
    pub fn request_generation(&mut self, is_preview: bool) -> Result<RequestId> {
        if let Some(current) = self.client.in_flight() {
            return Err(CalendarError::Busy { id: current.0 });
        }
        let request_id = self.client.next_request_id();
        let request = self.state.snapshot(request_id, is_preview)?;
        self.client.submit(request)?;
        self.set_generation_state(GenerationState::generating(is_preview));
        Ok(request_id)
    }

    /// Waits for the in-flight request and routes its result.
    ///
    /// Returns `None` when nothing is in flight. The session is idle again
    /// afterwards whether the request succeeded or failed.
    pub async fn process_next(&mut self) -> Option<GenerationOutcome> {
        let response = self.client.next_response().await?;
        let outcome = self.route(response);
        self.set_generation_state(GenerationState::Idle);
        Some(outcome)
    }

    /// Submits a request and waits for its outcome.
    pub async fn generate(&mut self, is_preview: bool) -> Result<GenerationOutcome> {
        let request_id = self.request_generation(is_preview)?;
        self.process_next().await.ok_or_else(|| {
            CalendarError::worker_unavailable(format!("no response for request {request_id}"))
        })
    }

    /// Revokes the live preview and stops the worker.
    pub fn teardown(&mut self) {
        self.artifacts.teardown();
        self.client.shutdown();
        self.set_generation_state(GenerationState::Idle);
    }

    fn route(&mut self, response: GenerationResponse) -> GenerationOutcome {
        let GenerationResponse {
            request_id,
            is_preview,
            outcome,
        } = response;

        let result = outcome.and_then(|document| {
            if is_preview {
                let handle = self.artifacts.publish(document);
                if let Some(bytes) = self.artifacts.resolve(&handle) {
                    self.observer.preview_ready(&handle, &bytes);
                }
                Ok(GenerationOutcome::Preview { request_id, handle })
            } else {
                let path = trigger_save(&document, DOWNLOAD_FILENAME, &mut *self.save_target)?;
                self.observer.document_saved(&path);
                Ok(GenerationOutcome::Saved { request_id, path })
            }
        });

        result.unwrap_or_else(|e| {
            error!("Request {request_id} failed: {e}");
            self.observer.generation_failed(is_preview, &e);
            GenerationOutcome::Failed {
                request_id,
                is_preview,
                error: e,
            }
        })
    }

    fn set_generation_state(&mut self, state: GenerationState) {
        if self.generation_state != state {
            info!("Session is {state}");
            self.generation_state = state;
            self.observer.state_changed(state);
        }
    }
}

impl fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationSession")
            .field("state", &self.state)
            .field("artifacts", &self.artifacts)
            .field("generation_state", &self.generation_state)
            .field("worker_health", &self.client.health())
            .finish()
    }
}
