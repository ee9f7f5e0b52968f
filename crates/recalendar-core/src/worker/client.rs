//! Foreground half of the worker protocol.

use std::sync::Arc;

use log::{debug, info, warn};

use super::{spawn_worker, Renderer, RequestTracker, WorkerChannels, WorkerHealth};
use crate::{
    error::{CalendarError, Result},
    models::{GenerationRequest, GenerationResponse, RequestId},
};

/// Submits requests to the worker thread and receives its responses.
pub struct GenerationClient {
    renderer: Arc<dyn Renderer>,
    channels: Option<WorkerChannels>,
    tracker: RequestTracker,
    stopped: bool,
    next_id: u64,
}

impl GenerationClient {
    pub(crate) fn start(renderer: Arc<dyn Renderer>) -> Result<Self> {
        let channels = spawn_worker(Arc::clone(&renderer))?;
        Ok(Self {
            renderer,
            channels: Some(channels),
            tracker: RequestTracker::new(),
            stopped: false,
            next_id: 1,
        })
    }

    /// Hands out a fresh request id. Ids keep increasing across restarts.
    pub fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Current health of the background context.
    pub fn health(&self) -> WorkerHealth {
        match &self.channels {
            Some(channels) if !self.stopped && !channels.requests.is_closed() => {
                WorkerHealth::Running
            }
            _ => WorkerHealth::Stopped,
        }
    }

    /// True while a submitted request has not been answered.
    pub fn is_busy(&self) -> bool {
        self.tracker.is_busy()
    }

    /// Id of the request awaiting a response, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.tracker.in_flight()
    }

    /// Sends `request` to the worker without waiting for the result.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Busy` while another request is in flight and
    /// `CalendarError::WorkerUnavailable` when the worker has stopped.
    pub fn submit(&mut self, request: GenerationRequest) -> Result<RequestId> {
        if self.health() == WorkerHealth::Stopped {
            self.stopped = true;
            return Err(CalendarError::worker_unavailable(
                "worker has stopped; restart it before submitting",
            ));
        }
        let Some(channels) = &self.channels else {
            return Err(CalendarError::worker_unavailable("worker is shut down"));
        };

        let id = request.request_id;
        self.tracker.begin(id, request.is_preview)?;
        debug!("Submitting {} request {id}", request.scope());
        if channels.requests.send(request).is_err() {
            self.tracker.abandon();
            self.stopped = true;
            return Err(CalendarError::worker_unavailable(
                "worker stopped accepting requests",
            ));
        }
        Ok(id)
    }

    /// Stops waiting for the in-flight request. Its response is dropped as
    /// stale when it eventually arrives; the job itself is not interrupted.
    pub fn abandon(&mut self) -> Option<RequestId> {
        let abandoned = self.tracker.abandon().map(|(id, _)| id);
        if let Some(id) = abandoned {
            debug!("Abandoned request {id}");
        }
        abandoned
    }

    /// Waits for the response to the in-flight request.
    ///
    /// Responses for superseded requests are dropped. If the worker dies
    /// while a request is in flight, a failure response carrying that
    /// request's id is returned and the client is marked stopped.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_response(&mut self) -> Option<GenerationResponse> {
        while self.tracker.is_busy() {
            let received = match self.channels.as_mut() {
                Some(channels) => channels.responses.recv().await,
                None => None,
            };
            match received {
                Some(response) if self.tracker.accept(response.request_id) => {
                    return Some(response);
                }
                Some(response) => {
                    debug!(
                        "Dropping stale {} response {} (latest is {:?})",
                        response.scope(),
                        response.request_id,
                        self.tracker.latest()
                    );
                }
                None => {
                    self.stopped = true;
                    let (request_id, is_preview) = self.tracker.abandon()?;
                    warn!("Worker stopped while request {request_id} was in flight");
                    return Some(GenerationResponse {
                        request_id,
                        is_preview,
                        outcome: Err(CalendarError::worker_unavailable(
                            "worker stopped before responding",
                        )),
                    });
                }
            }
        }
        None
    }

    /// Replaces the background context with a fresh thread using the same
    /// renderer. Anything in flight is abandoned.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::WorkerUnavailable` if the new thread cannot be
    /// spawned.
    pub fn restart(&mut self) -> Result<()> {
        self.shutdown();
        self.channels = Some(spawn_worker(Arc::clone(&self.renderer))?);
        self.stopped = false;
        info!("Restarted generation worker");
        Ok(())
    }

    /// Closes the request channel and waits for the worker thread to exit.
    pub fn shutdown(&mut self) {
        self.tracker.abandon();
        let Some(WorkerChannels {
            requests,
            responses,
            thread,
        }) = self.channels.take()
        else {
            return;
        };
        drop(requests);
        if let Some(handle) = thread {
            if handle.join().is_err() {
                warn!("Worker thread terminated with a panic");
            }
        }
        drop(responses);
        self.stopped = true;
        info!("Stopped generation worker");
    }
}
