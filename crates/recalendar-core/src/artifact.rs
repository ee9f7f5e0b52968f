//! Lifetime management for generated documents.
//!
//! The [`ArtifactStore`] owns the single live preview document and the
//! [`DisplayHandle`] that refers to it. Publishing a new document revokes the
//! previous handle in the same step, so at most one handle ever resolves.
//! Full documents bypass the store and go straight to a [`SaveTarget`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::error::{CalendarError, Result};

/// File name used when saving a full document.
pub const DOWNLOAD_FILENAME: &str = "recalendar.pdf";

/// Opaque reference to a published preview document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayHandle {
    id: u64,
}

impl fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:recalendar/{}", self.id)
    }
}

struct LiveArtifact {
    handle: DisplayHandle,
    bytes: Arc<[u8]>,
}

/// Owner of the live preview artifact.
#[derive(Default)]
pub struct ArtifactStore {
    live: Option<LiveArtifact>,
    next_id: u64,
    revoked: u64,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `document`, revoking any previously published handle.
    pub fn publish(&mut self, document: Vec<u8>) -> DisplayHandle {
        self.revoke_live();
        self.next_id += 1;
        let handle = DisplayHandle { id: self.next_id };
        info!("Published preview {handle} ({} bytes)", document.len());
        self.live = Some(LiveArtifact {
            handle: handle.clone(),
            bytes: document.into(),
        });
        handle
    }

    /// Bytes behind `handle`, or `None` once it has been revoked.
    pub fn resolve(&self, handle: &DisplayHandle) -> Option<Arc<[u8]>> {
        self.live
            .as_ref()
            .filter(|live| live.handle == *handle)
            .map(|live| Arc::clone(&live.bytes))
    }

    /// The currently live handle, if any.
    pub fn live_handle(&self) -> Option<&DisplayHandle> {
        self.live.as_ref().map(|live| &live.handle)
    }

    /// Number of handles revoked so far.
    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }

    /// Revokes the live handle. Called when the owning surface goes away.
    pub fn teardown(&mut self) {
        self.revoke_live();
    }

    fn revoke_live(&mut self) {
        if let Some(previous) = self.live.take() {
            self.revoked += 1;
            debug!("Revoked preview {}", previous.handle);
        }
    }
}

impl Drop for ArtifactStore {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("live", &self.live_handle())
            .field("revoked", &self.revoked)
            .finish()
    }
}

/// Destination for full-document exports.
pub trait SaveTarget: Send {
    /// Stores `document` under `filename`, returning where it went.
    fn save(&mut self, filename: &str, document: &[u8]) -> Result<PathBuf>;
}

/// Saves documents into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySaveTarget {
    directory: PathBuf,
}

impl DirectorySaveTarget {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl SaveTarget for DirectorySaveTarget {
    fn save(&mut self, filename: &str, document: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).map_err(|e| CalendarError::FileSystem {
            path: self.directory.clone(),
            source: e,
        })?;
        let path = self.directory.join(filename);
        fs::write(&path, document).map_err(|e| CalendarError::FileSystem {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

/// One-shot export of a full document.
pub fn trigger_save(
    document: &[u8],
    filename: &str,
    target: &mut dyn SaveTarget,
) -> Result<PathBuf> {
    let path = target.save(filename, document)?;
    info!("Saved {} bytes to {}", document.len(), path.display());
    Ok(path)
}
