//! Frame provider seam
//!
//! A provider turns `(item, frame index)` into encoded image bytes. It is
//! assumed idempotent, and it may be called from worker threads.

use std::fs;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{trace, warn};

use super::error::{FetchError, PreviewError};
use super::{Frame, FrameSequence, ItemId};

/// Produces the encoded bytes of one preview frame.
pub trait FrameProvider: Send + Sync {
    fn fetch_frame(&self, id: &ItemId, index: usize) -> Result<Vec<u8>, FetchError>;
}

/// A thread-safe, shared frame provider.
pub type SharedProvider = Arc<dyn FrameProvider>;

impl<F> FrameProvider for F
where
    F: Fn(&ItemId, usize) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn fetch_frame(&self, id: &ItemId, index: usize) -> Result<Vec<u8>, FetchError> {
        self(id, index)
    }
}

/// Fetch frames `0..frame_count` in index order.
///
/// The first failing frame aborts the whole attempt, so callers only ever
/// see complete sequences. A provider that panics counts as a failed frame.
pub fn fetch_sequence(
    provider: &dyn FrameProvider,
    id: &ItemId,
    frame_count: usize,
) -> Result<FrameSequence, PreviewError> {
    let mut frames = Vec::with_capacity(frame_count);
    for index in 0..frame_count {
        let bytes = fetch_frame_contained(provider, id, index).map_err(|source| {
            PreviewError::FrameFetch {
                id: id.clone(),
                index,
                source,
            }
        })?;
        trace!(item = %id, index, bytes = bytes.len(), "fetched preview frame");
        frames.push(Frame::new(index, bytes));
    }
    Ok(FrameSequence::new(frames))
}

fn fetch_frame_contained(
    provider: &dyn FrameProvider,
    id: &ItemId,
    index: usize,
) -> Result<Vec<u8>, FetchError> {
    match catch_unwind(AssertUnwindSafe(|| provider.fetch_frame(id, index))) {
        Ok(result) => result,
        Err(_) => {
            warn!(item = %id, index, "frame provider panicked");
            Err(FetchError::Provider("provider panicked".to_string()))
        }
    }
}

/// Serves frames from a directory tree laid out as `<root>/<item>/hq<N>.jpg`
/// where `N` is the one-based frame number.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a frame on disk
    pub fn frame_path(&self, id: &ItemId, index: usize) -> PathBuf {
        self.root
            .join(id.as_str())
            .join(format!("hq{}.jpg", index + 1))
    }
}

impl FrameProvider for DirectoryProvider {
    fn fetch_frame(&self, id: &ItemId, index: usize) -> Result<Vec<u8>, FetchError> {
        let path = self.frame_path(id, index);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound { path });
            }
            Err(e) => return Err(FetchError::Io(e)),
        };
        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(bytes)
    }
}
