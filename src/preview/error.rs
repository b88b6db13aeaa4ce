//! Preview loading errors.

use std::path::PathBuf;

use super::ItemId;

/// A frame provider could not produce one frame.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Frame not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Frame is empty")]
    Empty,

    #[error("Failed to read frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Provider(String),
}

/// Errors surfaced by the preview core.
///
/// None of these are fatal: a failed load shows a placeholder and is
/// retried while the item stays hovered.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to fetch frame {index} of '{id}': {source}")]
    FrameFetch {
        id: ItemId,
        index: usize,
        #[source]
        source: FetchError,
    },

    #[error("Preview workers have exited; '{id}' cannot be loaded")]
    WorkersExited { id: ItemId },

    #[error("Invalid preview configuration: {0}")]
    InvalidConfig(String),
}
