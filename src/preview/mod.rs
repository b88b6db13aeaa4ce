//! Hover-triggered preview frames
//!
//! When the pointer lingers over an item, the controller lazily fetches a
//! fixed-size sequence of preview frames, keeps it in a bounded cache and
//! animates it in an overlay positioned near the pointer.
//!
//! Leaves first:
//! - `cache`: bounded id -> frame sequence store with insertion-order eviction
//! - `loader`: all-or-nothing sequence fetching, inline or on a worker pool
//! - `session`: the single hover state machine
//! - `animation`: periodic frame advance with coalesced rendering
//! - `overlay`: viewport-safe placement of the preview surface
//! - `controller`: wires the above to pointer events and a clock

pub mod animation;
pub mod cache;
pub mod controller;
pub mod error;
pub mod loader;
pub mod overlay;
pub mod provider;
pub mod session;
pub mod surface;
pub mod timer;

use std::fmt;
use std::sync::Arc;

pub use animation::AnimationScheduler;
pub use cache::FrameCache;
pub use controller::{PreviewController, TimerEvent};
pub use error::{FetchError, PreviewError};
pub use loader::{FrameLoader, LoadOutcome, LoaderMode, RequestStatus};
pub use overlay::{position_overlay, OverlayPositioner, OverlayRect, Point, Size};
pub use provider::{fetch_sequence, DirectoryProvider, FrameProvider, SharedProvider};
pub use session::{HoverSession, Phase, SessionState};
pub use surface::{RecordingSurface, Surface, SurfaceEvent};
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};

/// Opaque key identifying a preview-able item. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Arc<str>);

impl ItemId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single preview image as delivered by the frame provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    index: usize,
    bytes: Arc<[u8]>,
}

impl Frame {
    pub fn new(index: usize, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            index,
            bytes: bytes.into(),
        }
    }

    /// Position of this frame within its sequence
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ordered, fully loaded preview frames for one item.
///
/// Immutable once built and cheap to clone. Only complete sequences are
/// ever constructed by the loader, so a cached sequence always holds
/// exactly the configured frame count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Arc<[Frame]>,
}

impl FrameSequence {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Sum of encoded frame sizes in bytes
    pub fn total_bytes(&self) -> u64 {
        self.frames.iter().map(|f| f.len() as u64).sum()
    }
}
