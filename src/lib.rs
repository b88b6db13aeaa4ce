//! Hover Preview (HVP) Library
//!
//! Animated thumbnail previews for pointer hovers: a debounced hover
//! session, a bounded frame cache, background frame loading, an interval
//! animation and viewport-aware overlay placement, all driven by an
//! injected clock.

pub mod cli;
pub mod config;
pub mod preview;
pub mod storyboard;
pub mod trace;

pub use config::{Config, FeatureFlag, SettingsStore};
pub use preview::{
    DirectoryProvider, Frame, FrameProvider, FrameSequence, ItemId, LoaderMode, ManualClock,
    Phase, PreviewController, PreviewError, RecordingSurface, Surface, SystemClock,
};
pub use trace::{HoverTrace, Replayer};
