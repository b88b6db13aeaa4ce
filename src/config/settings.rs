//! Settings store seam
//!
//! The controller asks the settings store whether previews are enabled
//! once per pointer-enter, so a host can switch the feature off at runtime
//! without rebuilding the controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::PreviewConfig;

/// Supplies the preview on/off switch.
pub trait SettingsStore {
    fn preview_enabled(&self) -> bool;
}

impl SettingsStore for bool {
    fn preview_enabled(&self) -> bool {
        *self
    }
}

impl SettingsStore for PreviewConfig {
    fn preview_enabled(&self) -> bool {
        self.enabled
    }
}

/// Shareable runtime toggle. Clones flip the same switch.
#[derive(Debug, Clone)]
pub struct FeatureFlag(Arc<AtomicBool>);

impl FeatureFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

impl SettingsStore for FeatureFlag {
    fn preview_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
