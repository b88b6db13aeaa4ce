//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::preview::{LoaderMode, PreviewError, Size};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Hover preview tuning. Read once when a controller is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Global toggle for hover previews
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Number of frames in every preview sequence
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
    /// How long the pointer must rest on an item before loading starts
    #[serde(default = "default_hover_delay_ms")]
    pub hover_delay_ms: u64,
    /// Time between animation frames
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_preview_width")]
    pub preview_width: u32,
    #[serde(default = "default_preview_height")]
    pub preview_height: u32,
    /// Maximum number of cached frame sequences
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Delay before a failed load is retried
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Gap between the pointer and the overlay
    #[serde(default = "default_overlay_margin")]
    pub overlay_margin: u32,
}

pub fn default_enabled() -> bool {
    true
}

pub fn default_frame_count() -> usize {
    6
}

pub fn default_hover_delay_ms() -> u64 {
    500
}

pub fn default_frame_interval_ms() -> u64 {
    800
}

pub fn default_preview_width() -> u32 {
    320
}

pub fn default_preview_height() -> u32 {
    180
}

pub fn default_cache_capacity() -> usize {
    20
}

pub fn default_retry_delay_ms() -> u64 {
    5000
}

pub fn default_overlay_margin() -> u32 {
    20
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            frame_count: default_frame_count(),
            hover_delay_ms: default_hover_delay_ms(),
            frame_interval_ms: default_frame_interval_ms(),
            preview_width: default_preview_width(),
            preview_height: default_preview_height(),
            cache_capacity: default_cache_capacity(),
            retry_delay_ms: default_retry_delay_ms(),
            overlay_margin: default_overlay_margin(),
        }
    }
}

impl PreviewConfig {
    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Overlay size in viewport units
    pub fn preview_size(&self) -> Size {
        Size::new(f64::from(self.preview_width), f64::from(self.preview_height))
    }

    /// Reject values the preview core cannot run with.
    pub fn validate(&self) -> Result<(), PreviewError> {
        if self.frame_count == 0 {
            return Err(PreviewError::InvalidConfig(
                "preview.frame_count must be > 0".to_string(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(PreviewError::InvalidConfig(
                "preview.cache_capacity must be > 0".to_string(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(PreviewError::InvalidConfig(
                "preview.frame_interval_ms must be > 0".to_string(),
            ));
        }
        if self.preview_width == 0 || self.preview_height == 0 {
            return Err(PreviewError::InvalidConfig(format!(
                "preview size must be non-zero, got {}x{}",
                self.preview_width, self.preview_height
            )));
        }
        Ok(())
    }
}

/// Background loading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Worker threads fetching frames (0 = load on the caller's thread)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

pub fn default_workers() -> usize {
    crate::preview::loader::DEFAULT_POOL_SIZE
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl LoaderConfig {
    pub fn mode(&self) -> LoaderMode {
        LoaderMode::from_workers(self.workers)
    }
}
