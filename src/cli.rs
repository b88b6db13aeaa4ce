//! CLI definitions for HVP
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::preview::Size;

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Parse a `WIDTHxHEIGHT` pair such as `1280x720`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: f64 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", w))?;
    let height: f64 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", h))?;
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(format!("size must be positive, got '{}'", s));
    }
    Ok(Size::new(width, height))
}

#[derive(Parser)]
#[command(name = "hvp")]
#[command(about = "[ Hover Preview ] - debounced, cached, animated thumbnail previews")]
#[command(
    long_about = "Hover Preview (HVP) - animated thumbnail previews on pointer hover.

HVP models the preview behaviour of a thumbnail grid: hovering an item for a
moment loads a short sequence of frames, caches it, and animates it in an
overlay that stays inside the viewport. The commands here replay recorded
hover traces against that engine and expose its helpers.

QUICK START:
    hvp replay trace.ndjson --frames ./frames    Replay a hover trace
    hvp position --x 950 --y 780                  Where would the overlay go?
    hvp storyboard PT4M13S                        Frame timestamps for a video
    hvp config show                               Show effective settings

Logging goes to stderr; set HVP_LOG (e.g. HVP_LOG=debug) to see more."
)]
#[command(version)]
pub struct Cli {
    /// Use this config file instead of ~/.config/hvp/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a hover trace and print every surface call
    #[command(long_about = "Replay a hover trace against the preview engine.

The trace is NDJSON, one event per line, with absolute millisecond timestamps:
    [0,\"resize\",1280,720]
    [100,\"move\",400,300]
    [120,\"enter\",\"dQw4w9WgXcQ\"]
    [2500,\"leave\",\"dQw4w9WgXcQ\"]
    [2600,\"tick\"]

Frames are read from <frames>/<item>/hq1.jpg, hq2.jpg, ... Time is virtual:
timers fire exactly at their deadlines, so output is reproducible.

EXAMPLES:
    hvp replay trace.ndjson --frames ./frames
    hvp replay trace.ndjson --frames ./frames --viewport 1280x720 --workers 0")]
    Replay {
        /// Path to the NDJSON hover trace
        #[arg(help = "Path to the NDJSON hover trace")]
        trace: PathBuf,
        /// Directory holding <item>/hq<N>.jpg frames
        #[arg(long, help = "Directory holding <item>/hq<N>.jpg frames")]
        frames: PathBuf,
        /// Initial viewport size
        #[arg(long, value_parser = parse_size, value_name = "WxH")]
        viewport: Option<Size>,
        /// Worker threads for frame loading (0 = inline)
        #[arg(long, help = "Worker threads for frame loading (0 = inline)")]
        workers: Option<usize>,
    },

    /// Compute where the preview overlay is placed
    #[command(long_about = "Compute the overlay position for a pointer location.

The overlay is placed below and to the right of the pointer, offset by the
margin, and flipped to the other side on each axis where it would leave the
viewport.

EXAMPLES:
    hvp position --x 100 --y 100
    hvp position --x 950 --y 780 --viewport 1000x800 --size 320x180")]
    Position {
        /// Pointer x coordinate
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Pointer y coordinate
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Viewport size
        #[arg(long, value_parser = parse_size, value_name = "WxH", default_value = "1920x1080")]
        viewport: Size,
        /// Overlay size (defaults to the configured preview size)
        #[arg(long, value_parser = parse_size, value_name = "WxH")]
        size: Option<Size>,
        /// Gap between pointer and overlay (defaults to the configured margin)
        #[arg(long)]
        margin: Option<f64>,
    },

    /// Show storyboard frame timestamps for an ISO 8601 duration
    #[command(long_about = "Spread preview frames evenly over a video's duration.

Takes an ISO 8601 duration such as PT1H2M3S and prints the timestamp and
progress of each frame.

EXAMPLES:
    hvp storyboard PT4M13S
    hvp storyboard PT1H --frames 10")]
    Storyboard {
        /// ISO 8601 duration (e.g. PT4M13S)
        #[arg(help = "ISO 8601 duration (e.g. PT4M13S)")]
        duration: String,
        /// Number of frames (defaults to the configured frame count)
        #[arg(long)]
        frames: Option<usize>,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and manage the HVP configuration.

Config file location: ~/.config/hvp/config.toml

EXAMPLES:
    hvp config show          Display current configuration
    hvp config path          Print the config file location
    hvp config init          Write a config file with defaults"
    )]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Option<CompletionShell>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Missing settings are shown with their defaults.

EXAMPLE:
    hvp config show")]
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default settings
    #[command(long_about = "Write a config file holding every default setting.

An existing file is left alone unless --force is given.

EXAMPLE:
    hvp config init
    hvp config init --force")]
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
