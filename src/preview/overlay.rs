//! Overlay positioning
//!
//! Places the preview surface next to the pointer and flips it to the
//! other side of the pointer on any axis where it would leave the viewport.
//! Axes flip independently and nothing is clamped, so an overlay larger
//! than the viewport can still overflow.

use std::fmt;

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where the overlay sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl fmt::Display for OverlayRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Compute the overlay origin for a pointer position.
///
/// Default placement is `margin` below and to the right of the pointer.
/// If that overflows the right edge the overlay moves to the left of the
/// pointer; if it overflows the bottom edge it moves above.
pub fn position_overlay(pointer: Point, overlay: Size, viewport: Size, margin: f64) -> Point {
    let mut x = pointer.x + margin;
    let mut y = pointer.y + margin;

    if x + overlay.width > viewport.width {
        x = pointer.x - overlay.width - margin;
    }
    if y + overlay.height > viewport.height {
        y = pointer.y - overlay.height - margin;
    }

    Point::new(x, y)
}

/// Fixed-size overlay placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPositioner {
    size: Size,
    margin: f64,
}

impl OverlayPositioner {
    pub fn new(size: Size, margin: f64) -> Self {
        Self { size, margin }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Overlay rectangle for the pointer inside `viewport`.
    pub fn place(&self, pointer: Point, viewport: Size) -> OverlayRect {
        let origin = position_overlay(pointer, self.size, viewport, self.margin);
        OverlayRect {
            x: origin.x,
            y: origin.y,
            width: self.size.width,
            height: self.size.height,
        }
    }
}
