//! Coordinate conversion utilities for canvas interactions.
//!
//! Stored geometry lives in percentage space (0-100 on both axes) relative to
//! the rendered container. Pointer events arrive in client pixels. Every
//! conversion takes the container rectangle measured for that event, so a
//! resize between events never leaves a stale projection behind.

use crate::constants::{PERCENT_MAX, PERCENT_MIN};

/// A position in client pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position in percentage space of the container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percent {
    pub x: f64,
    pub y: f64,
}

impl Percent {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise difference, used for grab offsets
    #[inline]
    pub fn offset_from(self, anchor: Percent) -> Percent {
        Percent::new(self.x - anchor.x, self.y - anchor.y)
    }

    #[inline]
    pub fn distance_to(self, other: Percent) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Live bounding rectangle of the rendering container, in client pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A collapsed or not-yet-laid-out container cannot be projected onto
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a client position to percentage space.
    ///
    /// Returns `None` for a degenerate container. The result is not clamped:
    /// pointers outside the container map outside 0-100.
    #[inline]
    pub fn to_percent(point: PixelPoint, rect: &ContainerRect) -> Option<Percent> {
        if rect.is_degenerate() {
            return None;
        }
        Some(Percent::new(
            (point.x - rect.left) / rect.width * 100.0,
            (point.y - rect.top) / rect.height * 100.0,
        ))
    }

    /// Convert a percentage position back to client pixels
    #[inline]
    pub fn to_pixel(percent: Percent, rect: &ContainerRect) -> PixelPoint {
        PixelPoint::new(
            rect.left + percent.x / 100.0 * rect.width,
            rect.top + percent.y / 100.0 * rect.height,
        )
    }
}

/// Clamp a point marker into the container
#[inline]
pub fn clamp_point(position: Percent) -> Percent {
    Percent::new(
        position.x.clamp(PERCENT_MIN, PERCENT_MAX),
        position.y.clamp(PERCENT_MIN, PERCENT_MAX),
    )
}

/// Clamp a rectangle's top-left corner so the whole rectangle stays inside.
///
/// A rectangle wider or taller than the container is pinned at 0.
#[inline]
pub fn clamp_rect_origin(origin: Percent, width: f64, height: f64) -> Percent {
    let max_x = (PERCENT_MAX - width).max(PERCENT_MIN);
    let max_y = (PERCENT_MAX - height).max(PERCENT_MIN);
    Percent::new(
        origin.x.clamp(PERCENT_MIN, max_x),
        origin.y.clamp(PERCENT_MIN, max_y),
    )
}
