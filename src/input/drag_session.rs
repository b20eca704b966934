//! Drag session tracking for the move tool.
//!
//! A session remembers which element was grabbed and where inside it the
//! pointer landed. Each pointer move turns into a bounded target position;
//! the caller writes that position into the registry. At most one session
//! exists at a time.

use crate::input::coords::{Percent, clamp_point, clamp_rect_origin};
use crate::types::{ElementGeometry, ElementRef};

/// The element being dragged and the grab offset inside it
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: ElementRef,
    /// Pointer position minus element anchor at grab time
    pub grab_offset: Percent,
}

#[derive(Debug, Default)]
pub struct DragSessionManager {
    active: Option<DragSession>,
}

impl DragSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `target`, grabbed at `pointer`.
    ///
    /// A session left over from a gesture that never ended is replaced.
    pub fn begin(&mut self, target: ElementRef, pointer: Percent, geometry: &ElementGeometry) {
        if let Some(previous) = self.active.take() {
            tracing::warn!(target = ?previous.target, "Replacing drag session that never ended");
        }
        self.active = Some(DragSession {
            target,
            grab_offset: pointer.offset_from(geometry.origin()),
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    /// Bounded position for the dragged element under `pointer`.
    ///
    /// Point markers stay inside the container; rectangles keep their whole
    /// extent inside it. `geometry` is the element's current stored shape.
    pub fn target_position(&self, pointer: Percent, geometry: &ElementGeometry) -> Option<Percent> {
        let session = self.active.as_ref()?;
        let raw = pointer.offset_from(session.grab_offset);
        Some(match geometry {
            ElementGeometry::Point(_) => clamp_point(raw),
            ElementGeometry::Rect { width, height, .. } => clamp_rect_origin(raw, *width, *height),
        })
    }

    /// End the session on pointer release.
    ///
    /// Returns true if a drag was in progress, so the release must not also
    /// be treated as a click.
    pub fn end(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Stop the session where it is (pointer left the canvas). The last
    /// written position stays; nothing is rolled back.
    pub fn abort(&mut self) -> Option<DragSession> {
        self.active.take()
    }
}
