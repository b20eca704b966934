//! Canvas transformations - pointer and element coordinate conversion.

use crate::editor::Editor;
use crate::input::PointerEvent;
use crate::input::coords::{ContainerRect, CoordinateConverter, Percent, PixelPoint};
use crate::types::ElementRef;

impl Editor {
    /// Convert a pointer event to percentage space using the container
    /// measured for that event. `None` while the container has no area.
    pub fn pointer_to_percent(&self, event: &PointerEvent) -> Option<Percent> {
        let percent = CoordinateConverter::to_percent(event.position, &event.container);
        if percent.is_none() {
            tracing::debug!(
                container = ?event.container,
                "Ignoring pointer event on degenerate container"
            );
        }
        percent
    }

    /// Client pixel position of an element's anchor on the current page,
    /// for overlays drawn on top of the canvas.
    pub fn element_pixel_position(
        &self,
        element: &ElementRef,
        container: &ContainerRect,
    ) -> Option<PixelPoint> {
        let geometry = self.current_page()?.geometry(element)?;
        Some(CoordinateConverter::to_pixel(geometry.origin(), container))
    }
}
