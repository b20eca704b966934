//! Pointer down handling - drag initiation for the move tool.
//!
//! ## Performance Notes
//!
//! Pointer down hit tests the current page. The page's R-tree is cached and
//! only rebuilt after the registry changes.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::input::{PointerEvent, PointerOutcome};
use crate::profile_scope;
use tracing::debug;

impl Editor {
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("handle_pointer_down");

        if !self.mode.is_moving() {
            return PointerOutcome::Ignored;
        }
        let Some(pointer) = self.pointer_to_percent(event) else {
            return PointerOutcome::Ignored;
        };

        let revision = self.registry.revision();
        let Some(page) = self.registry.page(self.current_page) else {
            return PointerOutcome::Ignored;
        };
        let Some(target) = self.hit_tester.hit_test(page, revision, pointer) else {
            return PointerOutcome::Ignored;
        };
        let Some(geometry) = page.geometry(&target) else {
            return PointerOutcome::Ignored;
        };

        debug!(?target, x = pointer.x, y = pointer.y, "Drag started");
        self.drag.begin(target.clone(), pointer, &geometry);
        PointerOutcome::DragStarted(target)
    }
}
