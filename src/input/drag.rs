//! Drag operations - pointer move and pointer leave.
//!
//! ## Performance Notes
//!
//! Pointer move is called for every mouse event during a drag. Key points:
//! - Early exit when no drag is active
//! - One registry write per move, skipped when the position is unchanged
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::input::{PointerEvent, PointerOutcome};
use crate::perf::POINTER_EVENT_BUDGET_MS;
use crate::profile_scope;
use crate::registry::{Applied, Command};
use tracing::{debug, warn};

impl Editor {
    pub fn handle_pointer_move(&mut self, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("handle_pointer_move", POINTER_EVENT_BUDGET_MS);

        let Some(session) = self.drag.session() else {
            return PointerOutcome::Ignored;
        };
        let target = session.target.clone();
        let Some(pointer) = self.pointer_to_percent(event) else {
            return PointerOutcome::Ignored;
        };

        let Some(geometry) = self
            .registry
            .page(self.current_page)
            .and_then(|page| page.geometry(&target))
        else {
            // Element vanished underneath the drag
            warn!(?target, "Dragged element no longer exists");
            self.drag.abort();
            return PointerOutcome::Ignored;
        };

        let Some(position) = self.drag.target_position(pointer, &geometry) else {
            return PointerOutcome::Ignored;
        };
        if position == geometry.origin() {
            return PointerOutcome::Dragged(position);
        }

        match self.registry.apply(Command::MoveElement {
            page_index: self.current_page,
            element: target,
            to: position,
        }) {
            Ok(Applied::Moved { position }) => PointerOutcome::Dragged(position),
            Ok(_) => PointerOutcome::Ignored,
            Err(e) => {
                debug!("Move rejected: {}", e);
                PointerOutcome::Ignored
            }
        }
    }

    /// Pointer left the canvas: stop the drag where it is.
    pub fn handle_pointer_leave(&mut self) -> PointerOutcome {
        match self.drag.abort() {
            Some(session) => {
                debug!(target = ?session.target, "Drag aborted at last position");
                PointerOutcome::DragAborted
            }
            None => PointerOutcome::Ignored,
        }
    }
}
