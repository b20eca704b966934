//! Pointer input handling for the survey canvas.
//!
//! This module implements the editing gestures: placing elements, dragging
//! them with the move tool and deleting them with the delete tool.
//!
//! ## Architecture
//!
//! The editor mode is an explicit state machine (`EditorMode`) and at most
//! one drag session exists at a time (`DragSessionManager`). A pointer-up
//! first asks the drag manager whether a drag just ended; only if not is it
//! treated as a click.
//!
//! ## Modules
//!
//! - `coords` - Pixel/percentage conversion and clamping
//! - `state` - Editor mode state machine
//! - `drag_session` - The single active drag
//! - `mouse_down` - Pointer down handling (drag start)
//! - `mouse_up` - Pointer up handling (finish drag, place, delete)
//! - `drag` - Pointer move and leave handling
//! - `transform` - Coordinate conversion for the current canvas

pub mod coords;
mod drag;
mod drag_session;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use coords::{ContainerRect, CoordinateConverter, Percent, PixelPoint};
pub use drag_session::{DragSession, DragSessionManager};
pub use state::{EditorMode, OpenQuestion};

use crate::types::ElementRef;

/// A pointer event together with the container rectangle measured for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: PixelPoint,
    pub container: ContainerRect,
}

impl PointerEvent {
    pub fn new(position: PixelPoint, container: ContainerRect) -> Self {
        Self {
            position,
            container,
        }
    }
}

/// What the editor did with a pointer event
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing happened
    Ignored,
    DragStarted(ElementRef),
    /// The dragged element was written at a new position
    Dragged(Percent),
    /// Pointer released after a drag; not a click
    DragEnded,
    /// Pointer left the canvas during a drag; the last position stays
    DragAborted,
    /// A new element was created
    Placed(ElementRef),
    /// An option was added to the open choice question
    OptionAppended(ElementRef),
    Deleted(ElementRef),
}
