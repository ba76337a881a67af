//! Interaction state definitions.

use crate::widgets::{WidgetId, WidgetRef};
use kurbo::{Point, Vec2};

/// A drag in progress.
///
/// Positions are always recomputed from the initial position plus the
/// cumulative pointer delta, so intermediate moves never accumulate error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Widget being dragged.
    pub target: WidgetRef,
    /// Pointer position at drag start.
    pub start_pointer: Point,
    /// Widget position at drag start.
    pub initial_position: Point,
}

impl DragSession {
    pub fn new(target: WidgetRef, start_pointer: Point, initial_position: Point) -> Self {
        Self {
            target,
            start_pointer,
            initial_position,
        }
    }

    /// Cumulative pointer delta since drag start.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer - self.start_pointer
    }

    /// Widget position for the given pointer position.
    pub fn position_for(&self, pointer: Point) -> Point {
        self.initial_position + self.delta(pointer)
    }
}

/// The single authoritative interaction state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A widget is selected.
    Selected(WidgetRef),
    /// A widget is selected and being dragged.
    Dragging {
        target: WidgetRef,
        session: DragSession,
    },
    /// A text widget is selected and its inline input is focused.
    EditingText(WidgetRef),
}

impl InteractionState {
    /// The selected widget reference, regardless of sub-state.
    pub fn target(&self) -> Option<WidgetRef> {
        match self {
            Self::Idle => None,
            Self::Selected(target) | Self::EditingText(target) => Some(*target),
            Self::Dragging { target, .. } => Some(*target),
        }
    }

    /// Check if a drag session is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Check if a text widget is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingText(_))
    }

    /// Check if the state refers to `id`.
    pub fn refers_to(&self, id: WidgetId) -> bool {
        self.target().is_some_and(|t| t.id == id)
    }
}

/// Whether a pointer-down should keep bubbling to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the event reach the canvas handlers.
    Continue,
    /// Stop the event so the canvas does not clear the selection.
    Stop,
}

/// Request to focus a text widget's inline input on the next render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub id: WidgetId,
}
