//! Canvas surface events.

use crate::payload::DragData;
use crate::widgets::WidgetId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Keys that delete the selected widget. Backspace is the Mac delete key.
pub const DELETE_KEYS: &[&str] = &["Delete", "Backspace"];

/// Check if a key name deletes the selection.
pub fn is_delete_key(key: &str) -> bool {
    DELETE_KEYS.contains(&key)
}

/// An event delivered by the canvas surface.
///
/// Pointer positions are raw client coordinates; the editor converts them to
/// canvas-local space against the current canvas bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Primary button pressed on a widget.
    WidgetPointerDown { id: WidgetId, position: Point },
    /// Pointer moved over the canvas.
    PointerMove { position: Point },
    /// Primary button released over the canvas.
    PointerUp,
    /// Pointer left the canvas.
    PointerLeave,
    /// Double-click on a widget.
    WidgetDoubleClick { id: WidgetId },
    /// Inline input value changed.
    TextInput { id: WidgetId, text: String },
    /// Inline input lost focus.
    TextBlur { id: WidgetId },
    /// Click that reached the canvas background.
    BackgroundClick,
    /// Global key press.
    KeyDown { key: String },
    /// Global press anywhere on the page (for closing dropdowns).
    OutsideClick { position: Point },
    /// External drag hovering the canvas.
    DragOver,
    /// External drag released on the canvas.
    Drop { data: DragData, position: Point },
}

/// What the host should do with the DOM event after the editor handled it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    /// Stop the event from bubbling to the canvas.
    pub stop_propagation: bool,
    /// Suppress the browser default action.
    pub prevent_default: bool,
    /// Editor state changed; the surface needs a re-render.
    pub changed: bool,
}

impl EventResponse {
    /// Nothing to do.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// State changed.
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn with_changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    pub fn with_stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    pub fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}
