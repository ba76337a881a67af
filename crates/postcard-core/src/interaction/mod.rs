//! Interaction state machine for the canvas.
//!
//! Tracks which widget is selected, dragged or edited:
//! - Pointer-down on a widget selects it and starts a drag session
//! - Pointer-move repositions the dragged widget
//! - Double-click enters text editing, blur leaves it
//! - Delete/Backspace removes the selection unless text is being edited
//!
//! Widgets remain pure data in the store. The controller holds the only
//! interaction state.

mod controller;
mod state;

pub use controller::InteractionController;
pub use state::{DragSession, FocusRequest, InteractionState, Propagation};
