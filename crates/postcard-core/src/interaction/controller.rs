//! Selection and drag controller.

use super::state::{DragSession, FocusRequest, InteractionState, Propagation};
use crate::store::WidgetStore;
use crate::widgets::{Widget, WidgetId, WidgetPatch, WidgetRef, WidgetTrait};
use kurbo::Point;

/// Turns pointer, keyboard and text events into selection changes and
/// widget mutations.
///
/// The controller never owns widgets; every operation takes the store so a
/// single container stays authoritative.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    /// Create a controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Get the live selection. A reference to a removed widget reads as none.
    pub fn selected(&self, store: &WidgetStore) -> Option<WidgetRef> {
        self.state.target().filter(|t| store.contains(t.id))
    }

    /// Check if a widget is the selected one.
    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.state.refers_to(id)
    }

    /// Get the active drag session, if any.
    pub fn dragging(&self) -> Option<&DragSession> {
        match &self.state {
            InteractionState::Dragging { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Pointer pressed on a widget.
    ///
    /// Selects the widget and starts a drag session. A text widget that is
    /// being edited keeps the pointer for text selection, so nothing happens.
    pub fn pointer_down(&mut self, store: &mut WidgetStore, id: WidgetId, pointer: Point) -> Propagation {
        let Some(widget) = store.get(id) else {
            log::debug!("Pointer down on unknown widget {}", id);
            return Propagation::Continue;
        };
        if widget.is_editing() {
            return Propagation::Continue;
        }

        let target = widget.widget_ref();
        let initial_position = widget.position();

        // Pressing elsewhere blurs the focused input first.
        self.end_editing_except(store, id);

        self.state = InteractionState::Dragging {
            target,
            session: DragSession::new(target, pointer, initial_position),
        };
        Propagation::Stop
    }

    /// Pointer moved over the canvas.
    /// Returns true if a widget was moved.
    pub fn pointer_move(&mut self, store: &mut WidgetStore, pointer: Point) -> bool {
        let Some(session) = self.dragging().copied() else {
            return false;
        };
        let position = session.position_for(pointer);
        store.update(session.target.id, WidgetPatch::new().with_position(position))
    }

    /// Pointer released. The drag ends; the selection stays.
    pub fn pointer_up(&mut self) {
        if let InteractionState::Dragging { target, .. } = self.state {
            self.state = InteractionState::Selected(target);
        }
    }

    /// Pointer left the canvas surface. Same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Double-click on a widget: enter text edit mode.
    ///
    /// Returns a focus request for the inline input, or `None` if the widget is
    /// not a text widget or is already being edited.
    pub fn double_click(&mut self, store: &mut WidgetStore, id: WidgetId) -> Option<FocusRequest> {
        let text = store.text(id)?;
        if text.is_editing {
            return None;
        }
        let target = text.widget_ref();

        // At most one widget edits at a time.
        self.end_editing_except(store, id);

        store.update(id, WidgetPatch::new().with_editing(true));
        self.state = InteractionState::EditingText(target);
        Some(FocusRequest { id })
    }

    /// Text typed into the inline input of an editing widget.
    /// Returns true if the text changed.
    pub fn text_input(&mut self, store: &mut WidgetStore, id: WidgetId, text: &str) -> bool {
        let editing = store.text(id).is_some_and(|t| t.is_editing);
        editing && store.update(id, WidgetPatch::new().with_text(text))
    }

    /// Inline input lost focus: leave edit mode.
    pub fn blur(&mut self, store: &mut WidgetStore, id: WidgetId) {
        store.update(id, WidgetPatch::new().with_editing(false));
        if let InteractionState::EditingText(target) = self.state {
            if target.id == id {
                self.state = InteractionState::Selected(target);
            }
        }
    }

    /// Click on the canvas background: drop the selection.
    pub fn clear_selection(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Delete/Backspace pressed.
    ///
    /// Ignored while any text widget is being edited. Removes the selected
    /// widget otherwise.
    pub fn delete_key(&mut self, store: &mut WidgetStore) -> Option<Widget> {
        if store.editing_text().is_some() {
            return None;
        }
        self.delete_selected(store)
    }

    /// Delete the selected widget and return to idle.
    pub fn delete_selected(&mut self, store: &mut WidgetStore) -> Option<Widget> {
        let target = self.selected(store)?;
        let removed = store.remove(target.id);
        // Clears any drag session that referenced the widget.
        self.state = InteractionState::Idle;
        removed
    }

    fn end_editing_except(&mut self, store: &mut WidgetStore, keep: WidgetId) {
        if let Some(editing) = store.editing_text() {
            if editing != keep {
                self.blur(store, editing);
            }
        }
    }
}
