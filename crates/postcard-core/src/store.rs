//! Widget store: the authoritative list of widgets on the postcard.

use crate::widgets::{MarkWidget, TextWidget, Widget, WidgetId, WidgetKind, WidgetPatch, WidgetTrait};
use std::collections::HashMap;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Widget id already in use: {0}")]
    DuplicateId(WidgetId),
}

/// Holds every widget keyed by id, plus insertion order.
#[derive(Debug, Clone, Default)]
pub struct WidgetStore {
    /// All widgets, keyed by ID.
    widgets: HashMap<WidgetId, Widget>,
    /// Insertion order (oldest first).
    order: Vec<WidgetId>,
}

impl WidgetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget. Ids must be unique across texts and marks.
    pub fn add(&mut self, widget: impl Into<Widget>) -> Result<WidgetId, StoreError> {
        let widget = widget.into();
        let id = widget.id();
        if self.widgets.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        self.order.push(id);
        self.widgets.insert(id, widget);
        Ok(id)
    }

    /// Remove a widget. Unknown ids are ignored.
    pub fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        let removed = self.widgets.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    /// Apply a patch to a widget.
    /// Returns false (and does nothing) if the id is unknown.
    pub fn update(&mut self, id: WidgetId, patch: WidgetPatch) -> bool {
        match self.widgets.get_mut(&id) {
            Some(widget) => {
                widget.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Get a widget by ID.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Get a text widget by ID.
    pub fn text(&self, id: WidgetId) -> Option<&TextWidget> {
        self.get(id).and_then(Widget::as_text)
    }

    /// Check whether a widget exists.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Kind of the widget with this id, if present.
    pub fn kind_of(&self, id: WidgetId) -> Option<WidgetKind> {
        self.get(id).map(WidgetTrait::kind)
    }

    /// Text widgets in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &TextWidget> {
        self.ordered().filter_map(Widget::as_text)
    }

    /// Mark widgets in insertion order.
    pub fn marks(&self) -> impl Iterator<Item = &MarkWidget> {
        self.ordered().filter_map(Widget::as_mark)
    }

    /// Widgets in paint order (back to front): texts layer, then marks layer.
    pub fn widgets_ordered(&self) -> impl Iterator<Item = &Widget> {
        self.ordered()
            .filter(|w| w.kind() == WidgetKind::Text)
            .chain(self.ordered().filter(|w| w.kind() == WidgetKind::Mark))
    }

    /// The text widget currently in edit mode, if any.
    pub fn editing_text(&self) -> Option<WidgetId> {
        self.texts().find(|t| t.is_editing).map(|t| t.id())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Get the number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    fn ordered(&self) -> impl Iterator<Item = &Widget> {
        self.order.iter().filter_map(|id| self.widgets.get(id))
    }
}
