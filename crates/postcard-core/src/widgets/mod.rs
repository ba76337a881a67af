//! Widget definitions for the postcard canvas.

mod mark;
mod text;

pub use mark::{MarkGlyph, MarkKind, MarkWidget};
pub use text::TextWidget;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for widgets.
pub type WidgetId = Uuid;

/// Discriminant shared by the store, the selection and the drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Text,
    Mark,
}

/// A reference to a widget by id and kind.
///
/// Holding a ref never keeps the widget alive; a ref whose widget was removed
/// reads as "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetRef {
    pub id: WidgetId,
    pub kind: WidgetKind,
}

impl WidgetRef {
    pub fn new(id: WidgetId, kind: WidgetKind) -> Self {
        Self { id, kind }
    }
}

/// Common capabilities of every positionable widget.
pub trait WidgetTrait {
    /// Get the unique identifier.
    fn id(&self) -> WidgetId;

    /// Get the variant discriminant.
    fn kind(&self) -> WidgetKind;

    /// Get the position (the widget's center, in canvas-local coordinates).
    fn position(&self) -> Point;

    /// Move the widget. No clamping is applied.
    fn set_position(&mut self, position: Point);

    /// Get a reference usable for selection.
    fn widget_ref(&self) -> WidgetRef {
        WidgetRef::new(self.id(), self.kind())
    }
}

/// Enum wrapping all widget types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum Widget {
    Text(TextWidget),
    Mark(MarkWidget),
}

impl Widget {
    /// Get the text widget, if this is one.
    pub fn as_text(&self) -> Option<&TextWidget> {
        match self {
            Widget::Text(t) => Some(t),
            Widget::Mark(_) => None,
        }
    }

    /// Get the text widget mutably, if this is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextWidget> {
        match self {
            Widget::Text(t) => Some(t),
            Widget::Mark(_) => None,
        }
    }

    /// Get the mark widget, if this is one.
    pub fn as_mark(&self) -> Option<&MarkWidget> {
        match self {
            Widget::Mark(m) => Some(m),
            Widget::Text(_) => None,
        }
    }

    /// Whether this is a text widget in edit mode.
    pub fn is_editing(&self) -> bool {
        self.as_text().is_some_and(|t| t.is_editing)
    }

    /// Apply the fields of a patch that make sense for this variant.
    pub fn apply(&mut self, patch: WidgetPatch) {
        if let Some(position) = patch.position {
            self.set_position(position);
        }
        match self {
            Widget::Text(t) => {
                if let Some(text) = patch.text {
                    t.text = text;
                }
                if let Some(editing) = patch.is_editing {
                    t.is_editing = editing;
                }
                if let Some(family) = patch.font_family {
                    t.font_family = family;
                }
            }
            Widget::Mark(m) => {
                if let Some(image_ref) = patch.image_ref {
                    m.image_ref = image_ref;
                }
            }
        }
    }
}

impl WidgetTrait for Widget {
    fn id(&self) -> WidgetId {
        match self {
            Widget::Text(t) => t.id(),
            Widget::Mark(m) => m.id(),
        }
    }

    fn kind(&self) -> WidgetKind {
        match self {
            Widget::Text(_) => WidgetKind::Text,
            Widget::Mark(_) => WidgetKind::Mark,
        }
    }

    fn position(&self) -> Point {
        match self {
            Widget::Text(t) => t.position(),
            Widget::Mark(m) => m.position(),
        }
    }

    fn set_position(&mut self, position: Point) {
        match self {
            Widget::Text(t) => t.set_position(position),
            Widget::Mark(m) => m.set_position(position),
        }
    }
}

impl From<TextWidget> for Widget {
    fn from(text: TextWidget) -> Self {
        Widget::Text(text)
    }
}

impl From<MarkWidget> for Widget {
    fn from(mark: MarkWidget) -> Self {
        Widget::Mark(mark)
    }
}

/// A partial update to a widget.
///
/// Fields that do not apply to the target variant are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPatch {
    pub position: Option<Point>,
    pub text: Option<String>,
    pub is_editing: Option<bool>,
    pub font_family: Option<String>,
    pub image_ref: Option<Option<String>>,
}

impl WidgetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_editing(mut self, editing: bool) -> Self {
        self.is_editing = Some(editing);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_image_ref(mut self, image_ref: Option<String>) -> Self {
        self.image_ref = Some(image_ref);
        self
    }
}
