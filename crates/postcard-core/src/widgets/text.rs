//! Text label widget.

use super::{WidgetId, WidgetKind, WidgetTrait};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A draggable, inline-editable text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextWidget {
    pub(crate) id: WidgetId,
    /// Center of the label in canvas-local coordinates.
    pub position: Point,
    /// The label text.
    pub text: String,
    /// True while the inline text box is focused.
    pub is_editing: bool,
    /// CSS font family list, e.g. `"Poppins, Noto Sans"`.
    pub font_family: String,
}

impl TextWidget {
    /// Font used when no palette entry was chosen.
    pub const DEFAULT_FONT_FAMILY: &'static str = "Unbounded";
    /// Prompt shown on a freshly added label.
    pub const PLACEHOLDER_TEXT: &'static str = "Double click to edit";

    /// Create a label with the placeholder text and default font.
    pub fn new(position: Point) -> Self {
        Self::with_font(position, Self::DEFAULT_FONT_FAMILY, Self::PLACEHOLDER_TEXT)
    }

    /// Create a label with the given font family and text.
    pub fn with_font(position: Point, font_family: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            text: text.into(),
            is_editing: false,
            font_family: font_family.into(),
        }
    }

    /// Width of the inline input in characters (never zero).
    pub fn input_size(&self) -> usize {
        self.text.chars().count().max(1)
    }
}

impl WidgetTrait for TextWidget {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}
