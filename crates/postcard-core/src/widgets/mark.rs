//! Decorative mark widget (stickers and stamps).

use super::{WidgetId, WidgetKind, WidgetTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of decorative mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    #[default]
    Sticker,
    Stamp,
}

impl MarkKind {
    /// Glyph drawn when a mark carries no catalog image.
    pub fn default_glyph(&self) -> MarkGlyph {
        match self {
            MarkKind::Sticker => MarkGlyph {
                src: "assets/icon-toolbar-sticker.svg",
                alt: "Sticker mark",
            },
            MarkKind::Stamp => MarkGlyph {
                src: "assets/icon-toolbar-stamp.svg",
                alt: "Stamp mark",
            },
        }
    }
}

/// Image reference and alt text for a mark kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkGlyph {
    pub src: &'static str,
    pub alt: &'static str,
}

/// A draggable sticker or stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkWidget {
    pub(crate) id: WidgetId,
    /// Center of the mark in canvas-local coordinates.
    pub position: Point,
    /// Sticker or stamp.
    pub kind: MarkKind,
    /// Catalog image reference (stickers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl MarkWidget {
    /// Edge length of the square a mark is drawn in.
    pub const SIZE: f64 = 52.0;

    /// Create a new mark. Stamps never carry a catalog image.
    pub fn new(position: Point, kind: MarkKind, image_ref: Option<String>) -> Self {
        let image_ref = match kind {
            MarkKind::Sticker => image_ref,
            MarkKind::Stamp => None,
        };
        Self {
            id: Uuid::new_v4(),
            position,
            kind,
            image_ref,
        }
    }

    /// Image to draw and its alt label.
    pub fn image(&self) -> (&str, &str) {
        match (&self.kind, &self.image_ref) {
            (MarkKind::Sticker, Some(src)) => (src.as_str(), "Sticker"),
            (kind, _) => {
                let glyph = kind.default_glyph();
                (glyph.src, glyph.alt)
            }
        }
    }

    /// Bounding box of a mark of `size` centered on its position.
    pub fn bounds(&self, size: f64) -> Rect {
        Rect::from_center_size(self.position, (size, size))
    }
}

impl WidgetTrait for MarkWidget {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Mark
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_uses_catalog_image() {
        let mark = MarkWidget::new(
            Point::ZERO,
            MarkKind::Sticker,
            Some("assets/stickers/fire.svg".to_string()),
        );
        assert_eq!(mark.image(), ("assets/stickers/fire.svg", "Sticker"));
    }

    #[test]
    fn test_missing_image_uses_default_glyph() {
        let sticker = MarkWidget::new(Point::ZERO, MarkKind::Sticker, None);
        assert_eq!(sticker.image(), ("assets/icon-toolbar-sticker.svg", "Sticker mark"));

        let stamp = MarkWidget::new(Point::ZERO, MarkKind::Stamp, Some("x.svg".to_string()));
        assert_eq!(stamp.image(), ("assets/icon-toolbar-stamp.svg", "Stamp mark"));
    }

    #[test]
    fn test_bounds_centered() {
        let mark = MarkWidget::new(Point::new(100.0, 100.0), MarkKind::Sticker, None);
        let bounds = mark.bounds(MarkWidget::SIZE);
        assert_eq!(bounds.center(), Point::new(100.0, 100.0));
        assert!((bounds.width() - 52.0).abs() < f64::EPSILON);
    }
}
